use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use eyre::{eyre, Result, WrapErr};
use tracing::Level;

use crate::line::{LineSpec, Polarity};

#[derive(Deserialize, Debug, Clone)]
pub struct LineConfig {
    pub pin: u64,
    #[serde(default)]
    pub polarity: Polarity,
    pub label: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BlinkConfig {
    pub line: String,
    pub period_ms: u64,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            line: "led0".to_string(),
            period_ms: 500,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub blink: BlinkConfig,
    pub log: LogConfig,
    pub lines: HashMap<String, LineConfig>,
}

impl Config {
    /// User config from the XDG config dir, then `./config.toml`, then `BLINKY_*` variables.
    pub fn figment() -> Result<Figment> {
        let mut figment = Figment::new();
        let dirs = xdg::BaseDirectories::with_prefix("blinky")?;
        if let Some(path) = dirs.find_config_file("config.toml") {
            figment = figment.merge(Toml::file(path));
        }
        Ok(figment
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("BLINKY_").split("__")))
    }

    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment()?)
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        figment.extract().wrap_err("Invalid configuration")
    }

    /// Resolve the configured alias to a concrete line.
    pub fn line_spec(&self) -> Result<LineSpec> {
        let alias = &self.blink.line;
        let line = self
            .lines
            .get(alias)
            .ok_or_else(|| eyre!("No line aliased `{}` in configuration", alias))?;
        Ok(LineSpec {
            name: alias.clone(),
            pin: line.pin,
            polarity: line.polarity,
            label: line.label.clone(),
        })
    }

    pub fn period(&self) -> Result<Duration> {
        match self.blink.period_ms {
            0 => Err(eyre!("blink.period_ms must be greater than zero")),
            ms => Ok(Duration::from_millis(ms)),
        }
    }

    pub fn log_level(&self) -> Result<Level> {
        self.log
            .level
            .parse()
            .wrap_err_with(|| format!("Invalid log level `{}`", self.log.level))
    }
}
