// Blink one configured GPIO line until interrupted
use blinky::config::Config;
use blinky::driver::{run, shutdown_on_ctrl_c, start_blocking};
use blinky::sysfs::SysfsLine;
use blinky::LineState;
use eyre::{Result, WrapErr};
use tracing::info;

use git_version::git_version;
const GIT_VERSION: &str = git_version!(fallback = "unknown");

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(config.log_level()?)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .wrap_err("setting default subscriber failed")?;
    info!("Starting blinky version {}", GIT_VERSION);

    let spec = config.line_spec()?;
    let period = config.period()?;
    info!(
        "Using line {} (GPIO {}, {:?}) {}",
        spec.name,
        spec.pin,
        spec.polarity,
        spec.label.as_deref().unwrap_or("")
    );

    let shutdown = shutdown_on_ctrl_c();
    let toggler = start_blocking(SysfsLine::new(spec), LineState::Active)
        .await
        .wrap_err("Unable to start line")?;
    let toggler = run(toggler, period, shutdown).await.wrap_err("Blinking stopped")?;
    info!("Exiting with line {:?}", toggler.state());
    Ok(())
}
