//! Output-line model and the capability trait backends implement.

use serde::Deserialize;

use crate::error::HardwareFault;

/// Which electrical level means "asserted".
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Polarity {
    #[default]
    ActiveHigh,
    ActiveLow,
}

/// Logical state of a line, independent of how it is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    Active,
    Inactive,
}

impl LineState {
    pub fn toggled(self) -> Self {
        match self {
            LineState::Active => LineState::Inactive,
            LineState::Inactive => LineState::Active,
        }
    }

    /// Physical level (`true` = high) that represents this state.
    pub fn level(self, polarity: Polarity) -> bool {
        match (self, polarity) {
            (LineState::Active, Polarity::ActiveHigh)
            | (LineState::Inactive, Polarity::ActiveLow) => true,
            (LineState::Active, Polarity::ActiveLow)
            | (LineState::Inactive, Polarity::ActiveHigh) => false,
        }
    }
}

/// A resolved line descriptor: everything a backend needs to find the pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpec {
    pub name: String,
    pub pin: u64,
    pub polarity: Polarity,
    pub label: Option<String>,
}

/// A single digital output owned by one control flow.
///
/// Direction is set once by `configure_as_output` and never changes after.
pub trait OutputLine {
    fn name(&self) -> &str;

    /// Whether the controller behind the line is initialized and usable.
    fn is_ready(&self) -> bool;

    /// Switch to output mode, driving `initial` with the line's polarity applied.
    fn configure_as_output(&mut self, initial: LineState) -> Result<(), HardwareFault>;

    /// Invert the current logical state.
    fn toggle(&mut self) -> Result<(), HardwareFault>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_inverts() {
        assert_eq!(LineState::Active.toggled(), LineState::Inactive);
        assert_eq!(LineState::Inactive.toggled(), LineState::Active);
    }

    #[test]
    fn level_honors_polarity() {
        assert!(LineState::Active.level(Polarity::ActiveHigh));
        assert!(!LineState::Active.level(Polarity::ActiveLow));
        assert!(!LineState::Inactive.level(Polarity::ActiveHigh));
        assert!(LineState::Inactive.level(Polarity::ActiveLow));
    }
}
