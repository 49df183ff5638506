//! Hardware fault type shared by every output-line backend.

use std::fmt;

/// Failure reported by one of the hardware-touching calls.
///
/// There is no recovery path for any of these: whoever receives one stops
/// driving the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HardwareFault {
    /// The controller backing the line is not initialized or not reachable.
    NotReady { line: String },
    /// Switching the line to output mode failed.
    Configure { line: String, reason: String },
    /// Inverting the line's output state failed.
    Toggle { line: String, reason: String },
}

impl HardwareFault {
    pub fn line(&self) -> &str {
        match self {
            HardwareFault::NotReady { line }
            | HardwareFault::Configure { line, .. }
            | HardwareFault::Toggle { line, .. } => line,
        }
    }
}

impl fmt::Display for HardwareFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareFault::NotReady { line } => write!(f, "line `{}` is not ready", line),
            HardwareFault::Configure { line, reason } => {
                write!(f, "failed to configure line `{}` as output: {}", line, reason)
            }
            HardwareFault::Toggle { line, reason } => {
                write!(f, "failed to toggle line `{}`: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for HardwareFault {}
