use tracing::{debug, info, span, Level};

use crate::error::HardwareFault;
use crate::line::{LineState, OutputLine};

/// A line that passed its readiness check and is configured as an output.
///
/// Each [`Toggler::step`] consumes the value, so after a fault there is
/// nothing left to toggle.
#[derive(Debug)]
pub struct Toggler<L> {
    line: L,
    state: LineState,
    toggles: u64,
}

impl<L: OutputLine> Toggler<L> {
    pub fn start(mut line: L, initial: LineState) -> Result<Self, HardwareFault> {
        let _span_ = span!(Level::TRACE, "Toggler::start", line = line.name()).entered();
        if !line.is_ready() {
            return Err(HardwareFault::NotReady {
                line: line.name().to_string(),
            });
        }
        line.configure_as_output(initial)?;
        info!("Line {} configured as output, initial state {:?}", line.name(), initial);
        Ok(Self {
            line,
            state: initial,
            toggles: 0,
        })
    }

    pub fn step(mut self) -> Result<Self, HardwareFault> {
        let _span_ = span!(Level::TRACE, "Toggler::step", toggles = self.toggles).entered();
        self.line.toggle()?;
        self.state = self.state.toggled();
        self.toggles += 1;
        debug!("Line {} is now {:?}", self.line.name(), self.state);
        Ok(self)
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    pub fn toggles(&self) -> u64 {
        self.toggles
    }

    pub fn line(&self) -> &L {
        &self.line
    }
}
