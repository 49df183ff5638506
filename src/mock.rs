//! Recording output line for tests.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::time::Instant;

use crate::error::HardwareFault;
use crate::line::{LineState, OutputLine, Polarity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    ReadyQueried,
    Configured(LineState),
    Toggled(LineState),
}

/// One call observed by a [`MockLine`], with the physical level after it.
#[derive(Debug, Clone, Copy)]
pub struct Event {
    pub at: Instant,
    pub kind: EventKind,
    pub level: Option<bool>,
}

#[derive(Debug, Default)]
struct Log {
    events: Vec<Event>,
    toggle_attempts: usize,
    configure_attempts: usize,
}

/// Shared view of everything a [`MockLine`] has done.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    log: Arc<Mutex<Log>>,
}

impl Recorder {
    fn lock(&self) -> MutexGuard<'_, Log> {
        // a panic while holding the lock only happens in a failing test
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn events(&self) -> Vec<Event> {
        self.lock().events.clone()
    }

    pub fn configure_attempts(&self) -> usize {
        self.lock().configure_attempts
    }

    pub fn toggle_attempts(&self) -> usize {
        self.lock().toggle_attempts
    }

    /// Logical states after each successful toggle.
    pub fn toggled_states(&self) -> Vec<LineState> {
        self.lock()
            .events
            .iter()
            .filter_map(|e| match e.kind {
                EventKind::Toggled(state) => Some(state),
                _ => None,
            })
            .collect()
    }

    /// Physical levels from configuration onwards.
    pub fn levels(&self) -> Vec<bool> {
        self.lock().events.iter().filter_map(|e| e.level).collect()
    }
}

#[derive(Debug)]
pub struct MockLine {
    name: String,
    polarity: Polarity,
    ready: bool,
    fail_configure: bool,
    fail_toggle_at: Option<usize>,
    state: Option<LineState>,
    recorder: Recorder,
}

impl MockLine {
    pub fn new(name: &str, polarity: Polarity) -> Self {
        Self {
            name: name.to_string(),
            polarity,
            ready: true,
            fail_configure: false,
            fail_toggle_at: None,
            state: None,
            recorder: Recorder::default(),
        }
    }

    pub fn unready(mut self) -> Self {
        self.ready = false;
        self
    }

    pub fn failing_configure(mut self) -> Self {
        self.fail_configure = true;
        self
    }

    /// Fail the `n`-th toggle attempt (1-based).
    pub fn failing_toggle_at(mut self, n: usize) -> Self {
        self.fail_toggle_at = Some(n);
        self
    }

    pub fn recorder(&self) -> Recorder {
        self.recorder.clone()
    }

    pub fn state(&self) -> Option<LineState> {
        self.state
    }

    fn record(&self, kind: EventKind) {
        let level = self.state.map(|s| s.level(self.polarity));
        self.recorder.lock().events.push(Event {
            at: Instant::now(),
            kind,
            level,
        });
    }
}

impl OutputLine for MockLine {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_ready(&self) -> bool {
        self.record(EventKind::ReadyQueried);
        self.ready
    }

    fn configure_as_output(&mut self, initial: LineState) -> Result<(), HardwareFault> {
        self.recorder.lock().configure_attempts += 1;
        if self.fail_configure {
            return Err(HardwareFault::Configure {
                line: self.name.clone(),
                reason: "injected configure failure".to_string(),
            });
        }
        self.state = Some(initial);
        self.record(EventKind::Configured(initial));
        Ok(())
    }

    fn toggle(&mut self) -> Result<(), HardwareFault> {
        let attempt = {
            let mut log = self.recorder.lock();
            log.toggle_attempts += 1;
            log.toggle_attempts
        };
        let current = match self.state {
            Some(state) if self.fail_toggle_at != Some(attempt) => state,
            Some(_) => {
                return Err(HardwareFault::Toggle {
                    line: self.name.clone(),
                    reason: format!("injected failure on toggle {}", attempt),
                })
            }
            None => {
                return Err(HardwareFault::Toggle {
                    line: self.name.clone(),
                    reason: "line is not configured as output".to_string(),
                })
            }
        };
        let next = current.toggled();
        self.state = Some(next);
        self.record(EventKind::Toggled(next));
        Ok(())
    }
}
