//! Linux sysfs GPIO backend.

use std::path::Path;
use std::thread::sleep;
use std::time::Duration;

use sysfs_gpio::{Direction, Pin};
use tracing::{debug, trace, warn};

use crate::error::HardwareFault;
use crate::line::{LineSpec, LineState, OutputLine, Polarity};

const GPIO_CLASS_DIR: &str = "/sys/class/gpio";
// udev needs a moment to fix up permissions on a freshly exported pin
const EXPORT_SETTLE: Duration = Duration::from_millis(90);

/// Output line backed by the Linux sysfs GPIO interface.
#[derive(Debug)]
pub struct SysfsLine {
    spec: LineSpec,
    pin: Pin,
}

impl SysfsLine {
    pub fn new(spec: LineSpec) -> Self {
        let pin = Pin::new(spec.pin);
        Self { spec, pin }
    }

    pub fn spec(&self) -> &LineSpec {
        &self.spec
    }

    fn configure_fault(&self, e: sysfs_gpio::Error) -> HardwareFault {
        HardwareFault::Configure {
            line: self.spec.name.clone(),
            reason: e.to_string(),
        }
    }
}

/// Direction that enters output mode already at the physical level of `initial`.
///
/// sysfs applies `high`/`low` to the raw level, ignoring `active_low`.
pub fn initial_direction(polarity: Polarity, initial: LineState) -> Direction {
    if initial.level(polarity) {
        Direction::High
    } else {
        Direction::Low
    }
}

impl OutputLine for SysfsLine {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn is_ready(&self) -> bool {
        if !Path::new(GPIO_CLASS_DIR).is_dir() {
            warn!("{} not found, sysfs GPIO is unavailable", GPIO_CLASS_DIR);
            return false;
        }
        if self.pin.is_exported() {
            return true;
        }
        match self.pin.export() {
            Ok(()) => {
                debug!("Exported GPIO {}", self.spec.pin);
                sleep(EXPORT_SETTLE);
                true
            }
            Err(e) => {
                warn!("Unable to export GPIO {}: {}", self.spec.pin, e);
                false
            }
        }
    }

    fn configure_as_output(&mut self, initial: LineState) -> Result<(), HardwareFault> {
        let active_low = self.spec.polarity == Polarity::ActiveLow;
        self.pin.set_active_low(active_low).map_err(|e| self.configure_fault(e))?;
        self.pin
            .set_direction(initial_direction(self.spec.polarity, initial))
            .map_err(|e| self.configure_fault(e))?;
        trace!("GPIO {} output, active_low={}", self.spec.pin, active_low);
        Ok(())
    }

    fn toggle(&mut self) -> Result<(), HardwareFault> {
        let fault = |e: sysfs_gpio::Error| HardwareFault::Toggle {
            line: self.spec.name.clone(),
            reason: e.to_string(),
        };
        // value is logical since active_low is set on the pin
        let value = self.pin.get_value().map_err(fault)?;
        self.pin.set_value(if value == 0 { 1 } else { 0 }).map_err(fault)?;
        Ok(())
    }
}
