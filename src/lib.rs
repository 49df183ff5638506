pub mod config;
pub mod driver;
pub mod error;
pub mod line;
pub mod mock;
pub mod sysfs;
pub mod toggler;

pub use error::HardwareFault;
pub use line::{LineSpec, LineState, OutputLine, Polarity};
pub use toggler::Toggler;
