// Toggle the configured line a few times to check wiring
use blinky::config::Config;
use blinky::sysfs::SysfsLine;
use blinky::{LineState, Toggler};
use eyre::Result;
use std::thread::sleep;
use std::time::Duration;

fn main() -> Result<()> {
    let config = Config::load()?;
    let spec = config.line_spec()?;
    println!("Testing line {} on GPIO {} ({:?})", spec.name, spec.pin, spec.polarity);
    let mut toggler = Toggler::start(SysfsLine::new(spec), LineState::Active)?;
    for _ in 0..10 {
        toggler = toggler.step()?;
        println!("{:?}", toggler.state());
        sleep(Duration::from_millis(200));
    }
    Ok(())
}
