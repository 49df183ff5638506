//! Periodic toggle loop with a cancellation flag.

use std::time::Duration;

use eyre::{Result, WrapErr};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::error::HardwareFault;
use crate::line::{LineState, OutputLine};
use crate::toggler::Toggler;

/// Receiving half of the cancellation flag, checked between toggles.
#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

/// Sending half. Dropping it without triggering means "never cancelled".
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

pub fn shutdown_channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, Shutdown { rx })
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        // no receivers left means the loop already finished
        let _ = self.tx.send(true);
    }
}

impl Shutdown {
    pub fn is_requested(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown has been requested.
    pub async fn requested(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Shutdown flag raised by the first Ctrl-C.
pub fn shutdown_on_ctrl_c() -> Shutdown {
    let (trigger, shutdown) = shutdown_channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received interrupt, stopping");
                trigger.trigger();
            }
            Err(e) => warn!("Unable to listen for interrupt: {}", e),
        }
    });
    shutdown
}

/// Check readiness and configure `line` on the blocking pool.
///
/// Both calls may touch sysfs and sleep while a fresh export settles.
pub async fn start_blocking<L>(line: L, initial: LineState) -> Result<Toggler<L>>
where
    L: OutputLine + Send + 'static,
{
    let toggler = tokio::task::spawn_blocking(move || Toggler::start(line, initial))
        .await
        .wrap_err("Line startup task failed")??;
    Ok(toggler)
}

fn stopped<L: OutputLine>(toggler: Toggler<L>) -> Result<Toggler<L>, HardwareFault> {
    info!(
        "Stopped after {} toggles, line left {:?}",
        toggler.toggles(),
        toggler.state()
    );
    Ok(toggler)
}

/// Drive `toggler` until shutdown or the first fault.
///
/// Every iteration toggles, then sleeps for `period`, so the first edge comes
/// right after configuration. The sleep yields to the runtime and is raced
/// against `shutdown`. A toggle is a short synchronous write and runs inline.
pub async fn run<L: OutputLine>(
    mut toggler: Toggler<L>,
    period: Duration,
    mut shutdown: Shutdown,
) -> Result<Toggler<L>, HardwareFault> {
    info!("Blinking line {} every {:?}", toggler.line().name(), period);
    loop {
        if shutdown.is_requested() {
            return stopped(toggler);
        }
        toggler = toggler.step().map_err(|e| {
            error!("{}", e);
            e
        })?;
        tokio::select! {
            _ = tokio::time::sleep(period) => {}
            _ = shutdown.requested() => return stopped(toggler),
        }
    }
}
