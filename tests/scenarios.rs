use std::time::Duration;

use blinky::driver::{run, shutdown_channel};
use blinky::mock::{EventKind, MockLine};
use blinky::{HardwareFault, LineState, Polarity, Toggler};

const PERIOD: Duration = Duration::from_millis(500);

#[tokio::test(start_paused = true)]
async fn normal_run_blinks_with_fixed_period() {
    let line = MockLine::new("led0", Polarity::ActiveHigh);
    let recorder = line.recorder();
    let toggler = Toggler::start(line, LineState::Active).unwrap();
    let (trigger, shutdown) = shutdown_channel();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1750)).await;
        trigger.trigger();
    });
    run(toggler, PERIOD, shutdown).await.unwrap();

    let events = recorder.events();
    let t0 = events
        .iter()
        .find(|e| matches!(e.kind, EventKind::Configured(_)))
        .map(|e| e.at)
        .unwrap();
    let timeline: Vec<(u128, LineState)> = events
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::Configured(s) | EventKind::Toggled(s) => {
                Some(((e.at - t0).as_millis(), s))
            }
            EventKind::ReadyQueried => None,
        })
        .collect();
    assert_eq!(
        timeline,
        vec![
            (0, LineState::Active),
            (0, LineState::Inactive),
            (500, LineState::Active),
            (1000, LineState::Inactive),
            (1500, LineState::Active),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn unready_hardware_makes_no_calls() {
    let line = MockLine::new("led0", Polarity::ActiveHigh).unready();
    let recorder = line.recorder();
    let err = Toggler::start(line, LineState::Active).unwrap_err();
    assert!(matches!(err, HardwareFault::NotReady { .. }));
    assert_eq!(recorder.configure_attempts(), 0);
    assert_eq!(recorder.toggle_attempts(), 0);
}

#[tokio::test(start_paused = true)]
async fn configuration_failure_makes_no_toggles() {
    let line = MockLine::new("led0", Polarity::ActiveLow).failing_configure();
    let recorder = line.recorder();
    let err = Toggler::start(line, LineState::Active).unwrap_err();
    assert!(matches!(err, HardwareFault::Configure { .. }));
    assert_eq!(recorder.toggle_attempts(), 0);
    assert!(recorder.levels().is_empty());
}

#[tokio::test(start_paused = true)]
async fn toggle_failure_on_third_iteration_ends_the_run() {
    let line = MockLine::new("led0", Polarity::ActiveHigh).failing_toggle_at(3);
    let recorder = line.recorder();
    let toggler = Toggler::start(line, LineState::Active).unwrap();
    let (_trigger, shutdown) = shutdown_channel();
    let started = tokio::time::Instant::now();

    let err = run(toggler, PERIOD, shutdown).await.unwrap_err();

    assert_eq!(
        err,
        HardwareFault::Toggle {
            line: "led0".to_string(),
            reason: "injected failure on toggle 3".to_string(),
        }
    );
    assert_eq!(recorder.toggled_states(), vec![LineState::Inactive, LineState::Active]);
    assert_eq!(recorder.toggle_attempts(), 3);
    assert_eq!(started.elapsed(), Duration::from_millis(1000));

    // nothing touches the line after the fault
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(recorder.toggle_attempts(), 3);
}

#[tokio::test(start_paused = true)]
async fn state_holds_between_toggles() {
    let line = MockLine::new("led0", Polarity::ActiveHigh);
    let recorder = line.recorder();
    let toggler = Toggler::start(line, LineState::Active).unwrap();
    let (trigger, shutdown) = shutdown_channel();
    let handle = tokio::spawn(run(toggler, PERIOD, shutdown));

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(recorder.toggled_states(), vec![LineState::Inactive]);
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(recorder.toggled_states(), vec![LineState::Inactive]);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(
        recorder.toggled_states(),
        vec![LineState::Inactive, LineState::Active]
    );

    trigger.trigger();
    let toggler = handle.await.unwrap().unwrap();
    assert_eq!(toggler.toggles(), 2);
    assert_eq!(toggler.line().state(), Some(LineState::Active));
}
