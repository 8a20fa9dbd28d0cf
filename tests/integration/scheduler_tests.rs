//! Scheduler driving a real controller, the way the host loop does.

use sewage_monitor::adapters::gpio::{GpioActuators, SimPin};
use sewage_monitor::adapters::log_sink::LogEventSink;
use sewage_monitor::fault::FaultMode;
use sewage_monitor::scheduler::Scheduler;

use crate::mock_hw::{RecordingSink, controller};

#[test]
fn one_tick_per_period() {
    let (mut c, _) = controller(21);
    let mut sched = Scheduler::new(c.config().tick_period_ms);

    // Poll every 100 ms for 10 s at a 2 s period.
    let mut fired = 0;
    for _ in 0..100 {
        fired += sched.advance(100, &mut c);
    }
    assert_eq!(fired, 5);
    assert_eq!(c.tick_count(), 5);
}

#[test]
fn late_poll_catches_up() {
    let (mut c, _) = controller(22);
    let mut sched = Scheduler::new(c.config().tick_period_ms);
    assert_eq!(sched.advance(7_000, &mut c), 3);
    assert_eq!(c.tick_count(), 3);
    assert_eq!(sched.remaining_ms(), 1_000);
}

#[test]
fn disabled_scheduler_freezes_simulation() {
    let (mut c, _) = controller(23);
    let mut sched = Scheduler::new(c.config().tick_period_ms);
    sched.set_enabled(false);
    assert_eq!(sched.advance(60_000, &mut c), 0);
    assert_eq!(c.snapshot().level_cm, 5.2);
}

#[test]
fn host_loop_wiring() {
    let (mut c, clock) = controller(24);
    let mut sched = Scheduler::new(c.config().tick_period_ms);
    let mut hw = GpioActuators::new(SimPin::new(), SimPin::new());
    let mut console = LogEventSink::with_telemetry_every(5);
    let mut sink = RecordingSink::new();

    c.set_fault(FaultMode::GasLeak);
    for _ in 0..80 {
        clock.advance(500);
        if sched.advance(500, &mut c) > 0 {
            c.apply_actuators(&mut hw);
            c.publish(&mut console);
        }
    }
    assert_eq!(c.tick_count(), 20);
    assert!(c.alert_active());
    assert_eq!(hw.relay_on(), Some(false));
    assert_eq!(hw.buzzer_on(), Some(true));

    // Console sink consumed the backlog.
    c.publish(&mut sink);
    assert!(sink.logged().is_empty());
    assert_eq!(sink.telemetry().len(), 1);
}
