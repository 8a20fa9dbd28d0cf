//! End-to-end controller scenarios against mock adapters.

use sewage_monitor::app::commands::Command;
use sewage_monitor::app::events::AppEvent;
use sewage_monitor::config::{LOG_CAPACITY, SystemConfig};
use sewage_monitor::control::severity::Severity;
use sewage_monitor::event_log::LogCategory;
use sewage_monitor::fault::FaultMode;

use crate::mock_hw::{MockHardware, RecordingSink, TestController, controller, controller_with};

const DETECTED: &str = "OVERFLOW / GAS DETECTED";
const MAX_TICKS: usize = 200;

fn detections(c: &TestController) -> usize {
    c.log()
        .iter()
        .filter(|e| e.message.starts_with(DETECTED))
        .count()
}

fn messages(c: &TestController) -> Vec<String> {
    c.log().iter().map(|e| e.message.as_str().to_owned()).collect()
}

/// Tick until `done` holds, failing the test after `MAX_TICKS`.
fn tick_until(c: &mut TestController, done: impl Fn(&TestController) -> bool) {
    for _ in 0..MAX_TICKS {
        if done(&*c) {
            return;
        }
        c.tick();
    }
    assert!(done(&*c), "condition not reached within {} ticks", MAX_TICKS);
}

// ── Scenarios ─────────────────────────────────────────────────

#[test]
fn quiet_start_runs_pump_without_alarm() {
    let (c, _) = controller(1);
    let s = c.snapshot();
    assert_eq!((s.level_cm, s.gas), (5.2, 320));
    assert!(s.relay_on);
    assert!(!s.buzzer_on);
    assert!(!s.alert_active);
    assert_eq!(s.level_severity, Severity::Normal);
    assert_eq!(s.gas_severity, Severity::Normal);
}

#[test]
fn overflow_fault_raises_one_alert() {
    let (mut c, _) = controller(2);
    c.set_fault(FaultMode::Overflow);
    tick_until(&mut c, |c| c.reading().level_cm >= 10.0);

    let s = c.snapshot();
    assert!(!s.relay_on);
    assert!(s.buzzer_on);
    assert!(s.alert_active);
    assert_eq!(s.level_severity, Severity::Danger);
    assert_eq!(detections(&c), 1);

    let alert = c
        .log()
        .iter()
        .find(|e| e.message.starts_with(DETECTED))
        .unwrap();
    assert_eq!(alert.category, LogCategory::Alert);
}

#[test]
fn alert_is_not_repeated_while_it_persists() {
    let (mut c, _) = controller(3);
    c.set_fault(FaultMode::Overflow);
    tick_until(&mut c, |c| c.alert_active());
    for _ in 0..50 {
        c.tick();
        assert!(c.alert_active());
    }
    assert_eq!(detections(&c), 1);
    assert!(c.reading().level_cm <= c.config().level_overflow.max);
}

#[test]
fn manual_mode_masks_breached_threshold() {
    let (mut c, _) = controller(4);
    c.set_fault(FaultMode::Overflow);
    tick_until(&mut c, |c| c.reading().level_cm >= 10.0);

    c.set_manual_mode(true);
    let s = c.snapshot();
    assert!(s.relay_on, "manual relay defaults to on");
    assert!(!s.buzzer_on);
    assert!(!s.alert_active);
    assert!(s.thresholds_exceeded);
    assert!(s.level_cm >= 10.0);
}

#[test]
fn gas_leak_alerts_with_normal_level() {
    let (mut c, _) = controller(5);
    c.set_fault(FaultMode::GasLeak);
    tick_until(&mut c, |c| c.reading().gas > 600);

    let s = c.snapshot();
    assert!(s.level_cm < 10.0);
    assert!(s.alert_active);
    assert!(s.buzzer_on);
    assert!(!s.relay_on);
    assert_eq!(s.gas_severity, Severity::Danger);
    assert_eq!(detections(&c), 1);
}

#[test]
fn log_keeps_most_recent_entries() {
    let (mut c, _) = controller(6);
    for i in 0..65 {
        c.set_manual_mode(i % 2 == 0);
    }
    assert_eq!(c.log().len(), LOG_CAPACITY);

    let seqs: Vec<u64> = c.log().iter().map(|e| e.seq).collect();
    let expected: Vec<u64> = (5..65).collect();
    assert_eq!(seqs, expected);

    // Entry 64 is the 65th toggle: manual mode switched on.
    let last = c.log().iter().last().unwrap();
    assert_eq!(last.category, LogCategory::Manual);
    assert_eq!(last.message.as_str(), "Manual override ENABLED, auto logic suspended");
}

// ── Fault injector ────────────────────────────────────────────

#[test]
fn fault_inject_and_clear_log_once_each() {
    let (mut c, _) = controller(7);
    c.set_fault(FaultMode::Overflow);
    c.set_fault(FaultMode::Overflow);
    c.handle_command(Command::SetFault(FaultMode::Overflow));
    c.set_fault(FaultMode::None);
    c.set_fault(FaultMode::None);

    assert_eq!(
        messages(&c),
        [
            "FAULT INJECTED: simulated sewage overflow",
            "Fault cleared, returning to normal",
        ]
    );
    let categories: Vec<LogCategory> = c.log().iter().map(|e| e.category).collect();
    assert_eq!(categories, [LogCategory::Alert, LogCategory::Info]);
}

#[test]
fn switching_faults_logs_injection_without_clear() {
    let (mut c, _) = controller(8);
    c.set_fault(FaultMode::Overflow);
    c.set_fault(FaultMode::GasLeak);
    assert_eq!(
        messages(&c),
        [
            "FAULT INJECTED: simulated sewage overflow",
            "FAULT INJECTED: simulated gas leakage",
        ]
    );
    assert_eq!(c.fault(), FaultMode::GasLeak);
}

#[test]
fn clearing_overflow_returns_level_to_normal_range() {
    let (mut c, _) = controller(9);
    c.set_fault(FaultMode::Overflow);
    tick_until(&mut c, |c| c.reading().level_cm >= 12.0);

    c.set_fault(FaultMode::None);
    c.tick();
    let normal = c.config().level_normal;
    assert!(normal.contains(c.reading().level_cm));
    assert!(!c.alert_active());

    // A fresh breach is a new rising edge.
    c.set_fault(FaultMode::Overflow);
    tick_until(&mut c, |c| c.alert_active());
    assert_eq!(detections(&c), 2);
}

// ── Manual override ───────────────────────────────────────────

#[test]
fn manual_mode_holds_relay_and_silences_buzzer() {
    let (mut c, _) = controller(10);
    c.set_manual_mode(true);
    c.set_manual_relay(false);
    c.set_fault(FaultMode::GasLeak);

    for _ in 0..40 {
        c.tick();
        let s = c.snapshot();
        assert!(!s.relay_on);
        assert!(!s.buzzer_on);
        assert!(!s.alert_active);
    }
    assert!(c.snapshot().thresholds_exceeded);
    assert_eq!(detections(&c), 0);
}

#[test]
fn leaving_manual_mode_reports_pending_breach() {
    let (mut c, _) = controller(11);
    c.set_manual_mode(true);
    c.set_fault(FaultMode::Overflow);
    tick_until(&mut c, |c| c.snapshot().thresholds_exceeded);
    assert_eq!(detections(&c), 0);

    c.set_manual_mode(false);
    assert!(c.alert_active());
    assert_eq!(detections(&c), 1);
}

#[test]
fn manual_relay_is_logged_only_in_manual_mode() {
    let (mut c, _) = controller(12);
    c.handle_command(Command::SetManualRelay(false));
    assert!(c.log().is_empty());

    c.handle_command(Command::SetManualMode(true));
    c.handle_command(Command::SetManualRelay(true));
    c.handle_command(Command::SetManualRelay(true));
    c.handle_command(Command::SetManualMode(false));

    assert_eq!(
        messages(&c),
        [
            "Manual override ENABLED, auto logic suspended",
            "Manual relay -> ON",
            "Manual override DISABLED, returning to AUTO",
        ]
    );
    let categories: Vec<LogCategory> = c.log().iter().map(|e| e.category).collect();
    assert_eq!(
        categories,
        [LogCategory::Manual, LogCategory::Manual, LogCategory::Info]
    );
}

#[test]
fn parsed_console_commands_drive_controller() {
    let (mut c, _) = controller(13);
    for line in ["manual on", "relay off", "fault gas"] {
        c.handle_command(line.parse().unwrap());
    }
    let s = c.snapshot();
    assert!(s.manual_mode);
    assert!(!s.manual_relay);
    assert_eq!(s.fault, FaultMode::GasLeak);
}

// ── Outputs ───────────────────────────────────────────────────

#[test]
fn actuators_follow_decision() {
    let (mut c, _) = controller(14);
    let mut hw = MockHardware::new();

    c.apply_actuators(&mut hw);
    assert_eq!(hw.relay_on(), Some(true));
    assert_eq!(hw.buzzer_on(), Some(false));

    c.set_fault(FaultMode::GasLeak);
    tick_until(&mut c, |c| c.alert_active());
    c.apply_actuators(&mut hw);
    assert_eq!(hw.relay_on(), Some(false));
    assert_eq!(hw.buzzer_on(), Some(true));
}

#[test]
fn publish_emits_new_entries_then_telemetry() {
    let (mut c, clock) = controller(15);
    let mut sink = RecordingSink::new();

    clock.advance(1_500);
    c.set_manual_mode(true);
    clock.advance(500);
    c.set_manual_relay(false);
    c.publish(&mut sink);

    assert_eq!(sink.events.len(), 3);
    assert!(matches!(sink.events.last(), Some(AppEvent::Telemetry(_))));
    let stamps: Vec<u64> = sink.logged().iter().map(|e| e.timestamp_ms).collect();
    assert_eq!(stamps, [1_500, 2_000]);

    // Nothing new: telemetry only.
    c.publish(&mut sink);
    assert_eq!(sink.events.len(), 4);
    assert_eq!(sink.logged().len(), 2);

    let t = sink.telemetry();
    assert_eq!(t.len(), 2);
    assert_eq!(t[1], c.snapshot().telemetry());
}

#[test]
fn publish_skips_entries_evicted_before_publishing() {
    let (mut c, _) = controller(16);
    let mut sink = RecordingSink::new();
    for i in 0..(LOG_CAPACITY + 10) {
        c.set_manual_mode(i % 2 == 0);
    }
    c.publish(&mut sink);
    assert_eq!(sink.logged().len(), LOG_CAPACITY);
    assert_eq!(sink.logged()[0].seq, 10);
}

#[test]
fn same_seed_gives_same_run() {
    let run = |seed| {
        let (mut c, _) = controller(seed);
        c.set_fault(FaultMode::GasLeak);
        (0..30)
            .map(|_| {
                c.tick();
                (c.reading().level_cm, c.reading().gas)
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(99), run(99));
}

#[test]
fn independent_controllers_do_not_share_state() {
    let (mut a, _) = controller(17);
    let (b, _) = controller(17);
    a.set_fault(FaultMode::Overflow);
    a.set_manual_mode(true);
    assert_eq!(b.fault(), FaultMode::None);
    assert!(!b.override_state().manual_mode);
    assert!(b.log().is_empty());
}

#[test]
fn custom_limits_are_honoured() {
    let config = SystemConfig {
        gas_limit: 400,
        ..SystemConfig::default()
    };
    let (mut c, _) = controller_with(config, 18);
    c.set_fault(FaultMode::GasLeak);
    tick_until(&mut c, |c| c.reading().gas > 400);
    assert!(c.alert_active());
}
