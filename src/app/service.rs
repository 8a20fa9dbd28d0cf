//! Controller: the hexagonal core.
//!
//! [`Controller`] owns the current reading, the fault injector, the operator
//! override, the derived actuator state and the event log. Every mutation
//! (a tick or a command) runs to completion before the next one starts, and
//! ends with exactly one control evaluation and one edge-detection step.
//!
//! ```text
//!  Scheduler ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                │          Controller          │
//!   Command  ──▶ │ Simulator · Faults · Control │ ──▶ ActuatorPort
//!                │          Event log           │
//!                └──────────────────────────────┘
//! ```
//!
//! The random source and the clock are injected, so a controller built with
//! a seeded RNG and a manual clock is fully deterministic.

use log::{info, warn};
use rand::Rng;

use crate::config::SystemConfig;
use crate::control::severity::{classify_gas, classify_level};
use crate::control::{ActuatorState, Decision, Limits, OverrideState, decide};
use crate::error::Result;
use crate::event_log::{EventLog, LogCategory};
use crate::fault::{FaultInjector, FaultMode, FaultTransition};
use crate::sensors::{SensorReading, SensorSimulator};

use super::commands::Command;
use super::events::{AppEvent, Snapshot, TelemetryPayload};
use super::ports::{ActuatorPort, EventSink, SchedulerDelegate, TimePort};

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

/// Composition root for the monitor.
pub struct Controller<R, C> {
    config: SystemConfig,
    limits: Limits,
    simulator: SensorSimulator,
    reading: SensorReading,
    faults: FaultInjector,
    ovr: OverrideState,
    decision: Decision,
    log: EventLog,
    rng: R,
    clock: C,
    tick_count: u64,
    /// Sequence number of the first log entry not yet published.
    published_seq: u64,
}

impl<R: Rng, C: TimePort> Controller<R, C> {
    /// Validate `config` and build a controller in its start-up state.
    pub fn new(config: SystemConfig, rng: R, clock: C) -> Result<Self> {
        config.validate()?;

        let limits = Limits::from_config(&config);
        let reading = SensorReading::new(config.initial_level_cm, config.initial_gas);
        let ovr = OverrideState {
            manual_mode: false,
            manual_relay: config.initial_manual_relay,
        };

        let mut controller = Self {
            simulator: SensorSimulator::new(&config),
            limits,
            reading,
            faults: FaultInjector::new(),
            ovr,
            // Placeholder: nothing has been evaluated yet, so an alert that is
            // already present at start-up counts as a rising edge.
            decision: Decision {
                actuators: ActuatorState::default(),
                alert_active: false,
                thresholds_exceeded: false,
            },
            log: EventLog::new(),
            rng,
            clock,
            tick_count: 0,
            published_seq: 0,
            config,
        };
        controller.reevaluate();

        info!(
            "Controller started: level={:.1}cm gas={} limits=({}cm, {}) period={}ms",
            controller.reading.level_cm,
            controller.reading.gas,
            controller.limits.level_cm,
            controller.limits.gas,
            controller.config.tick_period_ms
        );
        Ok(controller)
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Advance simulated time by one period: new reading → control → log.
    pub fn tick(&mut self) {
        self.tick_count += 1;
        self.reading =
            self.simulator
                .next_reading(self.reading, self.faults.mode(), &mut self.rng);
        log::debug!(
            "tick {}: level={:.2}cm gas={} fault={:?}",
            self.tick_count,
            self.reading.level_cm,
            self.reading.gas,
            self.faults.mode()
        );
        self.reevaluate();
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply an external command.
    pub fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::SetFault(mode) => self.set_fault(mode),
            Command::SetManualMode(enabled) => self.set_manual_mode(enabled),
            Command::SetManualRelay(on) => self.set_manual_relay(on),
        }
    }

    pub fn set_fault(&mut self, mode: FaultMode) {
        match self.faults.set(mode) {
            Some(FaultTransition::Injected(FaultMode::Overflow)) => self.record(
                LogCategory::Alert,
                format_args!("FAULT INJECTED: simulated sewage overflow"),
            ),
            Some(FaultTransition::Injected(FaultMode::GasLeak)) => self.record(
                LogCategory::Alert,
                format_args!("FAULT INJECTED: simulated gas leakage"),
            ),
            Some(FaultTransition::Cleared(_)) => self.record(
                LogCategory::Info,
                format_args!("Fault cleared, returning to normal"),
            ),
            // Injecting `None` is reported as `Cleared`.
            Some(FaultTransition::Injected(FaultMode::None)) | None => {}
        }
        self.reevaluate();
    }

    pub fn set_manual_mode(&mut self, enabled: bool) {
        if self.ovr.manual_mode != enabled {
            self.ovr.manual_mode = enabled;
            if enabled {
                info!("Manual override enabled (relay={})", self.ovr.manual_relay);
                self.record(
                    LogCategory::Manual,
                    format_args!("Manual override ENABLED, auto logic suspended"),
                );
            } else {
                info!("Manual override disabled");
                self.record(
                    LogCategory::Info,
                    format_args!("Manual override DISABLED, returning to AUTO"),
                );
            }
        }
        self.reevaluate();
    }

    /// Set the relay state used under manual mode. The choice is remembered
    /// while manual mode is off but only logged while it is on.
    pub fn set_manual_relay(&mut self, on: bool) {
        if self.ovr.manual_relay != on {
            self.ovr.manual_relay = on;
            if self.ovr.manual_mode {
                info!("Manual relay -> {}", on_off(on));
                self.record(
                    LogCategory::Manual,
                    format_args!("Manual relay -> {}", on_off(on)),
                );
            }
        }
        self.reevaluate();
    }

    // ── Queries ───────────────────────────────────────────────

    /// Read-only view of all current state and the full log.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            level_cm: self.reading.level_cm,
            gas: self.reading.gas,
            relay_on: self.decision.actuators.relay_on,
            buzzer_on: self.decision.actuators.buzzer_on,
            alert_active: self.decision.alert_active,
            thresholds_exceeded: self.decision.thresholds_exceeded,
            manual_mode: self.ovr.manual_mode,
            manual_relay: self.ovr.manual_relay,
            fault: self.faults.mode(),
            level_severity: classify_level(self.reading.level_cm, &self.limits),
            gas_severity: classify_gas(self.reading.gas, &self.limits),
            tick_count: self.tick_count,
            log: self.log.to_vec(),
        }
    }

    pub fn reading(&self) -> SensorReading {
        self.reading
    }

    pub fn fault(&self) -> FaultMode {
        self.faults.mode()
    }

    pub fn override_state(&self) -> OverrideState {
        self.ovr
    }

    pub fn actuators(&self) -> ActuatorState {
        self.decision.actuators
    }

    pub fn alert_active(&self) -> bool {
        self.decision.alert_active
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Ticks executed since start-up.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Outputs ───────────────────────────────────────────────

    /// Drive the actuators to the current decision.
    pub fn apply_actuators(&self, hw: &mut impl ActuatorPort) {
        let act = self.decision.actuators;
        hw.set_relay(act.relay_on);
        hw.set_buzzer(act.buzzer_on);
    }

    /// Emit every log entry appended since the previous call, then one
    /// telemetry sample. Entries evicted before being published are skipped.
    pub fn publish(&mut self, sink: &mut impl EventSink) {
        for entry in self.log.since(self.published_seq) {
            sink.emit(&AppEvent::Logged(entry.clone()));
        }
        self.published_seq = self.log.next_seq();
        sink.emit(&AppEvent::Telemetry(TelemetryPayload::new(
            self.reading.level_cm,
            self.reading.gas,
        )));
    }

    // ── Internal ──────────────────────────────────────────────

    /// Recompute actuators and alert, logging only the automatic alert's
    /// rising edge.
    fn reevaluate(&mut self) {
        let prev = self.decision;
        let next = decide(&self.reading, &self.ovr, &self.limits);
        self.decision = next;

        if next.alert_active && !prev.alert_active {
            warn!(
                "ALERT: level={:.1}cm gas={} (limits {}cm / {})",
                self.reading.level_cm, self.reading.gas, self.limits.level_cm, self.limits.gas
            );
            let (level, gas) = (self.reading.level_cm, self.reading.gas);
            self.record(
                LogCategory::Alert,
                format_args!("OVERFLOW / GAS DETECTED: level={:.1}cm gas={}", level, gas),
            );
        } else if prev.alert_active && !next.alert_active {
            info!("Alert condition cleared");
        }
    }

    fn record(&mut self, category: LogCategory, message: core::fmt::Arguments<'_>) {
        let now = self.clock.uptime_ms();
        self.log.append(now, category, message);
    }
}

impl<R: Rng, C: TimePort> SchedulerDelegate for Controller<R, C> {
    fn on_tick(&mut self) {
        self.tick();
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}
