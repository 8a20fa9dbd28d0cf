//! Outbound application events and the read-only snapshot.
//!
//! The [`Controller`](super::service::Controller) emits [`AppEvent`]s through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them: log to the console, publish to a broker,
//! record them in a test.

use serde::{Deserialize, Serialize};

use crate::control::severity::Severity;
use crate::event_log::LogEntry;
use crate::fault::FaultMode;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A new entry was appended to the event log.
    Logged(LogEntry),

    /// Periodic telemetry sample.
    Telemetry(TelemetryPayload),
}

/// The reading as published on every tick: `{"level":5.2,"gas":320}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetryPayload {
    /// Level in cm, rounded to two decimals.
    pub level: f64,
    pub gas: i32,
}

impl TelemetryPayload {
    pub fn new(level_cm: f64, gas: i32) -> Self {
        Self {
            level: (level_cm * 100.0).round() / 100.0,
            gas,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// A point-in-time view of all controller state, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub level_cm: f64,
    pub gas: i32,
    pub relay_on: bool,
    pub buzzer_on: bool,
    /// Alert as reported to the operator; always `false` in manual mode.
    pub alert_active: bool,
    /// Raw threshold condition, visible even while manual mode masks it.
    pub thresholds_exceeded: bool,
    pub manual_mode: bool,
    pub manual_relay: bool,
    pub fault: FaultMode,
    pub level_severity: Severity,
    pub gas_severity: Severity,
    pub tick_count: u64,
    /// Oldest first.
    pub log: Vec<LogEntry>,
}

impl Snapshot {
    pub fn telemetry(&self) -> TelemetryPayload {
        TelemetryPayload::new(self.level_cm, self.gas)
    }
}
