//! Control logic: maps a reading and the operator override to actuator
//! outputs.
//!
//! [`decide`] is a pure function: no state, no logging, no I/O. The
//! [`Controller`](crate::app::service::Controller) calls it after every
//! mutation and does its own edge detection on the result.
//!
//! | Mode      | relay            | buzzer  | alert_active        |
//! |-----------|------------------|---------|---------------------|
//! | Automatic | `!thresholds`    | `thresholds` | `thresholds`   |
//! | Manual    | `manual_relay`   | off     | always `false`      |

pub mod severity;

pub use severity::{Severity, classify_gas, classify_level};

use serde::{Deserialize, Serialize};

use crate::config::SystemConfig;
use crate::sensors::SensorReading;

/// Alert thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    /// Level (cm) at or above which the sewer is considered overflowing.
    pub level_cm: f64,
    /// Gas reading strictly above which the gas is considered dangerous.
    pub gas: i32,
}

impl Limits {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            level_cm: config.level_limit_cm,
            gas: config.gas_limit,
        }
    }

    pub fn level_exceeded(&self, reading: &SensorReading) -> bool {
        reading.level_cm >= self.level_cm
    }

    pub fn gas_exceeded(&self, reading: &SensorReading) -> bool {
        reading.gas > self.gas
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::from_config(&SystemConfig::default())
    }
}

/// Operator override.
///
/// `manual_relay` is sticky: it keeps its value while manual mode is off so
/// re-enabling manual mode restores the operator's last choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideState {
    pub manual_mode: bool,
    pub manual_relay: bool,
}

impl Default for OverrideState {
    fn default() -> Self {
        Self {
            manual_mode: false,
            manual_relay: true,
        }
    }
}

/// Output levels for the two actuators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActuatorState {
    /// Pump relay energised.
    pub relay_on: bool,
    /// Alarm buzzer sounding.
    pub buzzer_on: bool,
}

/// Result of one control evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub actuators: ActuatorState,
    /// Alert as reported to the operator. Always `false` in manual mode.
    pub alert_active: bool,
    /// Raw threshold condition, independent of the override.
    pub thresholds_exceeded: bool,
}

/// Evaluate the control law for one reading.
pub fn decide(reading: &SensorReading, ovr: &OverrideState, limits: &Limits) -> Decision {
    let alert = limits.level_exceeded(reading) || limits.gas_exceeded(reading);

    if ovr.manual_mode {
        Decision {
            actuators: ActuatorState {
                relay_on: ovr.manual_relay,
                buzzer_on: false,
            },
            alert_active: false,
            thresholds_exceeded: alert,
        }
    } else {
        Decision {
            actuators: ActuatorState {
                relay_on: !alert,
                buzzer_on: alert,
            },
            alert_active: alert,
            thresholds_exceeded: alert,
        }
    }
}
