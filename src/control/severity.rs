//! Per-channel reading classification.
//!
//! Gives the presentation layer a three-step scale per sensor. `Danger`
//! uses exactly the comparison the alert uses, so a channel reported as
//! `Danger` always means the thresholds are exceeded.

use serde::{Deserialize, Serialize};

use super::Limits;

/// Level warning band starts at this fraction of the level limit.
const LEVEL_WARNING_FRACTION: f64 = 0.8;
/// Gas warning band starts at this fraction of the gas limit.
const GAS_WARNING_FRACTION: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Normal,
    Warning,
    Danger,
}

pub fn classify_level(level_cm: f64, limits: &Limits) -> Severity {
    if level_cm >= limits.level_cm {
        Severity::Danger
    } else if level_cm >= limits.level_cm * LEVEL_WARNING_FRACTION {
        Severity::Warning
    } else {
        Severity::Normal
    }
}

pub fn classify_gas(gas: i32, limits: &Limits) -> Severity {
    if gas > limits.gas {
        Severity::Danger
    } else if f64::from(gas) >= f64::from(limits.gas) * GAS_WARNING_FRACTION {
        Severity::Warning
    } else {
        Severity::Normal
    }
}
