//! System configuration parameters
//!
//! All tunable parameters for the monitor: alert thresholds, simulation
//! bounds, the initial reading and the control tick period.
//! Values can be replaced at construction time from a JSON document.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Event log ring capacity (entries). Sizes the fixed ring buffer.
pub const LOG_CAPACITY: usize = 60;

/// Full-scale value of the gas ADC.
pub const GAS_ADC_MAX: i32 = 1023;

/// Inclusive clamp range for one simulated channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: Copy + PartialOrd> Bounds<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into `[min, max]`.
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Thresholds ---
    /// Sewage level (cm) at or above which the alert fires
    pub level_limit_cm: f64,
    /// Gas ADC reading above which the alert fires
    pub gas_limit: i32,

    // --- Simulation bounds ---
    /// Level random-walk range with no fault injected (cm)
    pub level_normal: Bounds<f64>,
    /// Level range while an overflow is injected (cm)
    pub level_overflow: Bounds<f64>,
    /// Gas random-walk range with no fault injected
    pub gas_normal: Bounds<i32>,
    /// Gas range while a leak is injected
    pub gas_leak: Bounds<i32>,

    // --- Start-up state ---
    pub initial_level_cm: f64,
    pub initial_gas: i32,
    /// Relay state remembered for manual mode before the operator picks one
    pub initial_manual_relay: bool,

    // --- Timing ---
    /// Sensor read / control tick interval (milliseconds)
    pub tick_period_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Thresholds
            level_limit_cm: 10.0,
            gas_limit: 600,

            // Simulation bounds
            level_normal: Bounds::new(1.2, 9.4),
            level_overflow: Bounds::new(0.0, 24.0),
            gas_normal: Bounds::new(90, 575),
            gas_leak: Bounds::new(0, GAS_ADC_MAX),

            // Start-up state
            initial_level_cm: 5.2,
            initial_gas: 320,
            initial_manual_relay: true,

            // Timing
            tick_period_ms: 2000, // 0.5 Hz
        }
    }
}

impl SystemConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            log::warn!("config parse failed: {}", e);
            ConfigError::Corrupted
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the reading invariants
    /// (`level >= 0`, `0 <= gas <= 1023`) or stall the tick loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.level_limit_cm.is_finite() || self.level_limit_cm <= 0.0 {
            return Err(ConfigError::ValidationFailed("level_limit_cm must be positive"));
        }
        if !(0..=GAS_ADC_MAX).contains(&self.gas_limit) {
            return Err(ConfigError::ValidationFailed("gas_limit outside ADC range"));
        }
        for level in [self.level_normal, self.level_overflow] {
            if !level.min.is_finite() || !level.max.is_finite() {
                return Err(ConfigError::ValidationFailed("level bounds must be finite"));
            }
            if level.min < 0.0 {
                return Err(ConfigError::ValidationFailed("level bounds below zero"));
            }
            if level.min > level.max {
                return Err(ConfigError::ValidationFailed("level bounds inverted"));
            }
        }
        for gas in [self.gas_normal, self.gas_leak] {
            if gas.min > gas.max {
                return Err(ConfigError::ValidationFailed("gas bounds inverted"));
            }
            if gas.min < 0 || gas.max > GAS_ADC_MAX {
                return Err(ConfigError::ValidationFailed("gas bounds outside ADC range"));
            }
        }
        if !self.initial_level_cm.is_finite() || !self.level_normal.contains(self.initial_level_cm)
        {
            return Err(ConfigError::ValidationFailed("initial level outside normal bounds"));
        }
        if !self.gas_normal.contains(self.initial_gas) {
            return Err(ConfigError::ValidationFailed("initial gas outside normal bounds"));
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_period_ms must be non-zero"));
        }
        Ok(())
    }
}
