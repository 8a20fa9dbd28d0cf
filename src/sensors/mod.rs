//! Sensor simulation: per-channel models and the aggregating
//! [`SensorSimulator`].
//!
//! The simulator owns both channel models and produces a [`SensorReading`]
//! each tick from the previous reading and the active [`FaultMode`].
//! Randomness is always injected by the caller, so a seeded generator gives
//! a reproducible trace.

pub mod gas;
pub mod sewage_level;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SystemConfig;
use crate::fault::FaultMode;
use gas::GasModel;
use sewage_level::LevelModel;

/// A point-in-time reading of both sensors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Sewage level above the sensor datum (cm), never negative.
    pub level_cm: f64,
    /// Gas concentration in raw ADC counts (0 – 1023).
    pub gas: i32,
}

impl SensorReading {
    pub const fn new(level_cm: f64, gas: i32) -> Self {
        Self { level_cm, gas }
    }
}

/// Aggregates both channel models and produces a unified reading.
#[derive(Debug, Clone, Copy)]
pub struct SensorSimulator {
    level: LevelModel,
    gas: GasModel,
}

impl SensorSimulator {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            level: LevelModel::new(config.level_normal, config.level_overflow),
            gas: GasModel::new(config.gas_normal, config.gas_leak),
        }
    }

    /// Produce the next reading.
    ///
    /// `Overflow` only biases the level channel and `GasLeak` only the gas
    /// channel; the other channel keeps its normal random walk.
    pub fn next_reading(
        &self,
        prev: SensorReading,
        fault: FaultMode,
        rng: &mut impl Rng,
    ) -> SensorReading {
        let level_cm = self
            .level
            .step(prev.level_cm, fault == FaultMode::Overflow, rng);
        let gas = self.gas.step(prev.gas, fault == FaultMode::GasLeak, rng);
        SensorReading { level_cm, gas }
    }
}
