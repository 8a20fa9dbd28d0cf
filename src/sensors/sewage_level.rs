//! Simulated ultrasonic sewage level sensor.
//!
//! With no fault injected the level performs a bounded random walk with a
//! slight downward bias, so it never reaches the alert band on its own.
//! During an injected overflow every step is strictly upward.

use rand::Rng;

use crate::config::Bounds;

/// Smallest rise per tick during an overflow (cm).
const OVERFLOW_STEP_MIN_CM: f64 = 0.25;
/// Random extra rise per tick during an overflow (cm).
const OVERFLOW_STEP_SPAN_CM: f64 = 0.45;
/// Centre of the random walk; above 0.5 biases the level downward.
const WALK_BIAS: f64 = 0.52;
/// Random walk step gain (cm).
const WALK_GAIN_CM: f64 = 0.55;

#[derive(Debug, Clone, Copy)]
pub struct LevelModel {
    normal: Bounds<f64>,
    overflow: Bounds<f64>,
}

impl LevelModel {
    pub fn new(normal: Bounds<f64>, overflow: Bounds<f64>) -> Self {
        Self { normal, overflow }
    }

    /// Next level (cm) from the previous one.
    pub fn step(&self, prev_cm: f64, overflowing: bool, rng: &mut impl Rng) -> f64 {
        let u: f64 = rng.random();
        if overflowing {
            self.overflow
                .clamp(prev_cm + OVERFLOW_STEP_MIN_CM + u * OVERFLOW_STEP_SPAN_CM)
        } else {
            self.normal.clamp(prev_cm + (u - WALK_BIAS) * WALK_GAIN_CM)
        }
    }
}
