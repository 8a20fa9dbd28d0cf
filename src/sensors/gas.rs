//! Simulated MQ-series gas sensor behind a 10-bit ADC.
//!
//! Readings are whole ADC counts. The unbiased random walk stays inside the
//! normal band; an injected leak adds a strictly positive step each tick.

use rand::Rng;

use crate::config::Bounds;

/// Smallest rise per tick during a leak (ADC counts).
const LEAK_STEP_MIN: f64 = 25.0;
/// Random extra rise per tick during a leak (ADC counts).
const LEAK_STEP_SPAN: f64 = 45.0;
/// Random walk step gain (ADC counts).
const WALK_GAIN: f64 = 55.0;

#[derive(Debug, Clone, Copy)]
pub struct GasModel {
    normal: Bounds<i32>,
    leak: Bounds<i32>,
}

impl GasModel {
    pub fn new(normal: Bounds<i32>, leak: Bounds<i32>) -> Self {
        Self { normal, leak }
    }

    /// Next ADC reading from the previous one.
    pub fn step(&self, prev: i32, leaking: bool, rng: &mut impl Rng) -> i32 {
        let u: f64 = rng.random();
        let (delta, bounds) = if leaking {
            (LEAK_STEP_MIN + u * LEAK_STEP_SPAN, self.leak)
        } else {
            ((u - 0.5) * WALK_GAIN, self.normal)
        };
        // Clamp in f64 so the cast back to i32 cannot overflow.
        let raw = (f64::from(prev) + delta).round();
        raw.clamp(f64::from(bounds.min), f64::from(bounds.max)) as i32
    }
}
