//! GPIO actuator adapter.
//!
//! Drives the pump relay and the alarm buzzer through two
//! [`embedded_hal::digital::OutputPin`]s, exposing them through
//! [`ActuatorPort`]. Only pin *changes* are written, so calling
//! [`Controller::apply_actuators`](crate::app::service::Controller::apply_actuators)
//! every loop iteration does not toggle hardware.
//!
//! A failed pin write is logged and counted; the control loop keeps running
//! and the write is retried on the next apply.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, PinState};
use log::{info, warn};

use crate::app::ports::ActuatorPort;
use crate::error::ActuatorError;

/// Relay + buzzer on two output pins.
pub struct GpioActuators<R, B> {
    relay: R,
    buzzer: B,
    /// Last successfully written levels; `None` before the first write.
    relay_on: Option<bool>,
    buzzer_on: Option<bool>,
    write_failures: u32,
}

impl<R: OutputPin, B: OutputPin> GpioActuators<R, B> {
    pub fn new(relay: R, buzzer: B) -> Self {
        Self {
            relay,
            buzzer,
            relay_on: None,
            buzzer_on: None,
            write_failures: 0,
        }
    }

    pub fn relay_on(&self) -> Option<bool> {
        self.relay_on
    }

    pub fn buzzer_on(&self) -> Option<bool> {
        self.buzzer_on
    }

    /// Pin writes that failed since construction.
    pub fn write_failures(&self) -> u32 {
        self.write_failures
    }

    pub fn into_pins(self) -> (R, B) {
        (self.relay, self.buzzer)
    }
}

fn drive<P: OutputPin>(pin: &mut P, on: bool) -> Result<(), ActuatorError> {
    pin.set_state(PinState::from(on))
        .map_err(|_| ActuatorError::GpioWriteFailed)
}

impl<R: OutputPin, B: OutputPin> ActuatorPort for GpioActuators<R, B> {
    fn set_relay(&mut self, on: bool) {
        if self.relay_on == Some(on) {
            return;
        }
        match drive(&mut self.relay, on) {
            Ok(()) => {
                info!("Relay (pump) -> {}", if on { "ON" } else { "OFF" });
                self.relay_on = Some(on);
            }
            Err(e) => {
                warn!("Relay write failed: {}", e);
                self.write_failures = self.write_failures.saturating_add(1);
            }
        }
    }

    fn set_buzzer(&mut self, on: bool) {
        if self.buzzer_on == Some(on) {
            return;
        }
        match drive(&mut self.buzzer, on) {
            Ok(()) => {
                info!("Buzzer -> {}", if on { "ON" } else { "OFF" });
                self.buzzer_on = Some(on);
            }
            Err(e) => {
                warn!("Buzzer write failed: {}", e);
                self.write_failures = self.write_failures.saturating_add(1);
            }
        }
    }
}

// ── In-memory pin ─────────────────────────────────────────────

/// Output pin that only records its level. Stands in for a real GPIO on the
/// host.
#[derive(Debug, Default)]
pub struct SimPin {
    high: bool,
    writes: u32,
}

impl SimPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    /// Number of level writes, including redundant ones.
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}
