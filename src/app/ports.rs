//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (actuators, clocks, event sinks) implement these traits.
//! The [`Controller`](super::service::Controller) consumes them via generics,
//! so the domain core never touches pins, wall clocks or consoles directly.

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Energise (`true`) or release the pump relay.
    fn set_relay(&mut self, on: bool);

    /// Sound (`true`) or silence the alarm buzzer.
    fn set_buzzer(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Time port (driven adapter: system clock → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic time source used to stamp log entries.
pub trait TimePort {
    /// Milliseconds since start-up. Must never go backwards.
    fn uptime_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port. Adapters
/// decide where they go (console, a message broker, a test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the controller)
// ───────────────────────────────────────────────────────────────

/// Callback the [`Scheduler`](crate::scheduler::Scheduler) invokes once per
/// elapsed tick period.
pub trait SchedulerDelegate {
    fn on_tick(&mut self);
}
