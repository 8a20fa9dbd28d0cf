//! Fixed-period tick scheduler.
//!
//! Converts elapsed wall time into whole control ticks. The scheduler
//! notifies a [`SchedulerDelegate`] once per elapsed period; the main loop
//! hands it the [`Controller`](crate::app::service::Controller), while tests
//! hand it a recorder or skip the scheduler and call `tick()` directly.
//!
//! ```text
//!   elapsed ms ──▶ ┌───────────┐  on_tick() × n  ┌────────────────────┐
//!                  │ Scheduler │ ──────────────▶ │ SchedulerDelegate  │
//!                  └───────────┘                 └────────────────────┘
//! ```
//!
//! Time that does not add up to a whole period is carried over, so a loop
//! that polls at an irregular rate still produces one tick per period on
//! average.

use crate::app::ports::SchedulerDelegate;
use log::info;

/// The scheduler engine.
///
/// Decoupled from the controller: when a period elapses it invokes the
/// [`SchedulerDelegate`] callback rather than calling the controller directly.
#[derive(Debug)]
pub struct Scheduler {
    period_ms: u64,
    /// Elapsed time not yet converted into ticks.
    pending_ms: u64,
    enabled: bool,
    fired: u64,
}

impl Scheduler {
    /// A zero period is treated as 1 ms.
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: u64::from(period_ms.max(1)),
            pending_ms: 0,
            enabled: true,
            fired: 0,
        }
    }

    /// Enable or disable the scheduler. Disabling drops any partially
    /// elapsed period, so re-enabling starts a fresh period.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            info!("Scheduler: {}", if enabled { "enabled" } else { "disabled" });
        }
        self.enabled = enabled;
        if !enabled {
            self.pending_ms = 0;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Milliseconds until the next tick is due.
    pub fn remaining_ms(&self) -> u64 {
        self.period_ms - self.pending_ms
    }

    /// Total ticks fired since construction.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Account for `elapsed_ms` of wall time and fire every period that
    /// completed. Returns the number of ticks fired by this call.
    pub fn advance(&mut self, elapsed_ms: u64, delegate: &mut dyn SchedulerDelegate) -> u32 {
        if !self.enabled {
            return 0;
        }

        self.pending_ms = self.pending_ms.saturating_add(elapsed_ms);
        let mut fired = 0u32;
        while self.pending_ms >= self.period_ms {
            self.pending_ms -= self.period_ms;
            delegate.on_tick();
            fired += 1;
        }
        if fired > 1 {
            info!("Scheduler: caught up {} ticks", fired);
        }
        self.fired += u64::from(fired);
        fired
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
