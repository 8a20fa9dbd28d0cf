//! Fault injector.
//!
//! Forces the sensor simulator into a biased drift regime so the alert path
//! can be exercised without waiting for the random walk. Exactly one mode is
//! active at a time and it persists until explicitly changed.
//!
//! ## Transitions
//!
//! ```text
//!            set(Overflow)                 set(GasLeak)
//!   None ───────────────────▶ Overflow ──────────────────▶ GasLeak
//!    ▲                            │                           │
//!    └────────── set(None) ───────┴──────── set(None) ────────┘
//! ```
//!
//! Any mode may be requested from any state. Requesting the current mode is
//! a no-op and reports no transition.

use core::fmt;

use log::info;
use serde::{Deserialize, Serialize};

/// Injected fault condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FaultMode {
    #[default]
    None,
    /// Sewage level climbs every tick.
    Overflow,
    /// Gas concentration climbs every tick.
    GasLeak,
}

impl fmt::Display for FaultMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Overflow => write!(f, "sewage overflow"),
            Self::GasLeak => write!(f, "gas leakage"),
        }
    }
}

/// What a call to [`FaultInjector::set`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultTransition {
    /// A fault mode was entered (from `None` or from the other fault).
    Injected(FaultMode),
    /// A fault mode was left for `None`.
    Cleared(FaultMode),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FaultInjector {
    mode: FaultMode,
}

impl FaultInjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FaultMode {
        self.mode
    }

    /// Request `mode`. Returns the transition taken, or `None` when the mode
    /// was already active.
    pub fn set(&mut self, mode: FaultMode) -> Option<FaultTransition> {
        let prev = self.mode;
        if prev == mode {
            return None;
        }
        self.mode = mode;

        let transition = match mode {
            FaultMode::None => FaultTransition::Cleared(prev),
            injected => FaultTransition::Injected(injected),
        };
        info!("fault: {} -> {} ({:?})", prev, mode, transition);
        Some(transition)
    }
}
