//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events through the `log`
//! facade (stderr via `env_logger` in the host binary). A broker or
//! dashboard adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::event_log::LogCategory;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Debug)]
pub struct LogEventSink {
    /// Telemetry is logged every `telemetry_every` samples (1 = every one).
    telemetry_every: u32,
    telemetry_seen: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::with_telemetry_every(1)
    }

    pub fn with_telemetry_every(n: u32) -> Self {
        Self {
            telemetry_every: n.max(1),
            telemetry_seen: 0,
        }
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Logged(entry) => match entry.category {
                LogCategory::Alert => {
                    warn!("EVENT | t={}ms | {}", entry.timestamp_ms, entry.message);
                }
                LogCategory::Info | LogCategory::Manual => {
                    info!(
                        "EVENT | t={}ms | {:?} | {}",
                        entry.timestamp_ms, entry.category, entry.message
                    );
                }
            },
            AppEvent::Telemetry(t) => {
                self.telemetry_seen = self.telemetry_seen.wrapping_add(1);
                if self.telemetry_seen % self.telemetry_every != 0 {
                    return;
                }
                match t.to_json() {
                    Ok(json) => info!("TELEM | {}", json),
                    Err(e) => warn!("TELEM | encode failed: {}", e),
                }
            }
        }
    }
}
