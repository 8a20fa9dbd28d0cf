//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                      |
//! |------------|---------------|----------------------------------|
//! | `gpio`     | ActuatorPort  | relay + buzzer `OutputPin`s      |
//! | `log_sink` | EventSink     | `log` facade (console)           |
//! | `time`     | TimePort      | `std::time::Instant`             |

pub mod gpio;
pub mod log_sink;
pub mod time;
