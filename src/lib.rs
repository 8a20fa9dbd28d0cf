//! Sewage level / gas monitor library.
//!
//! Simulates the controller of a sewer monitoring node: a periodic sensor
//! simulator, a threshold control law driving a pump relay and an alarm
//! buzzer, a manual override, fault injection and a bounded event log.
//! Everything is exposed for integration testing and for a presentation
//! layer that consumes [`app::events::Snapshot`]s.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod event_log;
pub mod fault;
pub mod scheduler;
pub mod sensors;

pub mod adapters;
