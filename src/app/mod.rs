//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the monitor: the controller
//! that ties the sensor simulator, fault injector, control law and event
//! log together. All interaction with actuators, clocks and consoles happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
