//! Application core — monitor registry and per-tick orchestration, zero I/O.
//!
//! All interaction with the PMIC and the host happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod events;
pub mod ports;
pub mod service;
