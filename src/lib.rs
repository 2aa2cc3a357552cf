//! AXP192 power monitor library.
//!
//! Decodes the PMIC's status and IRQ registers into edge-triggered binary
//! monitors, gates and scales backlight brightness, and estimates battery
//! level.  All hardware access goes through the port traits in
//! [`app::ports`]; ESP-IDF specifics live in the binary only.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod battery;
pub mod brightness;
pub mod config;
pub mod error;
pub mod light;
pub mod monitor;
pub mod registers;
pub mod scheduler;
pub mod snapshot;

/// Log target for the component.
pub(crate) const TAG: &str = "axp192";
pub(crate) const SENSOR_TAG: &str = "axp192.sensor";
pub(crate) const BINARY_TAG: &str = "axp192.binary_sensor";
pub(crate) const LIGHT_TAG: &str = "axp192.light";
