//! Component configuration.
//!
//! Mirrors the YAML schema the component is configured with on the host:
//! initial brightness, polling interval, bus address, battery sensor and
//! the list of binary-sensor monitors.  Parsed from JSON.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::monitor::MonitorKind;

/// Maximum number of monitors the service can register.
pub const MAX_MONITORS: usize = 8;

/// Default I2C address of the AXP192.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x34;

/// Core component configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    // --- Backlight ---
    /// Initial backlight brightness (0.0-1.0)
    pub brightness: f32,

    // --- Timing ---
    /// Periodic update interval (battery level, diagnostics) in milliseconds
    pub update_interval_ms: u32,
    /// Loop interval (monitors, brightness) in milliseconds
    pub loop_interval_ms: u32,

    // --- Bus ---
    /// 7-bit I2C address of the PMIC
    pub i2c_address: u8,

    // --- Sensors ---
    /// Publish the estimated battery level on each update
    pub battery_level: bool,
    /// Nominal battery capacity (mAh), informational only
    pub battery_capacity_mah: Option<u16>,
    /// Binary-sensor monitors to register at setup
    pub monitors: heapless::Vec<MonitorKind, MAX_MONITORS>,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            // Backlight
            brightness: 1.0,

            // Timing
            update_interval_ms: 60_000, // 1/min
            loop_interval_ms: 16,       // ~60 Hz

            // Bus
            i2c_address: DEFAULT_I2C_ADDRESS,

            // Sensors
            battery_level: true,
            battery_capacity_mah: None,
            monitors: heapless::Vec::new(),
        }
    }
}

impl PowerConfig {
    /// Parse and validate a JSON document.  Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Range-check every field.  Out-of-range values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.brightness) {
            return Err(ConfigError::ValidationFailed("brightness must be within 0.0-1.0"));
        }
        if self.loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("loop_interval_ms must be non-zero"));
        }
        if self.update_interval_ms <= self.loop_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "update_interval_ms must exceed loop_interval_ms",
            ));
        }
        if self.i2c_address > 0x7F {
            return Err(ConfigError::ValidationFailed("i2c_address must be a 7-bit address"));
        }
        if self.battery_capacity_mah == Some(0) {
            return Err(ConfigError::ValidationFailed("battery_capacity_mah must be non-zero"));
        }
        Ok(())
    }

    /// Loop ticks per periodic update (at least one).
    pub fn update_every_ticks(&self) -> u32 {
        (self.update_interval_ms / self.loop_interval_ms.max(1)).max(1)
    }
}
