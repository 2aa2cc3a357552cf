//! Outbound events.
//!
//! The [`PowerService`](super::service::PowerService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Monitor transitions go to the
//! per-monitor [`NotificationSink`](super::ports::NotificationSink) instead and
//! are mirrored here for telemetry.

use crate::monitor::MonitorKind;

/// Structured events emitted by the power service.
#[derive(Debug, Clone, PartialEq)]
pub enum PowerEvent {
    /// A monitor changed state.
    MonitorChanged { kind: MonitorKind, active: bool },

    /// Estimated battery level from the periodic update.
    BatteryLevel { percent: f32, volts: f32 },

    /// A new backlight level was written to the chip.
    BrightnessApplied { desired: f32, native: f32 },

    /// Periodic power-path diagnostics.
    Diagnostics(PowerDiagnostics),
}

/// Decoded status flags and charge counters from the periodic update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerDiagnostics {
    pub input_status: u8,
    pub power_status: u8,
    pub ac_in: bool,
    pub vbus_in: bool,
    pub bat_charge: bool,
    pub axp_overtemp: bool,
    pub charge_req: bool,
    pub bat_active: bool,
    pub coulomb_charge: u32,
    pub coulomb_discharge: u32,
    /// Net charge in mAh derived from the coulomb counters.
    pub coulomb_mah: f32,
    pub charge_current_ma: f32,
    pub discharge_current_ma: f32,
}
