//! Power service — the hexagonal core.
//!
//! [`PowerService`] owns the monitor registry and the brightness gate.  It
//! exposes a hardware-agnostic API; all I/O flows through port traits
//! injected at call sites, making the whole service testable with mock
//! adapters.
//!
//! ```text
//!  RegisterReader ──▶ ┌────────────────────────┐ ──▶ NotificationSink × N
//!                     │      PowerService      │ ──▶ EventSink
//! BrightnessWriter ◀──│  Monitors · Backlight  │
//!                     └────────────────────────┘
//! ```
//!
//! Two entry points are driven by the host scheduler:
//!
//! - [`on_tick`](PowerService::on_tick) every loop: one register snapshot,
//!   decode-and-notify for every monitor, conditional backlight write.
//! - [`update`](PowerService::update) every polling interval: battery level
//!   and power-path diagnostics.

use log::{debug, info, warn};

use crate::battery;
use crate::brightness::{BrightnessHandle, BrightnessState};
use crate::config::{MAX_MONITORS, PowerConfig};
use crate::light::BacklightOutput;
use crate::monitor::{Monitor, MonitorHandle, MonitorKind};
use crate::registers::{
    INPUT_ACIN_PRESENT, INPUT_BAT_CHARGING, INPUT_VBUS_PRESENT, POWER_BAT_ACTIVE, POWER_CHARGING,
    POWER_OVERTEMP,
};
use crate::snapshot::RegisterSnapshot;
use crate::{SENSOR_TAG, TAG};

use super::events::{PowerDiagnostics, PowerEvent};
use super::ports::{BrightnessWriter, EventSink, NotificationSink, RegisterReader};

// ───────────────────────────────────────────────────────────────
// PowerService
// ───────────────────────────────────────────────────────────────

/// The power service orchestrates monitors and backlight control.
pub struct PowerService<N> {
    config: PowerConfig,
    monitors: heapless::Vec<Monitor<N>, MAX_MONITORS>,
    brightness: BrightnessState,
    tick_count: u64,
    update_count: u64,
}

impl<N: NotificationSink> PowerService<N> {
    /// Construct the service from configuration.
    ///
    /// No monitors are registered yet — call [`register_monitor`](Self::register_monitor)
    /// or [`register_configured`](Self::register_configured) during setup.
    pub fn new(config: PowerConfig) -> Self {
        let brightness = BrightnessState::new(config.brightness);
        Self {
            config,
            monitors: heapless::Vec::new(),
            brightness,
            tick_count: 0,
            update_count: 0,
        }
    }

    // ── Setup ─────────────────────────────────────────────────

    /// Register a monitor whose transitions are published to `sink`.
    ///
    /// Returns `None` if all [`MAX_MONITORS`] slots are taken.
    pub fn register_monitor(&mut self, kind: MonitorKind, sink: N) -> Option<MonitorHandle> {
        let slot = self.monitors.len();
        if self.monitors.push(Monitor::new(kind, sink)).is_err() {
            warn!(target: TAG, "Monitor registry full, dropping {}", kind);
            return None;
        }
        info!(target: TAG, "Registered monitor {} at slot {}", kind, slot);
        Some(MonitorHandle { slot, kind })
    }

    /// Register every monitor listed in the configuration, asking `make_sink`
    /// for each one's notification sink.
    pub fn register_configured(
        &mut self,
        mut make_sink: impl FnMut(MonitorKind) -> N,
    ) -> heapless::Vec<MonitorHandle, MAX_MONITORS> {
        let kinds = self.config.monitors.clone();
        let mut handles = heapless::Vec::new();
        for kind in kinds {
            if let Some(handle) = self.register_monitor(kind, make_sink(kind)) {
                // Same capacity as the registry.
                handles.push(handle).ok();
            }
        }
        handles
    }

    /// Log the effective configuration and every registered monitor.
    pub fn dump_config(&self) {
        info!(target: TAG, "AXP192:");
        info!(target: TAG, "  Address: 0x{:02X}", self.config.i2c_address);
        info!(target: TAG, "  Update interval: {}ms", self.config.update_interval_ms);
        info!(target: TAG, "  Brightness: {:.3}", self.brightness.desired());
        if self.config.battery_level {
            info!(target: TAG, "  Battery Level sensor enabled");
        }
        if let Some(mah) = self.config.battery_capacity_mah {
            info!(target: TAG, "  Battery capacity: {}mAh", mah);
        }
        for (slot, monitor) in self.monitors.iter().enumerate() {
            info!(
                target: TAG,
                "  Monitor [{}] type: {} device_class: {}",
                slot,
                monitor.kind(),
                monitor.kind().device_class()
            );
        }
    }

    // ── Brightness control ────────────────────────────────────

    /// Set the normalized backlight level.  Applied on the next tick.
    ///
    /// Clamped to `[0, 1]`; NaN is ignored.
    pub fn set_desired_brightness(&self, level: f32) {
        self.brightness.set_desired(level);
    }

    /// Shared handle for writers on other tasks.  Applies the same clamp and
    /// NaN rule as [`set_desired_brightness`](Self::set_desired_brightness).
    pub fn brightness_handle(&self) -> BrightnessHandle {
        self.brightness.handle()
    }

    /// A light output bound to this service's backlight.
    pub fn backlight(&self) -> BacklightOutput {
        BacklightOutput::new(self.brightness.handle())
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Read one snapshot of the status registers.
    pub fn read_snapshot(hw: &mut impl RegisterReader) -> RegisterSnapshot {
        RegisterSnapshot {
            input_status: hw.read_input_status(),
            power_status: hw.read_power_status(),
            irq_status: hw.read_irq_status32(),
        }
    }

    /// Run one loop iteration: snapshot → monitors → backlight.
    ///
    /// The `hw` parameter satisfies **both** [`RegisterReader`] and
    /// [`BrightnessWriter`] — one adapter owns the bus.
    pub fn on_tick(
        &mut self,
        hw: &mut (impl RegisterReader + BrightnessWriter),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. One snapshot, shared by every monitor
        let snapshot = Self::read_snapshot(hw);

        // 2. Decode and notify on transitions
        for monitor in &mut self.monitors {
            if let Some(active) = monitor.update(&snapshot) {
                sink.emit(&PowerEvent::MonitorChanged {
                    kind: monitor.kind(),
                    active,
                });
            }
        }

        // 3. Backlight, only when the desired level moved
        let previous = self.brightness.last_applied();
        if let Some((desired, native)) = self.brightness.take_change() {
            debug!(
                target: TAG,
                "Brightness={:.3} (Curr: {:.3}) scaled: {:.3}",
                desired,
                previous.unwrap_or(-1.0),
                native
            );
            hw.write_screen_brightness(native);
            sink.emit(&PowerEvent::BrightnessApplied { desired, native });
        }
    }

    /// Periodic update: battery level and power-path diagnostics.
    pub fn update(&mut self, hw: &mut impl RegisterReader, sink: &mut impl EventSink) {
        self.update_count += 1;

        if self.config.battery_level {
            let volts = hw.read_battery_voltage();
            let percent = battery::estimate(volts);
            debug!(target: SENSOR_TAG, "Got Battery Level={:.1} ({:.3}V)", percent, volts);
            sink.emit(&PowerEvent::BatteryLevel { percent, volts });
        }

        let input_status = hw.read_input_status();
        let power_status = hw.read_power_status();
        let (coulomb_charge, coulomb_discharge) = hw.read_coulomb_counters();
        let diag = PowerDiagnostics {
            input_status,
            power_status,
            ac_in: input_status & INPUT_ACIN_PRESENT != 0,
            vbus_in: input_status & INPUT_VBUS_PRESENT != 0,
            bat_charge: input_status & INPUT_BAT_CHARGING != 0,
            axp_overtemp: power_status & POWER_OVERTEMP != 0,
            charge_req: power_status & POWER_CHARGING != 0,
            bat_active: power_status & POWER_BAT_ACTIVE != 0,
            coulomb_charge,
            coulomb_discharge,
            coulomb_mah: battery::coulomb_mah(coulomb_charge, coulomb_discharge),
            charge_current_ma: hw.read_charge_current(),
            discharge_current_ma: hw.read_discharge_current(),
        };

        debug!(
            target: TAG,
            "input: {:x}, power: {:x}, ac_in: {}, vbus_in: {}, bat_charge: {}, \
             axp_overtemp: {}, charge_req: {}, bat_active: {}",
            diag.input_status,
            diag.power_status,
            diag.ac_in,
            diag.vbus_in,
            diag.bat_charge,
            diag.axp_overtemp,
            diag.charge_req,
            diag.bat_active,
        );
        sink.emit(&PowerEvent::Diagnostics(diag));
    }

    // ── Queries ───────────────────────────────────────────────

    /// Last published state of a registered monitor.
    pub fn monitor_state(&self, handle: MonitorHandle) -> Option<bool> {
        self.monitors.get(handle.slot).map(Monitor::state)
    }

    pub fn monitor_count(&self) -> usize {
        self.monitors.len()
    }

    /// Total loop ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Total periodic updates executed since startup.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn desired_brightness(&self) -> f32 {
        self.brightness.desired()
    }

    /// Normalized level last written to the chip, `None` before the first tick.
    pub fn applied_brightness(&self) -> Option<f32> {
        self.brightness.last_applied()
    }

    pub fn config(&self) -> &PowerConfig {
        &self.config
    }
}
