//! Log-based event sinks.
//!
//! [`LogEventSink`] implements [`EventSink`] by writing every
//! [`PowerEvent`] to the logger (UART / USB-CDC in production).
//! [`LogNotificationSink`] is the simplest binary-sensor stand-in: it logs
//! each monitor transition under the binary-sensor target.

use log::info;

use crate::app::events::PowerEvent;
use crate::app::ports::{EventSink, NotificationSink};
use crate::monitor::MonitorKind;
use crate::{BINARY_TAG, TAG};

/// Adapter that logs every [`PowerEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &PowerEvent) {
        match event {
            PowerEvent::MonitorChanged { kind, active } => {
                info!(target: TAG, "MONITOR | {} -> {}", kind, if *active { "ON" } else { "OFF" });
            }
            PowerEvent::BatteryLevel { percent, volts } => {
                info!(target: TAG, "BATTERY | {:.1}% ({:.3}V)", percent, volts);
            }
            PowerEvent::BrightnessApplied { desired, native } => {
                info!(target: TAG, "BACKLIGHT | {:.3} -> level {:.3}", desired, native);
            }
            PowerEvent::Diagnostics(d) => {
                info!(
                    target: TAG,
                    "POWER | ac_in={} vbus_in={} charging={} overtemp={} | \
                     coulomb in={} out={} net={:.1}mAh | chg={:.1}mA dis={:.1}mA",
                    d.ac_in,
                    d.vbus_in,
                    d.bat_charge || d.charge_req,
                    d.axp_overtemp,
                    d.coulomb_charge,
                    d.coulomb_discharge,
                    d.coulomb_mah,
                    d.charge_current_ma,
                    d.discharge_current_ma,
                );
            }
        }
    }
}

/// Binary-sensor sink that only logs its state changes.
pub struct LogNotificationSink {
    kind: MonitorKind,
}

impl LogNotificationSink {
    pub fn new(kind: MonitorKind) -> Self {
        Self { kind }
    }
}

impl NotificationSink for LogNotificationSink {
    fn publish_state(&mut self, state: bool) {
        info!(
            target: BINARY_TAG,
            "'{}' ({}): Sending state {}",
            self.kind,
            self.kind.device_class(),
            if state { "ON" } else { "OFF" }
        );
    }
}
