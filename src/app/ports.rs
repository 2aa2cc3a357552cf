//! Port traits — the hexagonal boundary between the monitor core and the outside world.
//!
//! ```text
//!   PMIC driver ──▶ RegisterReader ──▶ PowerService ──▶ NotificationSink (per monitor)
//!                                          │         ──▶ EventSink (telemetry)
//!                                          ▼
//!                                   BrightnessWriter
//! ```
//!
//! Driven adapters (the I2C bus adapter, binary-sensor entities, event
//! loggers) implement these traits.  The [`PowerService`](super::service::PowerService)
//! consumes them via generics, so the core never touches hardware directly.

use super::events::PowerEvent;

// ───────────────────────────────────────────────────────────────
// Register port (driven adapter: PMIC → core)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the core calls this to obtain chip status.
///
/// Implementations are infallible from the core's point of view.  A bus
/// failure is the adapter's concern; it should log and return the last
/// good value.
pub trait RegisterReader {
    /// Input power status (register 0x00).
    fn read_input_status(&mut self) -> u8;

    /// Power-mode / charge status (register 0x01).
    fn read_power_status(&mut self) -> u8;

    /// The four IRQ status registers packed big-endian (0x44 is the MSB).
    fn read_irq_status32(&mut self) -> u32;

    /// Battery voltage in volts.
    fn read_battery_voltage(&mut self) -> f32;

    /// Raw coulomb counters as `(charge, discharge)`.
    fn read_coulomb_counters(&mut self) -> (u32, u32);

    /// Battery charge current in mA.
    fn read_charge_current(&mut self) -> f32;

    /// Battery discharge current in mA.
    fn read_discharge_current(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Brightness port (driven adapter: core → PMIC)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the backlight LDO.
pub trait BrightnessWriter {
    /// Write a level in the chip's native range (see
    /// [`NATIVE_MIN`](crate::brightness::NATIVE_MIN)..[`NATIVE_MAX`](crate::brightness::NATIVE_MAX)).
    fn write_screen_brightness(&mut self, level: f32);
}

// ───────────────────────────────────────────────────────────────
// Notification port (driven adapter: core → binary-sensor entity)
// ───────────────────────────────────────────────────────────────

/// Receives the boolean state of one registered monitor.
///
/// Supplied by the host at registration time.  Only called on transitions.
pub trait NotificationSink {
    fn publish_state(&mut self, state: bool);
}

impl<T: NotificationSink + ?Sized> NotificationSink for Box<T> {
    fn publish_state(&mut self, state: bool) {
        (**self).publish_state(state);
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for &mut T {
    fn publish_state(&mut self, state: bool) {
        (**self).publish_state(state);
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: core → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`PowerEvent`]s through this port.
/// Adapters decide where they go (serial log, sensor entities, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &PowerEvent);
}
