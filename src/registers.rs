//! AXP192 register addresses and status bit masks.
//!
//! Only the registers the monitor actually touches are listed here; the
//! full register map belongs to a dedicated driver.

/// Power-mode / input status register (AC, VBUS, battery current direction).
pub const INPUT_STATUS: u8 = 0x00;

/// Power-mode / charging status register.
pub const POWER_STATUS: u8 = 0x01;

/// First of four IRQ status registers (0x44..=0x47), read big-endian so that
/// 0x44 lands in the most significant byte of the 32-bit word.
pub const IRQ_STATUS_1: u8 = 0x44;

/// LDO2/LDO3 output voltage.  The upper nibble drives the LCD backlight.
pub const LDO23_VOLTAGE: u8 = 0x28;

/// Battery voltage ADC, 12 bits.
pub const BAT_VOLTAGE_ADC: u8 = 0x78;

/// Battery charge current ADC, 13 bits.
pub const BAT_CHARGE_CURRENT_ADC: u8 = 0x7A;

/// Battery discharge current ADC, 13 bits.
pub const BAT_DISCHARGE_CURRENT_ADC: u8 = 0x7C;

/// Coulomb counter, charge side (32 bits).
pub const COULOMB_CHARGE: u8 = 0xB0;

/// Coulomb counter, discharge side (32 bits).
pub const COULOMB_DISCHARGE: u8 = 0xB4;

// ── Input status (0x00) ───────────────────────────────────────

pub const INPUT_ACIN_PRESENT: u8 = 0b1000_0000;
pub const INPUT_VBUS_PRESENT: u8 = 0b0010_0000;
/// Battery current direction: set while charging.
pub const INPUT_BAT_CHARGING: u8 = 0b0000_0100;

// ── Power status (0x01) ───────────────────────────────────────

pub const POWER_OVERTEMP: u8 = 0b1000_0000;
pub const POWER_CHARGING: u8 = 0b0100_0000;
pub const POWER_BAT_ACTIVE: u8 = 0b0000_1000;

// ── IRQ status word (0x44..=0x47) ─────────────────────────────

/// 45:1, internal over-temperature.
pub const IRQ_OVERTEMP: u32 = 0x0002_0000;
/// 45:2, charging finished.
pub const IRQ_CHARGE_DONE: u32 = 0x0004_0000;
/// 46:7, battery over-temperature.
pub const IRQ_BAT_OVERTEMP: u32 = 0x0000_8000;
/// 46:4, APS low-voltage warning level 1.
pub const IRQ_LOW_BATTERY: u32 = 0x0000_1000;
/// 47:0, APS low-voltage warning level 2.
pub const IRQ_CRITICAL_BATTERY: u32 = 0x0000_0001;

// ── ADC scaling ───────────────────────────────────────────────

/// Battery voltage LSB in volts.
pub const BAT_VOLTAGE_LSB: f32 = 1.1 / 1000.0;

/// Battery current LSB in milliamps.
pub const BAT_CURRENT_LSB: f32 = 0.5;

/// Highest usable backlight level in the LDO2 nibble.
pub const SCREEN_BRIGHTNESS_MAX: u8 = 12;
