//! I2C bus adapter — bridges the AXP192 to the register ports.
//!
//! Implements [`RegisterReader`] and [`BrightnessWriter`] over any
//! `embedded-hal` 1.0 I2C bus, touching only the registers the monitor
//! needs.  A failed transfer is logged and the last good value is
//! returned, so the core always sees a complete snapshot.

use embedded_hal::i2c::I2c;
use log::warn;

use crate::app::ports::{BrightnessWriter, RegisterReader};
use crate::error::{BusError, Result};
use crate::registers::{
    BAT_CHARGE_CURRENT_ADC, BAT_CURRENT_LSB, BAT_DISCHARGE_CURRENT_ADC, BAT_VOLTAGE_ADC,
    BAT_VOLTAGE_LSB, COULOMB_CHARGE, COULOMB_DISCHARGE, INPUT_STATUS, IRQ_STATUS_1,
    LDO23_VOLTAGE, POWER_STATUS, SCREEN_BRIGHTNESS_MAX,
};
use crate::TAG;

/// Values returned when a read fails.
#[derive(Debug, Clone, Copy, Default)]
struct LastGood {
    input_status: u8,
    power_status: u8,
    irq_status: u32,
    battery_volts: f32,
    coulomb: (u32, u32),
    charge_ma: f32,
    discharge_ma: f32,
}

/// AXP192 on an I2C bus.
pub struct Axp192Bus<I2C> {
    i2c: I2C,
    address: u8,
    last: LastGood,
}

impl<I2C: I2c> Axp192Bus<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            last: LastGood::default(),
        }
    }

    /// Check that the chip answers on the bus.
    pub fn probe(&mut self) -> Result<()> {
        self.read_u8(INPUT_STATUS)?;
        Ok(())
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    // ── Raw access ────────────────────────────────────────────

    fn read(&mut self, reg: u8, buf: &mut [u8]) -> core::result::Result<(), BusError> {
        self.i2c
            .write_read(self.address, &[reg], buf)
            .map_err(|_| BusError::Read(reg))
    }

    fn read_u8(&mut self, reg: u8) -> core::result::Result<u8, BusError> {
        let mut buf = [0u8];
        self.read(reg, &mut buf)?;
        Ok(buf[0])
    }

    fn read_u32(&mut self, reg: u8) -> core::result::Result<u32, BusError> {
        let mut buf = [0u8; 4];
        self.read(reg, &mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    fn read_12(&mut self, reg: u8) -> core::result::Result<u16, BusError> {
        let mut buf = [0u8; 2];
        self.read(reg, &mut buf)?;
        Ok(((buf[0] as u16) << 4) + (buf[1] as u16))
    }

    fn read_13(&mut self, reg: u8) -> core::result::Result<u16, BusError> {
        let mut buf = [0u8; 2];
        self.read(reg, &mut buf)?;
        Ok(((buf[0] as u16) << 5) + (buf[1] as u16))
    }

    fn write_u8(&mut self, reg: u8, value: u8) -> core::result::Result<(), BusError> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(|_| BusError::Write(reg))
    }

    /// Set the backlight LDO level (upper nibble of 0x28), keeping LDO3.
    pub fn set_screen_level(&mut self, level: u8) -> Result<()> {
        let level = level.min(SCREEN_BRIGHTNESS_MAX);
        let current = self.read_u8(LDO23_VOLTAGE)?;
        self.write_u8(LDO23_VOLTAGE, (current & 0x0F) | (level << 4))?;
        Ok(())
    }
}

/// Log a failed read and fall back to the cached value.
fn or_last<T: Copy>(result: core::result::Result<T, BusError>, last: &mut T) -> T {
    match result {
        Ok(v) => {
            *last = v;
            v
        }
        Err(e) => {
            warn!(target: TAG, "{}, using last value", e);
            *last
        }
    }
}

// ── RegisterReader implementation ─────────────────────────────

impl<I2C: I2c> RegisterReader for Axp192Bus<I2C> {
    fn read_input_status(&mut self) -> u8 {
        let r = self.read_u8(INPUT_STATUS);
        or_last(r, &mut self.last.input_status)
    }

    fn read_power_status(&mut self) -> u8 {
        let r = self.read_u8(POWER_STATUS);
        or_last(r, &mut self.last.power_status)
    }

    fn read_irq_status32(&mut self) -> u32 {
        let r = self.read_u32(IRQ_STATUS_1);
        or_last(r, &mut self.last.irq_status)
    }

    fn read_battery_voltage(&mut self) -> f32 {
        let r = self
            .read_12(BAT_VOLTAGE_ADC)
            .map(|raw| raw as f32 * BAT_VOLTAGE_LSB);
        or_last(r, &mut self.last.battery_volts)
    }

    fn read_coulomb_counters(&mut self) -> (u32, u32) {
        let r = self
            .read_u32(COULOMB_CHARGE)
            .and_then(|charge| Ok((charge, self.read_u32(COULOMB_DISCHARGE)?)));
        or_last(r, &mut self.last.coulomb)
    }

    fn read_charge_current(&mut self) -> f32 {
        let r = self
            .read_13(BAT_CHARGE_CURRENT_ADC)
            .map(|raw| raw as f32 * BAT_CURRENT_LSB);
        or_last(r, &mut self.last.charge_ma)
    }

    fn read_discharge_current(&mut self) -> f32 {
        let r = self
            .read_13(BAT_DISCHARGE_CURRENT_ADC)
            .map(|raw| raw as f32 * BAT_CURRENT_LSB);
        or_last(r, &mut self.last.discharge_ma)
    }
}

// ── BrightnessWriter implementation ───────────────────────────

impl<I2C: I2c> BrightnessWriter for Axp192Bus<I2C> {
    /// The LDO takes integer steps; the fractional part is truncated.
    fn write_screen_brightness(&mut self, level: f32) {
        if let Err(e) = self.set_screen_level(level as u8) {
            warn!(target: TAG, "Backlight write failed: {}", e);
        }
    }
}
