//! Battery telemetry helpers.
//!
//! The level estimate is a straight line between 3.0 V and 4.1 V.  A Li-ion
//! discharge curve is far from linear, so treat the result as a rough
//! indicator only.  It is clamped at the top but not at the bottom.

const VBAT_EMPTY: f32 = 3.0;
const VBAT_FULL: f32 = 4.1;

/// Battery level in percent from the battery voltage.
pub fn estimate(vbat_volts: f32) -> f32 {
    let level = 100.0 * ((vbat_volts - VBAT_EMPTY) / (VBAT_FULL - VBAT_EMPTY));
    if level > 100.0 { 100.0 } else { level }
}

/// Net charge in mAh from the raw coulomb counters.
///
/// `65536 * 0.5 * (charge - discharge) / 3600 / 25` with the ADC sample
/// rate at its 25 Hz default.
pub fn coulomb_mah(charge: u32, discharge: u32) -> f32 {
    let net = charge as f32 - discharge as f32;
    65536.0 * 0.5 * net / 3600.0 / 25.0
}
