//! Backlight brightness scaling and change gating.
//!
//! The host sets a normalized brightness in `[0, 1]` at any time, possibly
//! from another task.  Once per tick the service compares it against the
//! last level written to the chip and, only if it differs, scales it into
//! the LDO's native range and writes it.

use core::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use log::warn;

use crate::TAG;

/// Lowest native backlight level used in this deployment.
pub const NATIVE_MIN: f32 = 7.0;

/// Highest native backlight level.
pub const NATIVE_MAX: f32 = 12.0;

/// Sentinel for "nothing written yet"; never equal to a valid desired level.
const NEVER_APPLIED: f32 = -1.0;

/// Linear interpolation of `input` from `[input_min, input_max]` onto
/// `[output_min, output_max]`.
///
/// A zero-width input range yields `0`, not a division by zero.
pub fn scale(input: f32, input_min: f32, input_max: f32, output_min: f32, output_max: f32) -> f32 {
    let dividend = output_max - output_min;
    let divisor = input_max - input_min;
    let delta = input - input_min;
    if divisor == 0.0 {
        return 0.0;
    }
    delta * dividend / divisor + output_min
}

/// Normalized brightness → native LDO level.
pub fn to_native(level: f32) -> f32 {
    scale(level, 0.0, 1.0, NATIVE_MIN, NATIVE_MAX)
}

// ───────────────────────────────────────────────────────────────
// Shared desired level
// ───────────────────────────────────────────────────────────────

/// Lock-free cell holding the desired brightness as raw `f32` bits.
///
/// Written by the light output (any task), read once per tick by the
/// service.  Only levels inside `[0, 1]` are stored; NaN never compares
/// equal to the last applied level.
#[derive(Debug)]
pub struct DesiredBrightness(AtomicU32);

impl DesiredBrightness {
    /// NaN starts at `0`; anything else is clamped to `[0, 1]`.
    pub fn new(level: f32) -> Self {
        let level = if level.is_nan() { 0.0 } else { level.clamp(0.0, 1.0) };
        Self(AtomicU32::new(level.to_bits()))
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    /// Store a new level, clamped to `[0, 1]`.  NaN is dropped and the
    /// previous level kept.
    pub fn set(&self, level: f32) {
        if level.is_nan() {
            warn!(target: TAG, "Ignoring NaN brightness");
            return;
        }
        self.0.store(level.clamp(0.0, 1.0).to_bits(), Ordering::Release);
    }
}

/// Clonable handle to the desired level, handed to light outputs.
pub type BrightnessHandle = Arc<DesiredBrightness>;

// ───────────────────────────────────────────────────────────────
// Change gate
// ───────────────────────────────────────────────────────────────

/// Desired vs. last-applied brightness.
#[derive(Debug)]
pub struct BrightnessState {
    desired: BrightnessHandle,
    last_applied: f32,
}

impl BrightnessState {
    pub fn new(initial: f32) -> Self {
        Self {
            desired: Arc::new(DesiredBrightness::new(initial)),
            last_applied: NEVER_APPLIED,
        }
    }

    pub fn handle(&self) -> BrightnessHandle {
        Arc::clone(&self.desired)
    }

    pub fn desired(&self) -> f32 {
        self.desired.get()
    }

    pub fn set_desired(&self, level: f32) {
        self.desired.set(level);
    }

    /// `None` until the first write.
    pub fn last_applied(&self) -> Option<f32> {
        (self.last_applied != NEVER_APPLIED).then_some(self.last_applied)
    }

    /// If the desired level changed since the last write, record it as
    /// applied and return `(desired, native)`.  Exact float comparison.
    pub fn take_change(&mut self) -> Option<(f32, f32)> {
        let desired = self.desired.get();
        if desired == self.last_applied {
            return None;
        }
        self.last_applied = desired;
        Some((desired, to_native(desired)))
    }
}
