//! Backlight light output.
//!
//! The host's light entity owns one of these.  It only supports a
//! brightness channel; every state write is forwarded to the shared
//! desired-brightness cell and picked up by the service on its next tick.

use log::debug;

use crate::brightness::BrightnessHandle;
use crate::LIGHT_TAG;

/// Colour modes a light output can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Brightness,
}

/// Capabilities reported to the host light entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightTraits {
    pub supported_color_modes: heapless::Vec<ColorMode, 1>,
}

impl LightTraits {
    pub fn supports(&self, mode: ColorMode) -> bool {
        self.supported_color_modes.contains(&mode)
    }
}

/// Brightness-only output driving the PMIC backlight LDO.
pub struct BacklightOutput {
    brightness: BrightnessHandle,
}

impl BacklightOutput {
    pub fn new(brightness: BrightnessHandle) -> Self {
        Self { brightness }
    }

    pub fn traits(&self) -> LightTraits {
        let mut supported_color_modes = heapless::Vec::new();
        // Capacity 1, cannot fail.
        supported_color_modes.push(ColorMode::Brightness).ok();
        LightTraits {
            supported_color_modes,
        }
    }

    /// Forward the light's current brightness (0–1).
    ///
    /// Values outside `[0, 1]` are clamped; NaN is dropped.
    pub fn write_state(&mut self, brightness: f32) {
        debug!(target: LIGHT_TAG, "Brightness={}", brightness);
        self.brightness.set(brightness);
    }
}
