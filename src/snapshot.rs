//! One poll tick's worth of raw PMIC status.

use core::fmt;

/// Raw status registers read once per tick.
///
/// Produced fresh by the [`RegisterReader`](crate::app::ports::RegisterReader)
/// and shared read-only by every monitor during that tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterSnapshot {
    pub input_status: u8,
    pub power_status: u8,
    pub irq_status: u32,
}

impl RegisterSnapshot {
    pub const fn new(input_status: u8, power_status: u8, irq_status: u32) -> Self {
        Self {
            input_status,
            power_status,
            irq_status,
        }
    }
}

/// Binary rendering used by the transition diagnostics.
impl fmt::Display for RegisterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "input: 0b{:08b}, power: 0b{:08b}, irq: 0b{:032b}",
            self.input_status, self.power_status, self.irq_status
        )
    }
}
