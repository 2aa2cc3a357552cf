//! Status-bit decoder and edge-triggered monitors.
//!
//! Each [`MonitorKind`] is asserted when **any** of its register conditions
//! holds.  The conditions live in [`BIT_TABLE`], which is the single source
//! of truth for the mapping:
//!
//! | Kind              | Asserted when any of                              |
//! |-------------------|---------------------------------------------------|
//! | `Plugged`         | input bit 7 (ACIN), input bit 5 (VBUS)            |
//! | `Charging`        | input bit 2, power bit 6                          |
//! | `Overtemp`        | power bit 7, IRQ `0x0002_0000`, IRQ `0x0000_8000` |
//! | `LowBattery`      | IRQ `0x0000_1000`                                 |
//! | `CriticalBattery` | IRQ `0x0000_0001`                                 |
//! | `ChargeComplete`  | IRQ `0x0004_0000`                                 |
//!
//! There is no latching: a condition deasserts as soon as none of its bits
//! is present on the next read.  A [`Monitor`] only notifies its sink when
//! the decoded value changes, so two bits feeding the same kind are only
//! visible as the net OR.

use core::fmt;
use core::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::app::ports::NotificationSink;
use crate::error::ConfigError;
use crate::registers::{
    INPUT_ACIN_PRESENT, INPUT_BAT_CHARGING, INPUT_VBUS_PRESENT, IRQ_BAT_OVERTEMP,
    IRQ_CHARGE_DONE, IRQ_CRITICAL_BATTERY, IRQ_LOW_BATTERY, IRQ_OVERTEMP, POWER_CHARGING,
    POWER_OVERTEMP,
};
use crate::snapshot::RegisterSnapshot;
use crate::BINARY_TAG;

// ───────────────────────────────────────────────────────────────
// Monitor kinds
// ───────────────────────────────────────────────────────────────

/// Logical condition derived from the chip's status and IRQ registers.
///
/// The discriminant indexes [`BIT_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
#[repr(u8)]
pub enum MonitorKind {
    Plugged = 0,
    Charging = 1,
    Overtemp = 2,
    LowBattery = 3,
    CriticalBattery = 4,
    #[serde(rename = "CHARGED")]
    ChargeComplete = 5,
}

impl MonitorKind {
    pub const ALL: [MonitorKind; 6] = [
        Self::Plugged,
        Self::Charging,
        Self::Overtemp,
        Self::LowBattery,
        Self::CriticalBattery,
        Self::ChargeComplete,
    ];

    /// Home-automation device class for the binary sensor.
    pub const fn device_class(self) -> &'static str {
        match self {
            Self::Plugged => "plug",
            Self::Charging => "battery_charging",
            Self::Overtemp => "heat",
            Self::LowBattery | Self::CriticalBattery => "battery",
            Self::ChargeComplete => "None",
        }
    }

    /// Configuration name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plugged => "PLUGGED",
            Self::Charging => "CHARGING",
            Self::Overtemp => "OVERTEMP",
            Self::LowBattery => "LOW_BATTERY",
            Self::CriticalBattery => "CRITICAL_BATTERY",
            Self::ChargeComplete => "CHARGED",
        }
    }

    /// The OR-set of register conditions that assert this kind.
    pub fn conditions(self) -> &'static [Condition] {
        BIT_TABLE[self as usize].1
    }
}

impl fmt::Display for MonitorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive; spaces are accepted in place of underscores
/// (`"low battery"` parses as [`MonitorKind::LowBattery`]).
impl FromStr for MonitorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == ' ' { '_' } else { c.to_ascii_uppercase() })
            .collect();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or(ConfigError::UnknownMonitor)
    }
}

impl TryFrom<String> for MonitorKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ───────────────────────────────────────────────────────────────
// Bit table
// ───────────────────────────────────────────────────────────────

/// A single masked register test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Any of these bits set in the input status byte.
    Input(u8),
    /// Any of these bits set in the power status byte.
    Power(u8),
    /// Any of these bits set in the IRQ status word.
    Irq(u32),
}

impl Condition {
    pub const fn holds(self, snap: &RegisterSnapshot) -> bool {
        match self {
            Self::Input(mask) => snap.input_status & mask != 0,
            Self::Power(mask) => snap.power_status & mask != 0,
            Self::Irq(mask) => snap.irq_status & mask != 0,
        }
    }
}

/// Kind → OR-list of conditions, ordered by [`MonitorKind`] discriminant.
pub const BIT_TABLE: [(MonitorKind, &[Condition]); 6] = [
    (
        MonitorKind::Plugged,
        &[
            Condition::Input(INPUT_ACIN_PRESENT),
            Condition::Input(INPUT_VBUS_PRESENT),
        ],
    ),
    (
        MonitorKind::Charging,
        &[
            Condition::Input(INPUT_BAT_CHARGING),
            Condition::Power(POWER_CHARGING),
        ],
    ),
    (
        MonitorKind::Overtemp,
        &[
            Condition::Power(POWER_OVERTEMP),
            Condition::Irq(IRQ_OVERTEMP),
            Condition::Irq(IRQ_BAT_OVERTEMP),
        ],
    ),
    (MonitorKind::LowBattery, &[Condition::Irq(IRQ_LOW_BATTERY)]),
    (
        MonitorKind::CriticalBattery,
        &[Condition::Irq(IRQ_CRITICAL_BATTERY)],
    ),
    (MonitorKind::ChargeComplete, &[Condition::Irq(IRQ_CHARGE_DONE)]),
];

/// Whether `kind` is asserted by the given raw register values.
pub fn decode(kind: MonitorKind, input_status: u8, power_status: u8, irq_status: u32) -> bool {
    decode_snapshot(
        kind,
        &RegisterSnapshot::new(input_status, power_status, irq_status),
    )
}

/// [`decode`] over a whole snapshot.
pub fn decode_snapshot(kind: MonitorKind, snap: &RegisterSnapshot) -> bool {
    kind.conditions().iter().any(|c| c.holds(snap))
}

// ───────────────────────────────────────────────────────────────
// Edge-triggered state
// ───────────────────────────────────────────────────────────────

/// Per-monitor debounce state.  Starts de-asserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorState {
    kind: MonitorKind,
    last_fired: bool,
}

impl MonitorState {
    pub const fn new(kind: MonitorKind) -> Self {
        Self {
            kind,
            last_fired: false,
        }
    }

    pub fn kind(&self) -> MonitorKind {
        self.kind
    }

    pub fn last_fired(&self) -> bool {
        self.last_fired
    }

    /// Decode `snap` and record the result.
    /// Returns the new value only if it differs from the previous one.
    pub fn update(&mut self, snap: &RegisterSnapshot) -> Option<bool> {
        let fired = decode_snapshot(self.kind, snap);
        if fired == self.last_fired {
            return None;
        }
        self.last_fired = fired;
        Some(fired)
    }
}

/// A registered monitor: debounce state plus the host's notification sink.
pub struct Monitor<N> {
    state: MonitorState,
    sink: N,
}

impl<N: NotificationSink> Monitor<N> {
    pub fn new(kind: MonitorKind, sink: N) -> Self {
        Self {
            state: MonitorState::new(kind),
            sink,
        }
    }

    pub fn kind(&self) -> MonitorKind {
        self.state.kind
    }

    pub fn state(&self) -> bool {
        self.state.last_fired
    }

    /// Decode the tick's snapshot and publish on transition.
    pub fn update(&mut self, snap: &RegisterSnapshot) -> Option<bool> {
        let fired = self.state.update(snap)?;
        debug!(target: BINARY_TAG, "type: {}, {}", self.state.kind, snap);
        self.sink.publish_state(fired);
        Some(fired)
    }
}

/// Handle returned to the host when a monitor is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorHandle {
    pub(crate) slot: usize,
    pub(crate) kind: MonitorKind,
}

impl MonitorHandle {
    pub fn kind(&self) -> MonitorKind {
        self.kind
    }

    /// Registry slot the monitor occupies.
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn device_class(&self) -> &'static str {
        self.kind.device_class()
    }
}
