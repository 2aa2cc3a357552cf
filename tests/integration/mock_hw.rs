//! Mock PMIC adapter for integration tests.
//!
//! Serves scripted register values and records every brightness write so
//! tests can assert on the full command history without a bus.

use std::cell::RefCell;
use std::rc::Rc;

use axp192_monitor::app::events::PowerEvent;
use axp192_monitor::app::ports::{BrightnessWriter, EventSink, NotificationSink, RegisterReader};
use axp192_monitor::snapshot::RegisterSnapshot;

// ── MockPmic ──────────────────────────────────────────────────

pub struct MockPmic {
    pub snapshot: RegisterSnapshot,
    pub battery_volts: f32,
    pub coulomb: (u32, u32),
    pub charge_ma: f32,
    pub discharge_ma: f32,
    pub brightness_writes: Vec<f32>,
    pub snapshot_reads: u32,
}

#[allow(dead_code)]
impl MockPmic {
    pub fn new() -> Self {
        Self {
            snapshot: RegisterSnapshot::default(),
            battery_volts: 3.7,
            coulomb: (0, 0),
            charge_ma: 0.0,
            discharge_ma: 0.0,
            brightness_writes: Vec::new(),
            snapshot_reads: 0,
        }
    }

    pub fn set(&mut self, input_status: u8, power_status: u8, irq_status: u32) {
        self.snapshot = RegisterSnapshot::new(input_status, power_status, irq_status);
    }

    pub fn last_write(&self) -> Option<f32> {
        self.brightness_writes.last().copied()
    }
}

impl Default for MockPmic {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterReader for MockPmic {
    fn read_input_status(&mut self) -> u8 {
        self.snapshot_reads += 1;
        self.snapshot.input_status
    }

    fn read_power_status(&mut self) -> u8 {
        self.snapshot.power_status
    }

    fn read_irq_status32(&mut self) -> u32 {
        self.snapshot.irq_status
    }

    fn read_battery_voltage(&mut self) -> f32 {
        self.battery_volts
    }

    fn read_coulomb_counters(&mut self) -> (u32, u32) {
        self.coulomb
    }

    fn read_charge_current(&mut self) -> f32 {
        self.charge_ma
    }

    fn read_discharge_current(&mut self) -> f32 {
        self.discharge_ma
    }
}

impl BrightnessWriter for MockPmic {
    fn write_screen_brightness(&mut self, level: f32) {
        self.brightness_writes.push(level);
    }
}

// ── RecordingSensor ───────────────────────────────────────────

/// Binary-sensor stand-in whose history stays visible to the test after
/// the sink has been moved into the service.
#[derive(Clone, Default)]
pub struct RecordingSensor {
    pub states: Rc<RefCell<Vec<bool>>>,
}

#[allow(dead_code)]
impl RecordingSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<bool> {
        self.states.borrow().clone()
    }
}

impl NotificationSink for RecordingSensor {
    fn publish_state(&mut self, state: bool) {
        self.states.borrow_mut().push(state);
    }
}

// ── EventLog ──────────────────────────────────────────────────

pub struct EventLog {
    pub events: Vec<PowerEvent>,
}

#[allow(dead_code)]
impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&PowerEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &PowerEvent) {
        self.events.push(event.clone());
    }
}
