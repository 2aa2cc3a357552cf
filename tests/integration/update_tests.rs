//! Integration tests for the periodic update and the poll scheduler.

use axp192_monitor::app::events::PowerEvent;
use axp192_monitor::app::service::PowerService;
use axp192_monitor::config::PowerConfig;
use axp192_monitor::scheduler::{PollDelegate, PollScheduler};

use super::mock_hw::{EventLog, MockPmic, RecordingSensor};

#[test]
fn update_publishes_battery_level() {
    let mut svc: PowerService<RecordingSensor> = PowerService::new(PowerConfig::default());
    let mut hw = MockPmic::new();
    let mut log = EventLog::new();

    hw.battery_volts = 4.6;
    svc.update(&mut hw, &mut log);

    assert!(log.events.contains(&PowerEvent::BatteryLevel {
        percent: 100.0,
        volts: 4.6
    }));
}

#[test]
fn battery_level_can_be_disabled() {
    let config = PowerConfig {
        battery_level: false,
        ..PowerConfig::default()
    };
    let mut svc: PowerService<RecordingSensor> = PowerService::new(config);
    let mut hw = MockPmic::new();
    let mut log = EventLog::new();

    svc.update(&mut hw, &mut log);

    assert_eq!(
        log.count(|e| matches!(e, PowerEvent::BatteryLevel { .. })),
        0
    );
    assert_eq!(log.count(|e| matches!(e, PowerEvent::Diagnostics(_))), 1);
}

#[test]
fn diagnostics_decode_status_flags() {
    let mut svc: PowerService<RecordingSensor> = PowerService::new(PowerConfig::default());
    let mut hw = MockPmic::new();
    let mut log = EventLog::new();

    hw.set(0b0010_0100, 0b0100_1000, 0);
    hw.coulomb = (1000, 1000);
    hw.charge_ma = 120.5;
    svc.update(&mut hw, &mut log);

    let diag = log
        .events
        .iter()
        .find_map(|e| match e {
            PowerEvent::Diagnostics(d) => Some(*d),
            _ => None,
        })
        .expect("diagnostics emitted");
    assert!(!diag.ac_in);
    assert!(diag.vbus_in);
    assert!(diag.bat_charge);
    assert!(!diag.axp_overtemp);
    assert!(diag.charge_req);
    assert!(diag.bat_active);
    assert_eq!(diag.coulomb_mah, 0.0);
    assert_eq!(diag.charge_current_ma, 120.5);
}

#[test]
fn update_does_not_touch_monitors_or_backlight() {
    let mut svc = PowerService::new(PowerConfig::default());
    let sensor = RecordingSensor::new();
    svc.register_monitor(axp192_monitor::monitor::MonitorKind::Plugged, sensor.clone())
        .unwrap();
    let mut hw = MockPmic::new();
    let mut log = EventLog::new();

    hw.set(0b1000_0000, 0, 0);
    svc.update(&mut hw, &mut log);

    assert!(sensor.history().is_empty());
    assert!(hw.brightness_writes.is_empty());
    assert_eq!(svc.update_count(), 1);
}

// ── Scheduler-driven runs ─────────────────────────────────────

struct Runner {
    svc: PowerService<RecordingSensor>,
    hw: MockPmic,
    log: EventLog,
}

impl PollDelegate for Runner {
    fn on_loop(&mut self) {
        self.svc.on_tick(&mut self.hw, &mut self.log);
    }

    fn on_update(&mut self) {
        self.svc.update(&mut self.hw, &mut self.log);
    }
}

#[test]
fn scheduler_runs_loop_every_tick_and_update_per_interval() {
    let config = PowerConfig {
        loop_interval_ms: 100,
        update_interval_ms: 500,
        ..PowerConfig::default()
    };
    let mut sched = PollScheduler::from_config(&config);
    let mut runner = Runner {
        svc: PowerService::new(config),
        hw: MockPmic::new(),
        log: EventLog::new(),
    };

    for _ in 0..11 {
        sched.tick(&mut runner);
    }

    assert_eq!(runner.svc.tick_count(), 11);
    // First tick, then ticks 6 and 11.
    assert_eq!(runner.svc.update_count(), 3);
    assert_eq!(runner.hw.brightness_writes.len(), 1);
}
