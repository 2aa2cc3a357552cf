//! Integration tests for the backlight gate: desired level → scaled write.

use axp192_monitor::app::events::PowerEvent;
use axp192_monitor::app::service::PowerService;
use axp192_monitor::config::PowerConfig;

use super::mock_hw::{EventLog, MockPmic, RecordingSensor};

fn make_service(brightness: f32) -> PowerService<RecordingSensor> {
    let config = PowerConfig {
        brightness,
        ..PowerConfig::default()
    };
    PowerService::new(config)
}

#[test]
fn first_tick_writes_initial_brightness() {
    let mut svc = make_service(1.0);
    let mut hw = MockPmic::new();
    let mut log = EventLog::new();

    assert_eq!(svc.applied_brightness(), None);
    svc.on_tick(&mut hw, &mut log);

    assert_eq!(hw.brightness_writes, vec![12.0]);
    assert_eq!(svc.applied_brightness(), Some(1.0));
    assert!(log.events.contains(&PowerEvent::BrightnessApplied {
        desired: 1.0,
        native: 12.0
    }));
}

#[test]
fn same_desired_value_writes_at_most_once() {
    let mut svc = make_service(1.0);
    let mut hw = MockPmic::new();
    let mut log = EventLog::new();

    svc.set_desired_brightness(0.5);
    svc.on_tick(&mut hw, &mut log);
    svc.on_tick(&mut hw, &mut log);

    assert_eq!(hw.brightness_writes, vec![9.5]);
}

#[test]
fn change_between_ticks_is_applied_on_next_tick() {
    let mut svc = make_service(0.0);
    let mut hw = MockPmic::new();
    let mut log = EventLog::new();

    svc.on_tick(&mut hw, &mut log);
    assert_eq!(hw.last_write(), Some(7.0));

    svc.set_desired_brightness(1.0);
    svc.set_desired_brightness(0.5);
    svc.on_tick(&mut hw, &mut log);

    // Only the value present at tick time is written.
    assert_eq!(hw.brightness_writes, vec![7.0, 9.5]);
}

#[test]
fn setting_back_to_applied_value_is_gated() {
    let mut svc = make_service(0.5);
    let mut hw = MockPmic::new();
    let mut log = EventLog::new();

    svc.on_tick(&mut hw, &mut log);
    svc.set_desired_brightness(0.8);
    svc.set_desired_brightness(0.5);
    svc.on_tick(&mut hw, &mut log);

    assert_eq!(hw.brightness_writes, vec![9.5]);
}

#[test]
fn light_output_drives_the_gate() {
    let mut svc = make_service(1.0);
    let mut hw = MockPmic::new();
    let mut log = EventLog::new();
    let mut light = svc.backlight();

    assert!(light.traits().supports(axp192_monitor::light::ColorMode::Brightness));

    svc.on_tick(&mut hw, &mut log);
    light.write_state(0.0);
    svc.on_tick(&mut hw, &mut log);

    assert_eq!(hw.brightness_writes, vec![12.0, 7.0]);
}

#[test]
fn handle_is_shared_across_threads() {
    let mut svc = make_service(1.0);
    let mut hw = MockPmic::new();
    let mut log = EventLog::new();
    let handle = svc.brightness_handle();

    std::thread::spawn(move || handle.set(0.5)).join().unwrap();
    svc.on_tick(&mut hw, &mut log);

    assert_eq!(hw.brightness_writes, vec![9.5]);
}

#[test]
fn handle_rejects_nan_and_clamps_out_of_range() {
    let mut svc = make_service(1.0);
    let mut hw = MockPmic::new();
    let mut log = EventLog::new();
    let handle = svc.brightness_handle();

    svc.on_tick(&mut hw, &mut log);
    handle.set(f32::NAN);
    for _ in 0..3 {
        svc.on_tick(&mut hw, &mut log);
    }
    assert_eq!(hw.brightness_writes, vec![12.0]);

    handle.set(0.0);
    svc.on_tick(&mut hw, &mut log);
    handle.set(1.7);
    svc.on_tick(&mut hw, &mut log);

    assert_eq!(hw.brightness_writes, vec![12.0, 7.0, 12.0]);
    assert_eq!(svc.applied_brightness(), Some(1.0));
}
