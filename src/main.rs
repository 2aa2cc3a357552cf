//! AXP192 monitor firmware — main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                   │
//! │                                                            │
//! │  Axp192Bus (I2cDriver)   LogEventSink   LogNotificationSink│
//! │  (RegisterReader +       (EventSink)    (per monitor)      │
//! │   BrightnessWriter)                                        │
//! │                                                            │
//! │  ──────────────── Port Trait Boundary ───────────────────  │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │          PowerService (pure logic)                   │  │
//! │  │  Monitors · Backlight gate · Battery estimate        │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! │                                                            │
//! │  PollScheduler (loop every tick, update every interval)    │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{info, warn};

use axp192_monitor::adapters::i2c::Axp192Bus;
use axp192_monitor::adapters::log_sink::{LogEventSink, LogNotificationSink};
use axp192_monitor::app::service::PowerService;
use axp192_monitor::config::PowerConfig;
use axp192_monitor::scheduler::{PollDelegate, PollScheduler};

/// Board configuration (M5StickC-style wiring).
const BOARD_CONFIG: &str = r#"{
    "brightness": 1.0,
    "update_interval_ms": 60000,
    "loop_interval_ms": 16,
    "monitors": ["PLUGGED", "CHARGING", "OVERTEMP", "LOW_BATTERY", "CRITICAL_BATTERY", "CHARGED"]
}"#;

// ── Poll delegate ─────────────────────────────────────────────
//
// Bridges the scheduler (which knows nothing about the bus) to the
// service entry points.

struct Runner<'d> {
    service: PowerService<LogNotificationSink>,
    bus: Axp192Bus<I2cDriver<'d>>,
    sink: LogEventSink,
}

impl PollDelegate for Runner<'_> {
    fn on_loop(&mut self) {
        self.service.on_tick(&mut self.bus, &mut self.sink);
    }

    fn on_update(&mut self) {
        self.service.update(&mut self.bus, &mut self.sink);
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("AXP192 monitor v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = match PowerConfig::from_json(BOARD_CONFIG) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Board config rejected ({}), using defaults", e);
            PowerConfig::default()
        }
    };

    // ── 3. Bus ────────────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let i2c_config = I2cConfig::new().baudrate(Hertz(400_000));
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21,
        peripherals.pins.gpio22,
        &i2c_config,
    )?;
    let mut bus = Axp192Bus::new(i2c, config.i2c_address);
    bus.probe()?;

    // ── 4. Service + monitors ─────────────────────────────────
    let mut scheduler = PollScheduler::from_config(&config);
    let loop_ms = config.loop_interval_ms;
    let mut service = PowerService::new(config);
    service.register_configured(LogNotificationSink::new);
    service.dump_config();

    let mut runner = Runner {
        service,
        bus,
        sink: LogEventSink::new(),
    };

    // ── 5. Main loop ──────────────────────────────────────────
    loop {
        scheduler.tick(&mut runner);
        FreeRtos::delay_ms(loop_ms);
    }
}
