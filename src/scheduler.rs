//! Poll scheduler.
//!
//! The host drives the component with two cadences: a fast loop (monitors
//! and backlight) and a slow polling update (battery level, diagnostics).
//! The scheduler counts loop ticks and notifies a [`PollDelegate`]; it knows
//! nothing about the service or the bus.
//!
//! ```text
//!   main loop ──tick()──▶ PollScheduler ──on_loop()────▶ PowerService::on_tick
//!                                       ──on_update()──▶ PowerService::update
//! ```

use log::info;

use crate::config::PowerConfig;
use crate::TAG;

/// Receives scheduler callbacks.
pub trait PollDelegate {
    /// Called on every tick.
    fn on_loop(&mut self);

    /// Called on the first tick and then once per update interval, after
    /// that tick's [`on_loop`](Self::on_loop).
    fn on_update(&mut self);
}

/// Tick-counting scheduler for the loop / update cadences.
pub struct PollScheduler {
    /// Loop ticks per update.
    update_every: u32,
    /// Ticks since the last update.
    elapsed: u32,
    started: bool,
    enabled: bool,
}

impl PollScheduler {
    pub fn new(update_every: u32) -> Self {
        Self {
            update_every: update_every.max(1),
            elapsed: 0,
            started: false,
            enabled: true,
        }
    }

    pub fn from_config(config: &PowerConfig) -> Self {
        let sched = Self::new(config.update_every_ticks());
        info!(
            target: TAG,
            "Scheduler: loop every {}ms, update every {} ticks",
            config.loop_interval_ms, sched.update_every
        );
        sched
    }

    /// Enable or disable the periodic update.  The loop always runs.
    pub fn set_update_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Advance one loop tick.
    pub fn tick(&mut self, delegate: &mut dyn PollDelegate) {
        delegate.on_loop();

        if !self.enabled {
            return;
        }

        if !self.started {
            self.started = true;
            self.elapsed = 0;
            delegate.on_update();
            return;
        }

        self.elapsed += 1;
        if self.elapsed >= self.update_every {
            self.elapsed = 0;
            delegate.on_update();
        }
    }

    /// Ticks until the next update fires.
    pub fn ticks_until_update(&self) -> u32 {
        if self.started {
            self.update_every - self.elapsed
        } else {
            0
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
