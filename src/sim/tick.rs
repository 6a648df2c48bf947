//! Frame driver
//!
//! Exactly one tick per display refresh: effects advance by the measured frame
//! time on their own clock, then the population moves (if active) and drains
//! its destruction queue.

use super::population::TickReport;
use super::state::DemoState;
use crate::consts::{FRAME_DT, MAX_FRAME_DT};

/// Advance the demo by one render frame. `dt` (seconds) only drives effects;
/// ball motion is per tick.
pub fn tick(state: &mut DemoState, dt: f32) -> TickReport {
    state.time_ticks += 1;

    state.population.advance_effects(dt);
    state.controls.advance_effects(dt);

    let active = state.controls.is_active();
    state.population.tick(active)
}

/// Measures the time between animation frames for the effect clock
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame at `time_ms` (requestAnimationFrame
    /// timestamp). Long stalls such as a hidden tab are clamped.
    pub fn frame_at(&mut self, time_ms: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => FRAME_DT,
        };
        self.last_time = Some(time_ms);
        dt.clamp(0.0, MAX_FRAME_DT)
    }
}

/// Run `ticks` frames back to back at the nominal refresh rate
pub fn run_for(state: &mut DemoState, ticks: u32) -> Vec<TickReport> {
    (0..ticks).map(|_| tick(state, FRAME_DT)).collect()
}
