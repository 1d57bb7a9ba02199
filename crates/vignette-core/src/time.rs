//! Frame clock for the host render loop
//!
//! The simulation is driven by a variable delta-time tick. `GameTime` clamps
//! each raw delta so a long stall (window drag, debugger pause) cannot launch
//! the body through walls in a single step.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the frame clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// How many simulated seconds pass per real second
    pub time_scale: f32,
    /// Maximum delta time accepted for a single tick (seconds)
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_delta_time: 0.1,
        }
    }
}

/// Per-frame time tracking
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Simulated time since start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped and scaled)
    pub delta_time: f32,
    /// Clamped but unscaled delta time
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
}

impl GameTime {
    /// Create a new clock with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Advance the clock with the raw delta from the previous frame.
    ///
    /// Negative or NaN deltas, limits and scales from a hand-edited config
    /// all count as zero.
    pub fn update(&mut self, raw_delta: f32) {
        let max_delta = self.config.max_delta_time.max(0.0);
        self.unscaled_delta_time = raw_delta.max(0.0).min(max_delta);
        self.frame_count += 1;

        self.delta_time = self.unscaled_delta_time * self.config.time_scale.max(0.0);
        if !self.delta_time.is_finite() {
            self.delta_time = 0.0;
        }
        self.total_time += self.delta_time as f64;
    }

    /// The current frame delta as a `Duration`, for wall-clock style timers
    pub fn delta(&self) -> Duration {
        Duration::try_from_secs_f32(self.delta_time).unwrap_or_default()
    }
}
