//! Movement configuration and constants

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How the per-tick friction factor relates to elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FrictionMode {
    /// `velocity *= friction` once per tick regardless of `dt`.
    /// Deceleration therefore depends on the display refresh rate.
    PerTick,
    /// `velocity *= friction.powf(dt * reference_rate)`: identical to
    /// `PerTick` at `reference_rate` ticks per second, independent of it otherwise.
    TimeScaled { reference_rate: f32 },
}

/// Movement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Terminal speed under sustained input, in world units per second
    pub move_speed: f32,
    /// Fraction of velocity retained per tick (0..1)
    pub friction: f32,
    /// Interpolation samples per axis when resolving collisions
    pub move_steps: u32,
    /// Friction time coupling
    pub friction_mode: FrictionMode,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 1.2,
            friction: 0.88,
            move_steps: 10,
            friction_mode: FrictionMode::PerTick,
        }
    }
}

impl MovementConfig {
    /// Velocity retention factor for a tick of length `dt`
    pub fn retention(&self, dt: f32) -> f32 {
        match self.friction_mode {
            FrictionMode::PerTick => self.friction,
            FrictionMode::TimeScaled { reference_rate } => {
                self.friction.powf(dt * reference_rate)
            }
        }
    }
}

/// The four directional input flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionInput {
    /// Unit (or zero) direction. Opposing flags cancel; up is -Y (north).
    pub fn vector(&self) -> Vec2 {
        let x = match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        let y = match (self.up, self.down) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        Vec2::new(x, y).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_cancels_and_normalizes() {
        let both = DirectionInput { up: true, down: true, ..Default::default() };
        assert_eq!(both.vector(), Vec2::ZERO);

        let diagonal = DirectionInput { up: true, right: true, ..Default::default() };
        let v = diagonal.vector();
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!(v.x > 0.0 && v.y < 0.0);

        let all = DirectionInput { up: true, down: true, left: true, right: true };
        assert_eq!(all.vector(), Vec2::ZERO);
    }

    #[test]
    fn test_retention_modes() {
        let per_tick = MovementConfig::default();
        assert_eq!(per_tick.retention(1.0 / 30.0), 0.88);

        let scaled = MovementConfig {
            friction_mode: FrictionMode::TimeScaled { reference_rate: 60.0 },
            ..Default::default()
        };
        assert!((scaled.retention(1.0 / 60.0) - 0.88).abs() < 1e-5);
        assert!((scaled.retention(1.0 / 30.0) - 0.88 * 0.88).abs() < 1e-5);
    }
}
