//! Cosmetic sprite state: breathing scale, horizontal facing, drift
//!
//! Nothing here affects movement or collision.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Breathing and smoothing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppearanceConfig {
    /// Amplitude of the scale oscillation
    pub breathe_intensity: f32,
    /// Oscillation period divisor in seconds
    pub breathe_period: f32,
    /// Fraction of the distance to the target scale covered per update
    pub scale_smoothing: f32,
    /// Amplitude of the vertical drift (0 disables it)
    pub drift_intensity: f32,
    /// Drift period divisor in seconds
    pub drift_period: f32,
}

impl AppearanceConfig {
    /// Parameters for the player sprite
    pub fn player() -> Self {
        Self {
            breathe_intensity: 0.0035,
            breathe_period: 0.25,
            scale_smoothing: 0.3,
            drift_intensity: 0.5,
            drift_period: 0.5,
        }
    }

    /// Parameters for NPC sprites
    pub fn npc() -> Self {
        Self {
            breathe_intensity: 0.0018,
            breathe_period: 0.4,
            scale_smoothing: 0.3,
            drift_intensity: 0.0,
            drift_period: 1.0,
        }
    }
}

/// Animated sprite scale and facing
#[derive(Debug, Clone)]
pub struct Appearance {
    pub config: AppearanceConfig,
    base_scale: Vec2,
    scale: Vec2,
    facing: f32,
    lifetime: f32,
}

impl Appearance {
    pub fn new(config: AppearanceConfig) -> Self {
        Self::with_base_scale(config, Vec2::ONE)
    }

    pub fn with_base_scale(config: AppearanceConfig, base_scale: Vec2) -> Self {
        Self {
            config,
            base_scale,
            scale: base_scale,
            facing: 1.0,
            lifetime: 0.0,
        }
    }

    /// Current render scale; a negative `x` means the sprite is mirrored
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Whether the sprite faces left
    pub fn flipped(&self) -> bool {
        self.facing < 0.0
    }

    /// Advance the animation. `heading_x` picks the facing: negative faces
    /// left, positive faces right, zero keeps the previous facing.
    pub fn update(&mut self, dt: f32, heading_x: f32) {
        self.lifetime += dt;
        if heading_x < 0.0 {
            self.facing = -1.0;
        } else if heading_x > 0.0 {
            self.facing = 1.0;
        }

        let intensity = self.config.breathe_intensity;
        let period = self.config.breathe_period;
        let t = self.lifetime;
        let target = Vec2::new(
            (self.base_scale.x - intensity + (t / period).sin() * intensity * 2.0) * self.facing,
            self.base_scale.y - intensity + ((t - period / 2.0) / period).sin() * intensity * 2.0,
        );
        self.scale = self.scale.lerp(target, self.config.scale_smoothing);
    }

    /// Face towards a point `delta_x` away (left when negative, right otherwise)
    pub fn face_towards(&mut self, dt: f32, delta_x: f32) {
        self.update(dt, if delta_x < 0.0 { -1.0 } else { 1.0 });
    }

    /// Vertical drift offset for this frame
    pub fn drift(&self, dt: f32) -> f32 {
        self.config.drift_intensity * (self.lifetime / self.config.drift_period).sin() * dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breathing_stays_near_base() {
        let mut appearance = Appearance::new(AppearanceConfig::player());
        for _ in 0..300 {
            appearance.update(1.0 / 60.0, 0.0);
            let s = appearance.scale();
            assert!((s.x - 1.0).abs() < 0.01);
            assert!((s.y - 1.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_facing_follows_heading() {
        let mut appearance = Appearance::new(AppearanceConfig::npc());
        appearance.update(0.016, -0.3);
        assert!(appearance.flipped());

        // Zero heading keeps the previous facing
        appearance.update(0.016, 0.0);
        assert!(appearance.flipped());

        for _ in 0..30 {
            appearance.face_towards(0.016, 0.0);
        }
        assert!(!appearance.flipped());
        assert!(appearance.scale().x > 0.0);
    }

    #[test]
    fn test_npc_has_no_drift() {
        let mut appearance = Appearance::new(AppearanceConfig::npc());
        appearance.update(0.7, 0.0);
        assert_eq!(appearance.drift(0.016), 0.0);
    }
}
