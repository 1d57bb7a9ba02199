//! Kinematic player body with axis-separated collision
//!
//! Velocity is low-pass filtered towards the input direction, then the Y
//! displacement is resolved, then the X displacement from the already-updated
//! position. Resolving the axes independently gives sliding along walls.

use glam::Vec2;
use tracing::trace;
use vignette_world::OccupancyQuery;

use crate::appearance::{Appearance, AppearanceConfig};

use super::movement::{DirectionInput, MovementConfig};

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// The player's body in the world
#[derive(Debug, Clone)]
pub struct KinematicBody {
    /// Movement configuration
    pub config: MovementConfig,
    /// Direction flags, written by the input collaborator
    pub input: DirectionInput,
    /// Cosmetic breathing / facing state
    pub appearance: Appearance,
    position: Vec2,
    velocity: Vec2,
    drift_offset: f32,
}

impl KinematicBody {
    /// Create a body at `origin` with default movement config
    pub fn new(origin: Vec2) -> Self {
        Self::with_config(origin, MovementConfig::default())
    }

    /// Create a body with custom movement config
    pub fn with_config(origin: Vec2, config: MovementConfig) -> Self {
        Self {
            config,
            input: DirectionInput::default(),
            appearance: Appearance::new(AppearanceConfig::player()),
            position: origin,
            velocity: Vec2::ZERO,
            drift_offset: 0.0,
        }
    }

    /// Authoritative world position, valid until the next `update`
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Render position including the cosmetic vertical drift
    pub fn render_position(&self) -> Vec2 {
        self.position + Vec2::new(0.0, self.drift_offset)
    }

    /// Advance the body by `dt` seconds.
    ///
    /// While `suspended` (e.g. a dialogue is open) the body neither
    /// integrates nor moves; only the cosmetic state advances.
    pub fn update(&mut self, dt: f32, suspended: bool, world: &impl OccupancyQuery) {
        self.appearance.update(dt, self.velocity.x);

        if suspended {
            return;
        }

        let retention = self.config.retention(dt);
        let direction = self.input.vector();
        self.velocity =
            self.velocity * retention + direction * self.config.move_speed * (1.0 - retention);

        self.resolve_axis(Axis::Y, dt, world);
        self.resolve_axis(Axis::X, dt, world);

        self.drift_offset = self.appearance.drift(dt);
        trace!(
            "Body at ({:.3}, {:.3}) velocity ({:.3}, {:.3})",
            self.position.x,
            self.position.y,
            self.velocity.x,
            self.velocity.y
        );
    }

    /// Walk `move_steps` samples from the current position towards the
    /// desired end position on one axis, committing each free sample and
    /// stopping (with that velocity component zeroed) at the first blocked one.
    fn resolve_axis(&mut self, axis: Axis, dt: f32, world: &impl OccupancyQuery) {
        let start = self.position;
        let displacement = match axis {
            Axis::X => Vec2::new(self.velocity.x * dt, 0.0),
            Axis::Y => Vec2::new(0.0, self.velocity.y * dt),
        };
        let desired = start + displacement;
        let steps = self.config.move_steps.max(1);

        for i in 0..steps {
            let sample = start.lerp(desired, i as f32 / steps as f32);
            if world.collides_at(sample) {
                match axis {
                    Axis::X => self.velocity.x = 0.0,
                    Axis::Y => self.velocity.y = 0.0,
                }
                break;
            }
            self.position = sample;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_world() -> impl Fn(Vec2) -> bool {
        |_| false
    }

    #[test]
    fn test_body_creation() {
        let body = KinematicBody::new(Vec2::new(1.0, 2.0));
        assert_eq!(body.position(), Vec2::new(1.0, 2.0));
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_accelerates_towards_input() {
        let mut body = KinematicBody::new(Vec2::ZERO);
        body.input.right = true;
        let world = open_world();

        body.update(1.0 / 60.0, false, &world);
        assert!((body.velocity.x - 1.2 * 0.12).abs() < 1e-5);
        assert!(body.position().x > 0.0);
        assert_eq!(body.position().y, 0.0);

        for _ in 0..600 {
            body.update(1.0 / 60.0, false, &world);
        }
        assert!((body.velocity.x - 1.2).abs() < 1e-3);
    }

    #[test]
    fn test_friction_convergence() {
        let mut body = KinematicBody::new(Vec2::ZERO);
        body.velocity = Vec2::new(1.0, -0.5);
        let world = open_world();

        let mut previous = body.velocity.length();
        for _ in 0..200 {
            body.update(1.0 / 60.0, false, &world);
            let speed = body.velocity.length();
            assert!(speed < previous);
            assert!(speed > 0.0);
            previous = speed;
        }
        assert!(previous < 1e-6);
    }

    #[test]
    fn test_axis_separated_sliding() {
        let dt = 0.1;
        // Anything south of the starting row is a wall
        let wall = |p: Vec2| p.y > 0.0;

        let mut blocked = KinematicBody::new(Vec2::ZERO);
        blocked.velocity = Vec2::new(1.0, 1.0);
        blocked.update(dt, false, &wall);

        let mut free = KinematicBody::new(Vec2::ZERO);
        free.velocity = Vec2::new(1.0, 0.0);
        free.update(dt, false, &open_world());

        assert_eq!(blocked.position().y, 0.0);
        assert_eq!(blocked.velocity.y, 0.0);
        assert!(blocked.position().x > 0.0);
        assert!((blocked.position().x - free.position().x).abs() < 1e-6);
        assert!((blocked.velocity.x - free.velocity.x).abs() < 1e-6);
    }

    #[test]
    fn test_never_enters_blocked_position() {
        let wall = |p: Vec2| p.x >= 0.5;
        let mut body = KinematicBody::new(Vec2::ZERO);
        body.input.right = true;

        for _ in 0..1000 {
            body.update(1.0 / 60.0, false, &wall);
            assert!(!wall(body.position()));
        }
        assert!(body.position().x > 0.45);
    }

    #[test]
    fn test_sample_walk_stops_short_of_desired() {
        let mut body = KinematicBody::new(Vec2::ZERO);
        body.velocity = Vec2::new(0.0, -1.0);
        body.update(1.0, false, &open_world());
        // Ten samples at i/10 for i in 0..10: the last committed sample is 9/10
        assert!((body.position().y - (-0.88 * 0.9)).abs() < 1e-5);
    }

    #[test]
    fn test_suspended_body_does_not_move() {
        let mut body = KinematicBody::new(Vec2::ZERO);
        body.velocity = Vec2::new(1.0, 0.0);
        body.input.right = true;
        body.update(0.1, true, &open_world());
        assert_eq!(body.position(), Vec2::ZERO);
        assert_eq!(body.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_boxed_in_body_stays_put() {
        let mut body = KinematicBody::new(Vec2::ZERO);
        body.input.down = true;
        body.input.left = true;
        let solid = |_: Vec2| true;
        body.update(0.1, false, &solid);
        assert_eq!(body.position(), Vec2::ZERO);
        assert_eq!(body.velocity, Vec2::ZERO);
    }
}
