//! Player body module
//!
//! Provides the top-down kinematic body and its movement tuning.

mod body;
mod movement;

pub use body::KinematicBody;
pub use movement::{DirectionInput, FrictionMode, MovementConfig};
