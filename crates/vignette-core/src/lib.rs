//! Vignette Core - shared types for the vignette crates
//!
//! - Mathematical primitives (re-exported from glam)
//! - Frame clock for the variable delta-time render loop

pub mod time;

pub use glam::Vec2;
pub use time::{GameTime, TimeConfig};
