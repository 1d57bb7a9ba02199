//! Vignette World - the static collision world
//!
//! Loads the multi-channel world raster and derives the immutable occupancy
//! grid the player body collides against.

pub mod collision;
pub mod config;
mod error;
pub mod raster;

pub use collision::{CollisionField, OccupancyQuery};
pub use config::{CollisionLayer, WorldConfig};
pub use error::WorldError;
pub use raster::Raster;
