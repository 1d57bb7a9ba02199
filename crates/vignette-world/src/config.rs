//! World layer configuration

use serde::{Deserialize, Serialize};

/// How one raster channel contributes to collision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionLayer {
    /// Human-readable layer name (for logs)
    pub name: String,
    /// Normalized channel value a cell must exceed to be blocked
    pub threshold: f32,
    /// Extra rows north of a blocked cell that are also blocked
    pub thicken_up: u32,
}

impl CollisionLayer {
    pub fn new(name: impl Into<String>, threshold: f32, thicken_up: u32) -> Self {
        Self {
            name: name.into(),
            threshold,
            thicken_up,
        }
    }
}

/// World grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// World units per grid cell
    pub cell_size: f32,
    /// Half-width of the body footprint sampled by occupancy queries
    pub probe_half_width: f32,
    /// One entry per raster channel, in channel order
    pub layers: Vec<CollisionLayer>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            cell_size: 0.125,
            probe_half_width: 0.25,
            layers: vec![
                // Trees: a trunk pixel blocks seven rows in total
                CollisionLayer::new("trees", 0.01, 6),
                CollisionLayer::new("foliage", 1.0, 0),
                CollisionLayer::new("rocks", 1.0, 0),
            ],
        }
    }
}
