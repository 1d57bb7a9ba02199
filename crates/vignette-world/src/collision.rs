//! Occupancy grid derived once from the world raster
//!
//! The field is built during world initialization and is immutable
//! afterwards. Grid cell `i` sits at world position
//! `((i % side) - side/2, (i / side) - side/2) * cell_size`; row 0 is the
//! northern edge of the map.

use glam::Vec2;
use tracing::{info, warn};

use crate::config::WorldConfig;
use crate::error::WorldError;
use crate::raster::Raster;

/// Answers "is the body blocked at this position?"
///
/// Implemented by [`CollisionField`] and by any `Fn(Vec2) -> bool`, so
/// movement code can be driven by a test predicate or by another host's
/// occupancy oracle.
pub trait OccupancyQuery {
    fn collides_at(&self, position: Vec2) -> bool;
}

impl<F> OccupancyQuery for F
where
    F: Fn(Vec2) -> bool,
{
    fn collides_at(&self, position: Vec2) -> bool {
        self(position)
    }
}

/// Square boolean occupancy grid
#[derive(Debug, Clone)]
pub struct CollisionField {
    side: u32,
    cell_size: f32,
    probe_half_width: f32,
    occupied: Vec<bool>,
}

impl CollisionField {
    /// Build the field from a raster, one channel per configured layer.
    ///
    /// A cell is blocked when any layer's normalized channel value exceeds
    /// that layer's threshold. Each blocked cell also blocks up to
    /// `thicken_up` cells directly north of it (clamped at row 0).
    pub fn build(raster: &Raster, config: &WorldConfig) -> Result<Self, WorldError> {
        if config.layers.len() > raster.channels() {
            return Err(WorldError::MissingChannels {
                layers: config.layers.len(),
                channels: raster.channels(),
            });
        }

        let side = raster.side() as usize;
        let mut occupied = vec![false; raster.cell_count()];

        for i in 0..raster.cell_count() {
            let row = i / side;
            for (channel, layer) in config.layers.iter().enumerate() {
                let t = raster.value(i, channel) as f32 / 255.0;
                if t <= layer.threshold {
                    continue;
                }
                occupied[i] = true;
                let reach = (layer.thicken_up as usize).min(row);
                for k in 1..=reach {
                    occupied[i - k * side] = true;
                }
            }
        }

        let field = Self {
            side: raster.side(),
            cell_size: config.cell_size,
            probe_half_width: config.probe_half_width,
            occupied,
        };
        info!(
            "Built {}x{} collision field ({} blocked cells, {} layers)",
            field.side,
            field.side,
            field.occupied_count(),
            config.layers.len()
        );
        Ok(field)
    }

    /// Build a field directly from row-major cell flags.
    pub fn from_cells(
        side: u32,
        cell_size: f32,
        probe_half_width: f32,
        occupied: Vec<bool>,
    ) -> Result<Self, WorldError> {
        let expected = side as usize * side as usize;
        if occupied.len() != expected {
            return Err(WorldError::DataLength {
                expected,
                actual: occupied.len(),
            });
        }
        Ok(Self {
            side,
            cell_size,
            probe_half_width,
            occupied,
        })
    }

    /// Number of blocked cells
    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|&&b| b).count()
    }

    /// Whether the cell at grid coordinates is blocked. Out of range is blocked.
    pub fn is_occupied(&self, col: i64, row: i64) -> bool {
        match self.index(col, row) {
            Some(i) => self.occupied[i],
            None => true,
        }
    }

    /// World position of the cell at flat index `i`
    pub fn cell_position(&self, i: usize) -> Vec2 {
        let side = self.side as usize;
        let half = self.half() as f32;
        Vec2::new(
            ((i % side) as f32 - half) * self.cell_size,
            ((i / side) as f32 - half) * self.cell_size,
        )
    }

    /// Grid column/row containing a world position (may be out of range).
    /// Non-finite coordinates map to `i64::MIN`.
    pub fn world_to_grid(&self, position: Vec2) -> (i64, i64) {
        (self.tile(position.x), self.tile(position.y))
    }

    fn half(&self) -> i64 {
        (self.side / 2) as i64
    }

    fn tile(&self, v: f32) -> i64 {
        let cell = (v / self.cell_size).floor();
        if !cell.is_finite() {
            return i64::MIN;
        }
        (cell as i64).saturating_add(self.half())
    }

    fn index(&self, col: i64, row: i64) -> Option<usize> {
        let side = self.side as i64;
        if col < 0 || row < 0 || col >= side || row >= side {
            return None;
        }
        Some((row * side + col) as usize)
    }
}

impl OccupancyQuery for CollisionField {
    /// Samples the row at `position.y` at both horizontal edges of the body.
    /// Leaving the mapped area fails closed.
    fn collides_at(&self, position: Vec2) -> bool {
        let row = self.tile(position.y);
        let left = self.tile(position.x - self.probe_half_width);
        let right = self.tile(position.x + self.probe_half_width);

        match (self.index(left, row), self.index(right, row)) {
            (Some(a), Some(b)) => self.occupied[a] || self.occupied[b],
            _ => {
                warn!("Occupancy query out of bounds at ({:.3}, {:.3})", position.x, position.y);
                true
            }
        }
    }
}
