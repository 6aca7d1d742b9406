//! # World Query Module
//!
//! Read-only questions the physics asks the voxel store: is a point inside a solid
//! cell, where does a column's resting surface sit, and does a player footprint
//! overlap anything at a candidate position.
//!
//! All answers are computed on floored integer coordinates, so the store stays the
//! only source of truth for what is solid.

use cgmath::Point3;

use super::{block::cell_at, world::VoxelStore};

/// Highest cell inspected by the ground scan.
pub const DEFAULT_GROUND_SCAN_TOP: i32 = 10;

/// Borrowed view over a `VoxelStore` answering occupancy queries.
#[derive(Copy, Clone)]
pub struct WorldQuery<'a> {
    store: &'a VoxelStore,
    ground_scan_top: i32,
}

impl<'a> WorldQuery<'a> {
    /// Creates a query view using the default ground scan bound.
    pub fn new(store: &'a VoxelStore) -> Self {
        Self::with_scan_top(store, DEFAULT_GROUND_SCAN_TOP)
    }

    /// Creates a query view whose ground scan starts at `ground_scan_top`.
    pub fn with_scan_top(store: &'a VoxelStore, ground_scan_top: i32) -> Self {
        WorldQuery {
            store,
            ground_scan_top,
        }
    }

    /// Returns `true` if the cell containing the point is solid.
    pub fn is_solid(&self, x: f32, y: f32, z: f32) -> bool {
        self.store.has(cell_at(x, y, z))
    }

    /// Returns the height of the surface an object in this column rests on.
    ///
    /// The column at floored `(x, z)` is scanned from the scan top down to `y = 0`.
    /// The first solid cell found at `y` yields `y + 1`; an empty column yields the
    /// world floor, `0`. Scanning top-down makes the highest block win.
    pub fn ground_height(&self, x: f32, z: f32) -> i32 {
        let block_x = x.floor() as i32;
        let block_z = z.floor() as i32;

        (0..=self.ground_scan_top)
            .rev()
            .find(|&y| self.store.has(Point3::new(block_x, y, block_z)))
            .map_or(0, |y| y + 1)
    }

    /// Tests a player footprint against the world.
    ///
    /// Four points are sampled at `±radius` along X and along Z around the
    /// candidate center, all in the floored vertical cell of `position.y`. Any
    /// solid sample is a collision. This approximates a cylinder with a point
    /// cloud; it is not a box sweep.
    pub fn collides_at(&self, position: Point3<f32>, radius: f32) -> bool {
        let Point3 { x, y, z } = position;
        let samples = [
            (x + radius, z),
            (x - radius, z),
            (x, z + radius),
            (x, z - radius),
        ];

        samples
            .iter()
            .any(|&(sample_x, sample_z)| self.is_solid(sample_x, y, sample_z))
    }
}
