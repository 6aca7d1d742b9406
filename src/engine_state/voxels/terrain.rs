//! # Terrain Generation
//!
//! Seeds a `VoxelStore` with the starting landscape before the first tick.
//!
//! The generator is a pure producer: it only ever calls `VoxelStore::place`, so the
//! store's rules (one block per cell, events for the render sync) apply to terrain
//! exactly as they do to player edits.
//!
//! Multiple strategies are supported:
//! - Random column heights (the default)
//! - Perlin noise for rolling hills
//! - Flat ground at the maximum height
//! - No terrain

use cgmath::Point3;
use noise::{NoiseFn, Perlin};

use super::{block::block_type::BlockType, world::VoxelStore};
use crate::config::{TerrainConfig, TerrainMethod};

/// Builds the starting terrain from a `TerrainConfig`.
pub struct TerrainGenerator {
    method: TerrainMethod,
    size: i32,
    max_height: i32,
    seed: u64,
    perlin_scale: f64,
}

impl TerrainGenerator {
    /// Creates a generator for the given settings.
    pub fn new(config: &TerrainConfig) -> Self {
        TerrainGenerator {
            method: config.method,
            size: config.size,
            max_height: config.max_height.max(1),
            seed: config.seed,
            perlin_scale: config.perlin_scale,
        }
    }

    /// Fills the store and returns the number of blocks placed.
    ///
    /// Columns cover `[-size, size)` on both X and Z. Each column is dirt with a
    /// single grass block on top. Cells that are already occupied are left alone.
    pub fn generate(&self, store: &mut VoxelStore) -> usize {
        let mut rng = fastrand::Rng::with_seed(self.seed);
        // Perlin takes a 32-bit seed; fold the upper half in so every bit matters.
        let perlin = Perlin::new((self.seed ^ (self.seed >> 32)) as u32);

        let mut placed = 0;
        for x in -self.size..self.size {
            for z in -self.size..self.size {
                let height = match self.method {
                    TerrainMethod::Random => rng.i32(1..=self.max_height),
                    TerrainMethod::Perlin => self.perlin_height(&perlin, x, z),
                    TerrainMethod::Flat => self.max_height,
                    TerrainMethod::Empty => 0,
                };
                placed += Self::fill_column(store, x, z, height);
            }
        }

        log::info!(
            "Generated {:?} terrain: {} blocks over {}x{} columns (seed {})",
            self.method,
            placed,
            2 * self.size,
            2 * self.size,
            self.seed
        );
        placed
    }

    /// Maps noise in `[-1, 1]` onto a column height in `1..=max_height`.
    fn perlin_height(&self, perlin: &Perlin, x: i32, z: i32) -> i32 {
        let sample = perlin.get([x as f64 * self.perlin_scale, z as f64 * self.perlin_scale]);
        let normalized = ((sample + 1.0) * 0.5).clamp(0.0, 1.0);
        1 + (normalized * (self.max_height - 1) as f64).round() as i32
    }

    fn fill_column(store: &mut VoxelStore, x: i32, z: i32, height: i32) -> usize {
        (0..height)
            .filter(|&y| {
                let block_type = if y == height - 1 {
                    BlockType::GRASS
                } else {
                    BlockType::DIRT
                };
                store.place(Point3::new(x, y, z), block_type)
            })
            .count()
    }
}
