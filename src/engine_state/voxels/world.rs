//! # World Module
//!
//! This module provides the `VoxelStore`, the sparse block store that is the single
//! source of truth for which cells are solid.
//!
//! ## Architecture
//!
//! The store is a sparse map from integer cell coordinates to `Block` records. A
//! coordinate is either absent (air) or holds exactly one block. Blocks are never
//! updated in place.
//!
//! ## Render Collaboration
//!
//! The store never touches visuals directly. Every successful `place` or `remove`
//! appends a `WorldEvent` to a pending queue; the render sync drains that queue and
//! asks its collaborator to create or destroy the matching visual object. This keeps
//! the store usable headless, in tests, or with several worlds side by side.
//!
//! ## Performance Considerations
//!
//! - Lookup, insert and removal are O(1) using a hash map
//! - Events are buffered until the next sync, so bulk terrain generation stays cheap

use std::collections::HashMap;

use cgmath::Point3;

use super::block::{block_type::BlockType, Block, VisualHandle};

/// A change to the store that a render collaborator has to mirror.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WorldEvent {
    /// A block was created; a visual object should be created for it.
    Placed {
        /// The cell that became solid
        coord: Point3<i32>,
        /// The type of the new block
        block_type: BlockType,
        /// The handle the new block is bound to
        handle: VisualHandle,
    },
    /// A block was destroyed; its visual object should be discarded.
    Removed {
        /// The cell that became empty
        coord: Point3<i32>,
        /// The handle of the destroyed block
        handle: VisualHandle,
    },
}

/// Sparse store of every block in the world.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_sandbox::engine_state::voxels::{block::block_type::BlockType, world::VoxelStore};
///
/// let mut store = VoxelStore::new();
/// assert!(store.place(Point3::new(0, 0, 0), BlockType::GRASS));
/// assert!(!store.place(Point3::new(0, 0, 0), BlockType::STONE));
/// assert_eq!(store.get(Point3::new(0, 0, 0)).unwrap().block_type(), BlockType::GRASS);
/// ```
#[derive(Debug, Default)]
pub struct VoxelStore {
    blocks: HashMap<Point3<i32>, Block>,
    pending_events: Vec<WorldEvent>,
    next_handle: u64,
    bounds: Option<CellBounds>,
}

/// Inclusive box of cells that covers every block ever placed since the store
/// was last empty.
///
/// Removing a block does not shrink the box, so it may be larger than the
/// occupied extent but never smaller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellBounds {
    pub min: Point3<i32>,
    pub max: Point3<i32>,
}

impl CellBounds {
    fn around(coord: Point3<i32>) -> Self {
        CellBounds {
            min: coord,
            max: coord,
        }
    }

    fn include(&mut self, coord: Point3<i32>) {
        self.min = Point3::new(
            self.min.x.min(coord.x),
            self.min.y.min(coord.y),
            self.min.z.min(coord.z),
        );
        self.max = Point3::new(
            self.max.x.max(coord.x),
            self.max.y.max(coord.y),
            self.max.z.max(coord.z),
        );
    }

    /// Returns `true` if the cell lies inside the box.
    pub fn contains(&self, coord: Point3<i32>) -> bool {
        (self.min.x..=self.max.x).contains(&coord.x)
            && (self.min.y..=self.max.y).contains(&coord.y)
            && (self.min.z..=self.max.z).contains(&coord.z)
    }
}

impl VoxelStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        VoxelStore {
            blocks: HashMap::new(),
            pending_events: Vec::new(),
            next_handle: 0,
            bounds: None,
        }
    }

    /// Returns `true` if the cell holds a block.
    pub fn has(&self, coord: Point3<i32>) -> bool {
        self.blocks.contains_key(&coord)
    }

    /// Returns the block at the cell, if any.
    pub fn get(&self, coord: Point3<i32>) -> Option<&Block> {
        self.blocks.get(&coord)
    }

    /// Places a block of the given type.
    ///
    /// Does nothing and returns `false` if the cell is already occupied. Otherwise
    /// the block is created, a `WorldEvent::Placed` is queued for the render
    /// collaborator, and `true` is returned.
    pub fn place(&mut self, coord: Point3<i32>, block_type: BlockType) -> bool {
        if self.blocks.contains_key(&coord) {
            log::debug!(
                "place {} at {:?} ignored: cell occupied",
                block_type,
                coord
            );
            return false;
        }

        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;

        self.blocks.insert(coord, Block::new(block_type, handle));
        self.bounds = Some(match self.bounds {
            Some(mut bounds) => {
                bounds.include(coord);
                bounds
            }
            None => CellBounds::around(coord),
        });
        self.pending_events.push(WorldEvent::Placed {
            coord,
            block_type,
            handle,
        });
        true
    }

    /// Removes the block at the cell.
    ///
    /// Does nothing and returns `false` if the cell is empty. Otherwise the block is
    /// destroyed, a `WorldEvent::Removed` is queued, and `true` is returned.
    pub fn remove(&mut self, coord: Point3<i32>) -> bool {
        match self.blocks.remove(&coord) {
            Some(block) => {
                if self.blocks.is_empty() {
                    self.bounds = None;
                }
                self.pending_events.push(WorldEvent::Removed {
                    coord,
                    handle: block.handle(),
                });
                true
            }
            None => {
                log::debug!("remove at {:?} ignored: cell empty", coord);
                false
            }
        }
    }

    /// Number of solid cells.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if no cell is solid.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// A box containing every solid cell, or `None` if the store is empty.
    pub fn bounds(&self) -> Option<CellBounds> {
        self.bounds
    }

    /// Iterates over every solid cell and its block, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Point3<i32>, &Block)> {
        self.blocks.iter()
    }

    /// Takes every event queued since the last drain, in the order they happened.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Number of events waiting for the render sync.
    pub fn pending_event_count(&self) -> usize {
        self.pending_events.len()
    }
}
