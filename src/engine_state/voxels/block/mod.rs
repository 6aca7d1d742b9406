//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel sandbox.
//! It includes block type definitions, block face handling, and the block record itself.

use block_type::BlockType;
use cgmath::Point3;

pub mod block_side;
pub mod block_type;

/// Opaque reference to the visual object a render collaborator keeps for a block.
///
/// Handles are allocated by the voxel store when a block is placed and are never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(pub u64);

/// Represents a single voxel block in the world.
///
/// Blocks are immutable: changing a cell's type means removing the block and placing
/// a new one, which also replaces its visual handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Block {
    block_type: BlockType,
    handle: VisualHandle,
}

impl Block {
    /// Creates a new block of the specified type bound to a visual handle.
    pub fn new(block_type: BlockType, handle: VisualHandle) -> Self {
        Block { block_type, handle }
    }

    /// The type of this block.
    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    /// The handle of the visual object representing this block.
    pub fn handle(&self) -> VisualHandle {
        self.handle
    }
}

/// Returns the cell containing a continuous position.
///
/// Every occupancy decision in the sandbox goes through this floor.
pub fn cell_at(x: f32, y: f32, z: f32) -> Point3<i32> {
    Point3::new(x.floor() as i32, y.floor() as i32, z.floor() as i32)
}
