//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides block type names, colors, and selector-slot lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Enumerates all block types that can occupy a cell.
///
/// Air is not a block type: an empty cell simply has no entry in the store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// A grass block, placed on top of every generated terrain column.
    GRASS,

    /// A basic dirt block, used below the grass layer.
    DIRT,

    /// A stone block, only available through placement.
    STONE,

    /// A wooden block, only available through placement.
    WOOD,
}

impl BlockType {
    /// Every block type, in block-selector order.
    pub const ALL: [BlockType; 4] = [
        BlockType::GRASS,
        BlockType::STONE,
        BlockType::WOOD,
        BlockType::DIRT,
    ];

    /// Returns the block type bound to the given selector slot (0-based).
    ///
    /// Slots follow the block-selector bar: grass, stone, wood, dirt.
    pub fn from_selector_slot(slot: usize) -> Option<Self> {
        Self::ALL.get(slot).copied()
    }

    /// Lowercase name used in configuration files and logs.
    pub fn name(&self) -> &'static str {
        match self {
            BlockType::GRASS => "grass",
            BlockType::DIRT => "dirt",
            BlockType::STONE => "stone",
            BlockType::WOOD => "wood",
        }
    }

    /// Display color as `0xRRGGBB`, used by render collaborators.
    pub fn color(&self) -> u32 {
        match self {
            BlockType::GRASS => 0x4CAF50,
            BlockType::STONE => 0x9E9E9E,
            BlockType::WOOD => 0x8D6E63,
            BlockType::DIRT => 0x795548,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(BlockType::GRASS, "grass")]
    #[test_case(BlockType::WOOD, "wood")]
    fn test_display_matches_name(block_type: BlockType, expected: &str) {
        assert_eq!(block_type.to_string(), expected);
        assert_eq!(block_type.name(), expected);
    }

    #[test]
    fn test_selector_slots_follow_toolbar_order() {
        assert_eq!(BlockType::from_selector_slot(0), Some(BlockType::GRASS));
        assert_eq!(BlockType::from_selector_slot(1), Some(BlockType::STONE));
        assert_eq!(BlockType::from_selector_slot(2), Some(BlockType::WOOD));
        assert_eq!(BlockType::from_selector_slot(3), Some(BlockType::DIRT));
        assert_eq!(BlockType::from_selector_slot(4), None);
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&BlockType::STONE).unwrap();
        assert_eq!(json, "\"stone\"");
        let parsed: BlockType = serde_json::from_str("\"wood\"").unwrap();
        assert_eq!(parsed, BlockType::WOOD);
    }
}
