//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides conversion from the raw integer ids used by hotkeys and configuration,
//! name lookup, and the normalization rule for ids that fall outside the enumeration.

use std::{fmt, str::FromStr};

use num_derive::FromPrimitive;
use phf::phf_map;
use serde::{Deserialize, Serialize};

use super::{BlockTypeSize, BLOCK_TYPE_TO_COLOR};
use crate::error::VoxelError;

/// Enumerates all block types that can occupy a cell of the world.
///
/// Air is not a variant: an empty cell is simply absent from the grid. The discriminants
/// are the ids used by the hotbar (1-5), which is why they start at 1.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum BlockType {
    /// Beach and lake-bed surface.
    SAND = 1,

    /// Deep bedrock layer.
    ROCK = 2,

    /// Dry-land surface.
    GRASS = 3,

    /// Shallow layer between the surface and rock.
    DIRT = 4,

    /// Fills depressions up to the water level. Occupies its cell like any other block.
    WATER = 5,
}

/// Lowercase names (plus aliases) accepted by `BlockType::from_str`.
static BLOCK_TYPE_NAMES: phf::Map<&'static str, BlockType> = phf_map! {
    "sand" => BlockType::SAND,
    "rock" => BlockType::ROCK,
    "stone" => BlockType::ROCK,
    "grass" => BlockType::GRASS,
    "dirt" => BlockType::DIRT,
    "water" => BlockType::WATER,
};

impl BlockType {
    /// Every block type, in id order.
    pub const ALL: [BlockType; 5] = [
        BlockType::SAND,
        BlockType::ROCK,
        BlockType::GRASS,
        BlockType::DIRT,
        BlockType::WATER,
    ];

    /// The type invalid ids are normalized to (id 1).
    pub const DEFAULT: BlockType = BlockType::SAND;

    /// Converts a `BlockTypeSize` to a `BlockType`, rejecting ids outside the enumeration.
    ///
    /// # Errors
    /// Returns `VoxelError::InvalidBlockType` for 0 and for anything above 5.
    pub fn try_from_int(btype: BlockTypeSize) -> Result<Self, VoxelError> {
        num_traits::FromPrimitive::from_u8(btype).ok_or(VoxelError::InvalidBlockType(btype))
    }

    /// Converts a `BlockTypeSize` to a `BlockType`, normalizing invalid ids to
    /// `BlockType::DEFAULT`.
    ///
    /// # Examples
    /// ```
    /// use voxel_sandbox::BlockType;
    ///
    /// assert_eq!(BlockType::from_int_or_default(3), BlockType::GRASS);
    /// assert_eq!(BlockType::from_int_or_default(0), BlockType::DEFAULT);
    /// ```
    pub fn from_int_or_default(btype: BlockTypeSize) -> Self {
        Self::try_from_int(btype).unwrap_or(Self::DEFAULT)
    }

    /// The compact id of this type.
    pub fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// The canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::SAND => "sand",
            BlockType::ROCK => "rock",
            BlockType::GRASS => "grass",
            BlockType::DIRT => "dirt",
            BlockType::WATER => "water",
        }
    }

    /// RGBA display tint.
    pub fn color(self) -> [f32; 4] {
        BLOCK_TYPE_TO_COLOR[(self.id() - 1) as usize]
    }
}

impl Default for BlockType {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlockType {
    type Err = VoxelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BLOCK_TYPE_NAMES
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| VoxelError::UnknownBlockName(s.to_string()))
    }
}
