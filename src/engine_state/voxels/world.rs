//! # World Module
//!
//! This module provides the `VoxelGrid`, the single source of truth for world occupancy.
//!
//! ## Architecture
//!
//! The grid uses a sparse storage approach where only occupied cells are kept in memory.
//! A coordinate that is absent from the map is air and is traversable, never an error.
//! This allows for a logically unbounded world without any bounds checking.
//!
//! ## Performance Considerations
//!
//! - Lookup, insertion and removal are O(1) using a hash map
//! - Iteration order is unspecified; renderers must not depend on it

use std::collections::HashMap;

use cgmath::Point3;

use super::block::{block_type::BlockType, BlockTypeSize};

/// Integer address of one unit cell of the world grid.
///
/// Cells are centred on their coordinate: the block at `(0, 0, 0)` spans `[-0.5, 0.5]`
/// on every axis, so rounding a world-space point yields the cell containing it.
pub type BlockCoordinate = Point3<i32>;

/// The cell containing a world-space point: each axis is rounded to the nearest integer.
pub fn block_containing(point: Point3<f32>) -> BlockCoordinate {
    Point3::new(
        point.x.round() as i32,
        point.y.round() as i32,
        point.z.round() as i32,
    )
}

/// A sparse mapping from block coordinate to block type.
///
/// Every stored coordinate maps to exactly one valid `BlockType`; invalid raw ids are
/// normalized on the way in (see [`VoxelGrid::set_from_int`]).
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_sandbox::{BlockType, VoxelGrid};
///
/// let mut world = VoxelGrid::new();
/// world.set(Point3::new(0, 0, 0), BlockType::GRASS);
/// assert_eq!(world.get(Point3::new(0, 0, 0)), Some(BlockType::GRASS));
///
/// world.remove(Point3::new(0, 0, 0));
/// world.remove(Point3::new(0, 0, 0));
/// assert!(world.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoxelGrid {
    blocks: HashMap<BlockCoordinate, BlockType>,
}

impl VoxelGrid {
    /// Creates a new, empty world.
    pub fn new() -> Self {
        VoxelGrid {
            blocks: HashMap::new(),
        }
    }

    /// Returns the block type stored at `coord`, or `None` for air.
    pub fn get(&self, coord: BlockCoordinate) -> Option<BlockType> {
        self.blocks.get(&coord).copied()
    }

    /// Inserts or overwrites the block at `coord`.
    ///
    /// Always succeeds; repeating the same call leaves the grid unchanged.
    ///
    /// # Returns
    /// The block type previously stored at `coord`, if any.
    pub fn set(&mut self, coord: BlockCoordinate, block_type: BlockType) -> Option<BlockType> {
        self.blocks.insert(coord, block_type)
    }

    /// Inserts a block from a raw id, normalizing ids outside the enumeration to
    /// `BlockType::DEFAULT`.
    ///
    /// # Returns
    /// The block type actually stored.
    pub fn set_from_int(&mut self, coord: BlockCoordinate, btype: BlockTypeSize) -> BlockType {
        let block_type = BlockType::from_int_or_default(btype);
        self.blocks.insert(coord, block_type);
        block_type
    }

    /// Deletes the block at `coord`. Removing an empty cell is a no-op.
    ///
    /// # Returns
    /// The removed block type, or `None` if the cell was already air.
    pub fn remove(&mut self, coord: BlockCoordinate) -> Option<BlockType> {
        self.blocks.remove(&coord)
    }

    /// Whether `coord` is occupied.
    pub fn contains(&self, coord: BlockCoordinate) -> bool {
        self.blocks.contains_key(&coord)
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the world has no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Removes every block.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Keeps only the blocks for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(BlockCoordinate, BlockType) -> bool,
    {
        self.blocks.retain(|coord, block_type| keep(*coord, *block_type));
    }

    /// Iterates over all occupied cells in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockCoordinate, BlockType)> + '_ {
        self.blocks.iter().map(|(coord, block_type)| (*coord, *block_type))
    }

    /// Finds the topmost occupied cell of column `(x, z)` within `min_y..=max_y`.
    pub fn highest_in_column(
        &self,
        x: i32,
        z: i32,
        min_y: i32,
        max_y: i32,
    ) -> Option<(BlockCoordinate, BlockType)> {
        (min_y..=max_y).rev().find_map(|y| {
            let coord = Point3::new(x, y, z);
            self.get(coord).map(|block_type| (coord, block_type))
        })
    }
}

impl Extend<(BlockCoordinate, BlockType)> for VoxelGrid {
    fn extend<T: IntoIterator<Item = (BlockCoordinate, BlockType)>>(&mut self, iter: T) {
        self.blocks.extend(iter);
    }
}

impl FromIterator<(BlockCoordinate, BlockType)> for VoxelGrid {
    fn from_iter<T: IntoIterator<Item = (BlockCoordinate, BlockType)>>(iter: T) -> Self {
        VoxelGrid {
            blocks: iter.into_iter().collect(),
        }
    }
}
