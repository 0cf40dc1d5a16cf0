//! # Block Module
//!
//! This module provides the block-related definitions for the voxel sandbox:
//! the closed set of block types, the six faces of a block, and the display tint
//! handed to renderers for each type.

use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types outside the core
/// (hotkeys, configuration, render instances).
pub type BlockTypeSize = u8;

/// Maps each block type to an RGBA tint.
///
/// Indexed by `BlockType::id() - 1`, so the order must follow the enum discriminants:
/// [SAND, ROCK, GRASS, DIRT, WATER]
pub static BLOCK_TYPE_TO_COLOR: [[f32; 4]; 5] = [
    [0.93, 0.86, 0.55, 1.0], // SAND
    [0.50, 0.50, 0.52, 1.0], // ROCK
    [0.30, 0.75, 0.25, 1.0], // GRASS
    [0.55, 0.38, 0.22, 1.0], // DIRT
    [0.20, 0.40, 0.90, 0.7], // WATER
];

/// Gets the display tint for a block given its type as an integer.
///
/// Invalid ids are normalized to `BlockType::DEFAULT` first, the same way the grid does.
pub fn get_color_from_int(btype_int: BlockTypeSize) -> [f32; 4] {
    BlockType::from_int_or_default(btype_int).color()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_table_covers_every_type() {
        for block_type in BlockType::ALL {
            assert_eq!(
                block_type.color(),
                BLOCK_TYPE_TO_COLOR[(block_type.id() - 1) as usize]
            );
        }
    }

    #[test]
    fn invalid_ids_use_default_color() {
        assert_eq!(get_color_from_int(0), BlockType::DEFAULT.color());
        assert_eq!(get_color_from_int(42), BlockType::DEFAULT.color());
    }
}
