//! Axis-aligned bounding boxes and their overlap with grid cells.

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::world::{BlockCoordinate, VoxelGrid};

/// Boxes that merely touch a cell face are not considered overlapping. Extents are pulled
/// inwards by this much before rounding to cells.
pub const CONTACT_EPSILON: f32 = 1e-4;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f32>,
    /// Maximum corner.
    pub max: Point3<f32>,
}

impl Aabb {
    /// Create new AABB from min/max points
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// The body box of a player: `half_width` either side of the feet on X and Z,
    /// `height` upwards from the feet on Y.
    pub fn from_feet(feet: Point3<f32>, half_width: f32, height: f32) -> Self {
        Self {
            min: Point3::new(feet.x - half_width, feet.y, feet.z - half_width),
            max: Point3::new(feet.x + half_width, feet.y + height, feet.z + half_width),
        }
    }

    /// The unit cube occupied by a block.
    pub fn of_block(coord: BlockCoordinate) -> Self {
        let centre = Point3::new(coord.x as f32, coord.y as f32, coord.z as f32);
        let half = Vector3::new(0.5, 0.5, 0.5);
        Self {
            min: centre - half,
            max: centre + half,
        }
    }

    /// Create translated copy of AABB
    pub fn translated(&self, offset: Vector3<f32>) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Strict overlap test; boxes sharing only a face do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// The inclusive range of cells the box could overlap, found by rounding each extent.
    pub fn cell_range(&self) -> (BlockCoordinate, BlockCoordinate) {
        let round_in = |lo: f32, hi: f32| {
            (
                (lo + CONTACT_EPSILON).round() as i32,
                (hi - CONTACT_EPSILON).round() as i32,
            )
        };
        let (min_x, max_x) = round_in(self.min.x, self.max.x);
        let (min_y, max_y) = round_in(self.min.y, self.max.y);
        let (min_z, max_z) = round_in(self.min.z, self.max.z);
        (
            Point3::new(min_x, min_y, min_z),
            Point3::new(max_x, max_y, max_z),
        )
    }

    /// Every cell in [`Aabb::cell_range`].
    pub fn overlapping_cells(&self) -> impl Iterator<Item = BlockCoordinate> {
        let (lo, hi) = self.cell_range();
        (lo.x..=hi.x).flat_map(move |x| {
            (lo.y..=hi.y).flat_map(move |y| (lo.z..=hi.z).map(move |z| Point3::new(x, y, z)))
        })
    }
}

/// Occupied cells overlapping `aabb`.
pub fn colliding_blocks(world: &VoxelGrid, aabb: &Aabb) -> Vec<BlockCoordinate> {
    aabb.overlapping_cells()
        .filter(|coord| world.contains(*coord))
        .collect()
}

/// Whether any occupied cell overlaps `aabb`.
pub fn collides(world: &VoxelGrid, aabb: &Aabb) -> bool {
    aabb.overlapping_cells().any(|coord| world.contains(coord))
}

/// The top face the box is resting on, if any.
///
/// A box whose bottom lies within [`CONTACT_EPSILON`] of an occupied cell's top face is
/// supported by it even though [`Aabb::cell_range`] leaves that cell out.
pub fn resting_support(world: &VoxelGrid, aabb: &Aabb) -> Option<f32> {
    let below = (aabb.min.y - 0.5).round() as i32;
    let top = below as f32 + 0.5;
    if (aabb.min.y - top).abs() > CONTACT_EPSILON {
        return None;
    }

    let (lo, hi) = aabb.cell_range();
    let supported = (lo.x..=hi.x)
        .flat_map(|x| (lo.z..=hi.z).map(move |z| Point3::new(x, below, z)))
        .any(|coord| world.contains(coord));
    supported.then_some(top)
}
