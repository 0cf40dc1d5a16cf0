//! # Raycast Module
//!
//! Finds the first occupied cell along a ray and performs the dig/place edits.
//!
//! Two strategies are available:
//!
//! * **Fixed step** samples the ray at regular increments and rounds each sample to a cell.
//!   A block is placed into the cell two samples back from the hit. Geometry thinner than
//!   the step can be tunnelled through.
//! * **Grid traversal** (DDA) visits every cell the ray crosses exactly once, so nothing is
//!   skipped, and places into the last empty cell visited before the hit.
//!
//! A ray that reaches its maximum distance without hitting anything is a normal outcome
//! ([`RaycastOutcome::Miss`]), not an error.

use cgmath::{InnerSpace, Point3, Vector3, Zero};
use serde::{Deserialize, Serialize};

use super::voxels::{
    block::{block_side::BlockSide, block_type::BlockType},
    world::{BlockCoordinate, VoxelGrid},
};
use crate::config::RaycastConfig;

mod fixed_step;
mod grid_traversal;

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Point3<f32>,
    /// Unit direction, or zero for a degenerate ray.
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Creates a ray, normalizing `direction`. A zero direction stays zero and the ray
    /// then never hits anything.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        let length = direction.magnitude();
        let direction = if length > 0.0 && length.is_finite() {
            direction / length
        } else {
            Vector3::zero()
        };
        Self { origin, direction }
    }

    /// The point `distance` units along the ray.
    pub fn point_at(&self, distance: f32) -> Point3<f32> {
        self.origin + self.direction * distance
    }

    /// Whether the direction is zero.
    pub fn is_degenerate(&self) -> bool {
        self.direction.is_zero()
    }
}

/// The first occupied cell found along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The occupied cell.
    pub block: BlockCoordinate,
    /// What occupies it.
    pub block_type: BlockType,
    /// Where a placed block would go. For fixed-step this is the cell of the sample two
    /// steps back and may equal `block`; for grid traversal it is the last empty cell
    /// visited, or `None` when the ray starts inside `block`.
    pub previous: Option<BlockCoordinate>,
    /// The face the ray entered through (grid traversal only).
    pub face: Option<BlockSide>,
    /// Distance from the origin at which the cell was found.
    pub distance: f32,
}

/// Ray sampling strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaycastStrategy {
    /// Fixed increments with the two-step placement lookback.
    FixedStep,
    /// Cell-by-cell traversal.
    #[default]
    GridTraversal,
}

/// The edit requested by a primary or secondary action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// Remove the first block hit.
    Dig,
    /// Put a block of the given type next to the first block hit.
    Place(BlockType),
}

/// Result of applying an edit along a ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaycastOutcome {
    /// A block was removed.
    Dug {
        /// The emptied cell.
        coord: BlockCoordinate,
        /// What used to be there.
        block_type: BlockType,
    },
    /// A block was inserted.
    Placed {
        /// The filled cell.
        coord: BlockCoordinate,
        /// The inserted type.
        block_type: BlockType,
    },
    /// A block was hit but the placement cell was already occupied (or did not exist);
    /// the grid is unchanged.
    Obstructed {
        /// The cell that was hit.
        hit: BlockCoordinate,
        /// The cell the block would have gone into.
        target: Option<BlockCoordinate>,
    },
    /// Nothing was hit within range; the grid is unchanged.
    Miss,
}

impl RaycastOutcome {
    /// Whether the grid was modified.
    pub fn changed_world(&self) -> bool {
        matches!(
            self,
            RaycastOutcome::Dug { .. } | RaycastOutcome::Placed { .. }
        )
    }
}

/// Performs picks and edits against a [`VoxelGrid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raycaster {
    config: RaycastConfig,
}

impl Raycaster {
    /// Creates a raycaster with the given step, range and strategy.
    pub fn new(config: RaycastConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &RaycastConfig {
        &self.config
    }

    /// Finds the first occupied cell along `ray` without modifying the grid.
    pub fn cast(&self, world: &VoxelGrid, ray: &Ray) -> Option<RayHit> {
        match self.config.strategy {
            RaycastStrategy::FixedStep => {
                fixed_step::march(world, ray, self.config.step, self.config.max_distance)
            }
            RaycastStrategy::GridTraversal => {
                grid_traversal::traverse(world, ray, self.config.max_distance)
            }
        }
    }

    /// Applies `action` to the first occupied cell along `ray`.
    ///
    /// # Examples
    /// ```
    /// use cgmath::{Point3, Vector3};
    /// use voxel_sandbox::{
    ///     BlockType, EditAction, RaycastConfig, RaycastOutcome, Raycaster, Ray, VoxelGrid,
    /// };
    ///
    /// let mut world = VoxelGrid::new();
    /// world.set(Point3::new(0, 0, 0), BlockType::ROCK);
    ///
    /// let raycaster = Raycaster::new(RaycastConfig::default());
    /// let ray = Ray::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
    /// let outcome = raycaster.apply(&mut world, &ray, EditAction::Place(BlockType::SAND));
    /// assert_eq!(
    ///     outcome,
    ///     RaycastOutcome::Placed { coord: Point3::new(0, 1, 0), block_type: BlockType::SAND }
    /// );
    /// ```
    pub fn apply(&self, world: &mut VoxelGrid, ray: &Ray, action: EditAction) -> RaycastOutcome {
        let Some(hit) = self.cast(world, ray) else {
            log::debug!("{:?} missed from {:?}", action, ray.origin);
            return RaycastOutcome::Miss;
        };

        match action {
            EditAction::Dig => {
                world.remove(hit.block);
                log::debug!("dug {} at {:?}", hit.block_type, hit.block);
                RaycastOutcome::Dug {
                    coord: hit.block,
                    block_type: hit.block_type,
                }
            }
            EditAction::Place(block_type) => match hit.previous {
                Some(target) if !world.contains(target) => {
                    world.set(target, block_type);
                    log::debug!("placed {} at {:?}", block_type, target);
                    RaycastOutcome::Placed {
                        coord: target,
                        block_type,
                    }
                }
                target => RaycastOutcome::Obstructed {
                    hit: hit.block,
                    target,
                },
            },
        }
    }
}
