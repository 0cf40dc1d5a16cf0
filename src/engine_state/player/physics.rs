//! # Physics Module
//!
//! Integrates the player's motion one step at a time and resolves collisions against the
//! voxel grid.
//!
//! ## Step order
//!
//! 1. Look input rotates the view.
//! 2. Falling below the fatal height marks the player dead.
//! 3. While alive, movement keys set the horizontal velocity along the current heading and
//!    the turn keys rotate yaw. While dead the horizontal velocity is zero.
//! 4. A grounded, living player may jump.
//! 5. Gravity is applied, dead or alive.
//! 6. The displacement is integrated one axis at a time in the order Y, X, Z. Each axis is
//!    tested against the grid on its own, so a blocked axis never stops the others.
//!
//! ## Resolution
//!
//! With [`CollisionResolution::Revert`] a colliding axis keeps its old coordinate. With
//! [`CollisionResolution::Clamp`] the body moves up to the face it ran into, and a falling
//! body that already overlaps its support is lifted onto it.

use cgmath::{Deg, InnerSpace, Point3, Vector3, Zero};
use serde::{Deserialize, Serialize};
use web_time::Duration;

use super::aabb::{colliding_blocks, resting_support, Aabb, CONTACT_EPSILON};
use super::Player;
use crate::config::PhysicsConfig;
use crate::engine_state::voxels::world::{BlockCoordinate, VoxelGrid};

const Y_AXIS: usize = 1;

/// Axes are resolved in this order.
const AXIS_ORDER: [usize; 3] = [Y_AXIS, 0, 2];

/// How a displacement that ends inside an occupied cell is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionResolution {
    /// Discard the whole displacement on that axis.
    Revert,
    /// Advance to the contact face.
    #[default]
    Clamp,
}

/// Movement intent for one step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementInput {
    /// Walk along the heading.
    pub forward: bool,
    /// Walk against the heading.
    pub backward: bool,
    /// Strafe left.
    pub left: bool,
    /// Strafe right.
    pub right: bool,
    /// Rotate the heading counter-clockwise.
    pub turn_left: bool,
    /// Rotate the heading clockwise.
    pub turn_right: bool,
    /// Jump if standing on something.
    pub jump: bool,
    /// Pointer motion since the last step, `(dx, dy)`.
    pub look_delta: (f32, f32),
}

impl MovementInput {
    fn horizontal_axes(&self) -> (f32, f32) {
        let axis = |positive: bool, negative: bool| (positive as i32 - negative as i32) as f32;
        (
            axis(self.forward, self.backward),
            axis(self.right, self.left),
        )
    }
}

/// What happened during a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhysicsReport {
    /// Collision per axis, indexed X, Y, Z.
    pub collided: [bool; 3],
    /// The player died during this step.
    pub died: bool,
}

/// Moves a [`Player`] through a [`VoxelGrid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    config: PhysicsConfig,
}

impl PhysicsBody {
    /// Creates a physics body with the given constants.
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// The active constants.
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// The collision box of a body whose feet are at `feet`.
    pub fn body_at(&self, feet: Point3<f32>) -> Aabb {
        Aabb::from_feet(feet, self.config.half_width, self.config.height)
    }

    /// Advances `player` by `dt`, clamped to the configured maximum.
    ///
    /// # Arguments
    /// * `player` - The player to move
    /// * `world` - The grid to collide against
    /// * `input` - Held movement keys and pointer motion for this step
    /// * `dt` - Elapsed time since the previous step
    pub fn step(
        &self,
        player: &mut Player,
        world: &VoxelGrid,
        input: &MovementInput,
        dt: Duration,
    ) -> PhysicsReport {
        let config = &self.config;
        let dt = dt.as_secs_f32().min(config.max_dt);
        let mut report = PhysicsReport::default();

        let (look_x, look_y) = input.look_delta;
        if look_x != 0.0 || look_y != 0.0 {
            player.rotate(
                Deg(look_x * config.look_sensitivity),
                Deg(-look_y * config.look_sensitivity),
            );
        }

        if player.position.y < config.fatal_y && !player.dead {
            player.dead = true;
            report.died = true;
            log::info!("player fell to {:.2} and died", player.position.y);
        }

        if player.dead {
            player.velocity.x = 0.0;
            player.velocity.z = 0.0;
        } else {
            let turn = (input.turn_right as i32 - input.turn_left as i32) as f32;
            if turn != 0.0 {
                player.rotate(Deg(turn * config.turn_speed * dt), Deg(0.0));
            }

            let (ahead, aside) = input.horizontal_axes();
            let mut horizontal = player.forward() * ahead + player.right() * aside;
            if horizontal.magnitude2() > 0.0 {
                horizontal = horizontal.normalize() * config.move_speed;
            } else {
                horizontal = Vector3::zero();
            }
            player.velocity.x = horizontal.x;
            player.velocity.z = horizontal.z;

            if input.jump && player.grounded {
                player.velocity.y = config.jump_speed;
                player.grounded = false;
            }
        }

        player.velocity.y -= config.gravity * dt;

        for axis in AXIS_ORDER {
            report.collided[axis] = self.resolve_axis(player, world, axis, dt);
        }

        report
    }

    /// Moves `player` along one axis and resolves any collision.
    ///
    /// # Returns
    /// Whether the displacement ran into an occupied cell.
    fn resolve_axis(&self, player: &mut Player, world: &VoxelGrid, axis: usize, dt: f32) -> bool {
        let displacement = player.velocity[axis] * dt;
        if displacement == 0.0 {
            return false;
        }

        let original = player.position[axis];
        let moved = original + displacement;
        player.position[axis] = moved;

        let body = self.body_at(player.position);
        let hits = colliding_blocks(world, &body);
        if hits.is_empty() {
            if axis != Y_AXIS {
                return false;
            }
            // A fall smaller than the contact margin never reaches the supporting cell.
            let support = if displacement < 0.0 {
                resting_support(world, &body)
            } else {
                None
            };
            let Some(top) = support else {
                player.grounded = false;
                return false;
            };
            player.position[axis] = match self.config.resolution {
                CollisionResolution::Revert => original,
                CollisionResolution::Clamp => top,
            };
            player.velocity[axis] = 0.0;
            player.grounded = true;
            return true;
        }

        player.position[axis] = match self.config.resolution {
            CollisionResolution::Revert => original,
            CollisionResolution::Clamp => self.contact_coordinate(axis, original, moved, &hits),
        };
        player.velocity[axis] = 0.0;
        if axis == Y_AXIS && displacement < 0.0 {
            player.grounded = true;
        }
        true
    }

    /// The furthest coordinate along `axis` between `original` and `moved` at which the
    /// body touches, but does not enter, the blocks in `hits`.
    ///
    /// Blocks the body already overlapped before moving cannot be contacted and are
    /// ignored, except when falling: then the highest block reaching below the feet is
    /// the support, and the feet are put on top of it.
    fn contact_coordinate(
        &self,
        axis: usize,
        original: f32,
        moved: f32,
        hits: &[BlockCoordinate],
    ) -> f32 {
        let centres = hits.iter().map(|coord| coord[axis] as f32);
        let (lo, hi) = if axis == Y_AXIS {
            (0.0, self.config.height)
        } else {
            (-self.config.half_width, self.config.half_width)
        };

        if moved > original {
            centres
                .map(|c| c - 0.5)
                .filter(|near| *near >= original + hi - CONTACT_EPSILON)
                .reduce(f32::min)
                .map_or(original, |near| (near - hi).clamp(original, moved))
        } else if axis == Y_AXIS {
            centres
                .filter(|c| c - 0.5 < original)
                .map(|c| c + 0.5)
                .reduce(f32::max)
                .unwrap_or(original)
        } else {
            centres
                .map(|c| c + 0.5)
                .filter(|far| *far <= original + lo + CONTACT_EPSILON)
                .reduce(f32::max)
                .map_or(original, |far| (far - lo).clamp(moved, original))
        }
    }
}
