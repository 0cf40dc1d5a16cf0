//! # Player Module
//!
//! The first-person player: its state, its collision box, and the physics that moves it
//! through the voxel grid.
//!
//! ## Key Components
//! - `Player`: feet position, velocity, heading and the grounded/dead flags
//! - `aabb`: the axis-aligned box used to test the body against grid cells
//! - `physics`: per-step integration with axis-separated collision response

use cgmath::{Angle, Deg, Point3, Rad, Vector3, Zero};

pub mod aabb;
pub mod physics;

/// Pitch is clamped to this many degrees either side of the horizon.
pub const PITCH_LIMIT: Deg<f32> = Deg(89.0);

/// The simulated player.
///
/// Created once at the start of a session and mutated every step. Death only sets a flag;
/// the player is never removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Position of the feet (bottom centre of the body).
    pub position: Point3<f32>,
    /// Velocity in blocks per second.
    pub velocity: Vector3<f32>,
    /// Heading around the Y axis, kept in `[0, 360)`. Zero looks down +X.
    pub yaw: Deg<f32>,
    /// Elevation, clamped to `[-89, 89]`.
    pub pitch: Deg<f32>,
    /// Whether a block supported the body during the last step.
    pub grounded: bool,
    /// Set once the player falls below the fatal height.
    pub dead: bool,
    spawn: Point3<f32>,
}

impl Player {
    /// Creates a player standing at `spawn`, looking along +X.
    pub fn new(spawn: Point3<f32>) -> Self {
        Self {
            position: spawn,
            velocity: Vector3::zero(),
            yaw: Deg(0.0),
            pitch: Deg(0.0),
            grounded: false,
            dead: false,
            spawn,
        }
    }

    /// The position the player was created at and respawns to.
    pub fn spawn_point(&self) -> Point3<f32> {
        self.spawn
    }

    /// Puts the player back at the spawn point, alive and at rest.
    pub fn respawn(&mut self) {
        *self = Self::new(self.spawn);
    }

    /// Whether the player is still alive.
    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// Turns the view, wrapping yaw and clamping pitch.
    pub fn rotate(&mut self, yaw_delta: Deg<f32>, pitch_delta: Deg<f32>) {
        self.yaw = (self.yaw + yaw_delta).normalize();
        let pitch = (self.pitch + pitch_delta).0;
        self.pitch = Deg(pitch.clamp(-PITCH_LIMIT.0, PITCH_LIMIT.0));
    }

    /// Horizontal unit vector the player walks along.
    pub fn forward(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = Rad::from(self.yaw).0.sin_cos();
        Vector3::new(yaw_cos, 0.0, yaw_sin)
    }

    /// Horizontal unit vector to the player's right.
    pub fn right(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = Rad::from(self.yaw).0.sin_cos();
        Vector3::new(-yaw_sin, 0.0, yaw_cos)
    }

    /// Unit vector the camera looks along, including pitch.
    pub fn view_direction(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = Rad::from(self.yaw).0.sin_cos();
        let (pitch_sin, pitch_cos) = Rad::from(self.pitch).0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin)
    }

    /// Camera position for a given eye height above the feet.
    pub fn eye_position(&self, eye_height: f32) -> Point3<f32> {
        self.position + Vector3::new(0.0, eye_height, 0.0)
    }
}
