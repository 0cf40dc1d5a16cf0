//! # Camera State Management
//!
//! This module handles all camera-related functionality including:
//! - Following the player's eye position and orientation
//! - View and projection matrix calculations
//! - Picking rays for dig and place
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `Projection`: Manages the camera's projection matrix
//! - `CameraUniform`: GPU representation of camera data for shaders

use crate::engine_state::player::Player;
use crate::engine_state::raycast::Ray;

pub mod camera;

/// Manages the complete camera system.
///
/// # Fields
/// - `camera`: The current camera state (position, orientation)
/// - `projection`: The perspective used for rendering and screen picking
/// - `camera_uniform`: GPU-optimized camera data for shaders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: camera::Camera,
    /// The current perspective
    pub projection: camera::Projection,
    /// GPU-optimized camera data for shaders
    pub camera_uniform: camera::CameraUniform,
}

impl CameraState {
    /// Creates a new CameraState looking from the eye of `player`.
    ///
    /// # Arguments
    /// * `player` - The player the camera follows
    /// * `eye_height` - Height of the eye above the player's feet
    /// * `projection` - The initial camera projection settings
    pub fn new(player: &Player, eye_height: f32, projection: camera::Projection) -> Self {
        let camera = camera::Camera::from_player(player, eye_height);
        let mut camera_uniform = camera::CameraUniform::new();
        camera_uniform.update_view_proj_and_pos(&camera, &projection);

        CameraState {
            camera,
            projection,
            camera_uniform,
        }
    }

    /// Moves the camera to the player's eye and refreshes the uniform.
    ///
    /// This method should be called every step after physics has moved the player.
    pub fn update(&mut self, player: &Player, eye_height: f32) {
        self.camera = camera::Camera::from_player(player, eye_height);
        self.camera_uniform
            .update_view_proj_and_pos(&self.camera, &self.projection);
    }

    /// Updates the projection for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
        self.camera_uniform
            .update_view_proj_and_pos(&self.camera, &self.projection);
    }

    /// The first-person ray through the centre of the view.
    pub fn view_ray(&self) -> Ray {
        self.camera.view_ray()
    }

    /// The ray through a point of the viewport given in normalized device coordinates.
    pub fn screen_ray(&self, ndc_x: f32, ndc_y: f32) -> Option<Ray> {
        camera::screen_ray(&self.camera, &self.projection, ndc_x, ndc_y)
    }
}
