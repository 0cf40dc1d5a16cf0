//! # Camera Implementation
//!
//! This module contains the core camera implementation including:
//! - Camera representation and transformations
//! - Projection matrix handling
//! - Unprojection of screen positions into world-space picking rays
//!
//! ## Key Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `Projection`: Manages perspective projection settings
//! - `CameraUniform`: Packed data structure for GPU shaders

use cgmath::*;

use crate::engine_state::player::Player;
use crate::engine_state::raycast::Ray;

/// Transformation matrix to convert from OpenGL's coordinate system to WGPU's.
///
/// NDC range from -1 to 1 in X and Y, and 0 to 1 in Z. This matrix scales the Z
/// coordinate from [-1, 1] to [-0.5, 0.5] and then translates it to [0, 1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Represents a first-person camera in 3D space.
///
/// The camera does not move on its own. It is placed at the player's eye every step.
///
/// # Fields
/// - `position`: The camera's position in world space
/// - `yaw`: Horizontal rotation (around Y axis) in radians
/// - `pitch`: Vertical rotation (around X axis) in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation (around X axis) in radians
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial position of the camera in world space. Can be any type that converts to `Point3<f32>`.
    /// * `yaw` - Initial yaw (horizontal rotation around Y axis). Can be any type that converts to `Rad<f32>`.
    /// * `pitch` - Initial pitch (vertical rotation around X axis). Can be any type that converts to `Rad<f32>`.
    ///
    /// # Returns
    /// A new `Camera` instance with the specified position and orientation.
    ///
    /// # Example
    /// ```rust
    /// use cgmath::{Deg, Point3};
    /// use voxel_sandbox::engine_state::camera_state::camera::Camera;
    ///
    /// let camera = Camera::new(
    ///     Point3::new(0.0, 0.0, 0.0),  // Position at origin
    ///     Deg(0.0),                     // Facing along positive X
    ///     Deg(0.0),                     // Level horizon
    /// );
    /// assert!((camera.get_view_vec().x - 1.0).abs() < 1e-6);
    /// ```
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        }
    }

    /// Places a camera at the eye of `player`, looking where the player looks.
    ///
    /// # Arguments
    /// * `player` - The player whose view is taken
    /// * `eye_height` - Height of the eye above the feet
    pub fn from_player(player: &Player, eye_height: f32) -> Self {
        Self::new(player.eye_position(eye_height), player.yaw, player.pitch)
    }

    /// Gets the camera's forward direction vector.
    ///
    /// # Returns
    /// A normalized 3D vector representing the camera's forward direction
    pub fn get_view_vec(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }

    /// Calculates the view matrix for this camera.
    ///
    /// The view matrix transforms world coordinates to view (camera) space.
    ///
    /// # Returns
    /// A 4x4 view matrix that can be used for rendering
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.get_view_vec(), Vector3::unit_y())
    }

    /// The ray from the eye along the view direction, used for dig and place.
    pub fn view_ray(&self) -> Ray {
        Ray::new(self.position, self.get_view_vec())
    }
}

/// Represents a camera's projection matrix and related parameters.
///
/// It manages the aspect ratio, field of view, and near/far clipping planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Aspect ratio (width / height)
    aspect: f32,
    /// Vertical field of view in radians
    fovy: Rad<f32>,
    /// Near clipping plane distance
    znear: f32,
    /// Far clipping plane distance
    zfar: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `width` - Viewport width in pixels
    /// * `height` - Viewport height in pixels
    /// * `fovy` - Vertical field of view (can be any type convertible to `Rad<f32>`)
    /// * `znear` - Near clipping plane distance
    /// * `zfar` - Far clipping plane distance
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: aspect_ratio(width, height),
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Updates the projection's aspect ratio for viewport resizing.
    ///
    /// # Arguments
    /// * `width` - New viewport width in pixels
    /// * `height` - New viewport height in pixels
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    /// Width over height.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Calculates the projection matrix.
    ///
    /// Combines the perspective projection with the OpenGL to WGPU coordinate system transform.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

impl Default for Projection {
    /// 16:9 viewport, 45 degree field of view, clipping at 0.1 and 100.
    fn default() -> Self {
        Self::new(1280, 720, Deg(45.0), 0.1, 100.0)
    }
}

// A zero height would make the projection singular.
fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

/// Unprojects a point on the screen into a world-space ray.
///
/// `ndc_x` and `ndc_y` are normalized device coordinates in `[-1, 1]`, with `(0, 0)` at
/// the centre of the viewport and +Y up. The ray starts on the near plane and points
/// towards the matching point on the far plane.
///
/// # Returns
/// `None` when the view-projection matrix cannot be inverted.
pub fn screen_ray(camera: &Camera, projection: &Projection, ndc_x: f32, ndc_y: f32) -> Option<Ray> {
    let view_proj = projection.calc_matrix() * camera.calc_matrix();
    let inverse = view_proj.invert()?;

    let unproject = |depth: f32| {
        let clip = inverse * Vector4::new(ndc_x, ndc_y, depth, 1.0);
        Point3::from_homogeneous(clip)
    };
    let near = unproject(0.0);
    let far = unproject(1.0);
    Some(Ray::new(near, far - near))
}

/// GPU-friendly representation of camera data for shaders.
///
/// This struct is used to pass camera data to a renderer in a format that matches
/// the layout expected by shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    // We can't use cgmath with bytemuck directly so we'll have to convert the Matrix4 into a 4x4 f32 array
    view_proj: [[f32; 4]; 4],
    position: [f32; 4],
}

impl CameraUniform {
    /// Creates a new camera uniform with an identity matrix and zero position.
    pub fn new() -> Self {
        Self {
            view_proj: Matrix4::identity().into(),
            position: [0.0, 0.0, 0.0, 0.0],
        }
    }

    /// Updates the view-projection matrix and position based on the current camera state.
    ///
    /// # Arguments
    /// * `camera` - The camera to get view matrix and position from
    /// * `projection` - The projection to use
    pub fn update_view_proj_and_pos(&mut self, camera: &Camera, projection: &Projection) {
        let viewproj = projection.calc_matrix() * camera.calc_matrix();
        self.view_proj = viewproj.into();
        let pos3: [f32; 3] = camera.position.into();

        self.position = [pos3[0], pos3[1], pos3[2], 0.0];
    }

    /// The combined view-projection matrix.
    pub fn view_proj(&self) -> Matrix4<f32> {
        self.view_proj.into()
    }

    /// The eye position.
    pub fn position(&self) -> Point3<f32> {
        Point3::new(self.position[0], self.position[1], self.position[2])
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_follows_the_player_eye() {
        let mut player = Player::new(Point3::new(1.0, 2.0, 3.0));
        player.rotate(Deg(90.0), Deg(0.0));
        let camera = Camera::from_player(&player, 1.6);
        assert!((camera.position.y - 3.6).abs() < 1e-6);
        assert!((camera.get_view_vec() - player.view_direction()).magnitude() < 1e-5);
    }

    #[test]
    fn centre_of_screen_looks_along_the_view() {
        let camera = Camera::new(Point3::new(0.0, 5.0, 0.0), Deg(30.0), Deg(-20.0));
        let ray = screen_ray(&camera, &Projection::default(), 0.0, 0.0).unwrap();
        assert!((ray.direction - camera.get_view_vec()).magnitude() < 1e-2);
        // The near plane is 0.1 in front of the eye.
        assert!((ray.origin - camera.position).magnitude() < 0.2);
    }

    #[test]
    fn top_of_screen_looks_higher() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        let ray = screen_ray(&camera, &Projection::default(), 0.0, 1.0).unwrap();
        assert!(ray.direction.y > 0.0);
    }

    #[test]
    fn uniform_is_plain_old_data() {
        let mut uniform = CameraUniform::new();
        let camera = Camera::new(Point3::new(1.0, 2.0, 3.0), Deg(0.0), Deg(0.0));
        uniform.update_view_proj_and_pos(&camera, &Projection::default());
        let bytes: &[u8] = bytemuck::bytes_of(&uniform);
        assert_eq!(bytes.len(), std::mem::size_of::<CameraUniform>());
        assert_eq!(uniform.position(), camera.position);
    }

    #[test]
    fn zero_height_viewport_keeps_a_finite_aspect() {
        let mut projection = Projection::default();
        projection.resize(800, 0);
        assert!(projection.aspect().is_finite());
    }
}
