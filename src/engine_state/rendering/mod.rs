//! Rendering boundary for the voxel engine.
//!
//! The simulation never draws anything itself. After each step it lends a read-only
//! [`RenderFrame`] to a [`Renderer`] collaborator, which may draw it, record it, or copy
//! it into a [`RenderSnapshot`] for use on another thread. A renderer failure is reported
//! back as an error value and never stops the simulation.

use cgmath::{Deg, Point3};

use super::camera_state::camera::CameraUniform;
use super::voxels::{
    block::{block_type::BlockType, get_color_from_int},
    world::{BlockCoordinate, VoxelGrid},
};
use crate::error::VoxelResult;

/// Per-block instance data, laid out for upload to a GPU instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VoxelInstance {
    /// Centre of the block in world space
    pub position: [f32; 3],
    /// Block type id
    pub block_type: u32,
    /// RGBA tint
    pub color: [f32; 4],
}

impl VoxelInstance {
    /// Builds the instance for the block `block_type` at `coord`.
    pub fn new(coord: BlockCoordinate, block_type: BlockType) -> Self {
        Self {
            position: [coord.x as f32, coord.y as f32, coord.z as f32],
            block_type: block_type.id() as u32,
            color: get_color_from_int(block_type.id()),
        }
    }
}

/// What a renderer needs to know about the player to place the camera and draw a HUD.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlayerView {
    /// Feet position
    pub position: Point3<f32>,
    /// Heading
    pub yaw: Deg<f32>,
    /// Elevation
    pub pitch: Deg<f32>,
    /// Whether the player is dead
    pub dead: bool,
}

/// A borrowed view of one simulated frame.
#[derive(Clone, Copy, Debug)]
pub struct RenderFrame<'a> {
    /// Index of the step that produced this frame
    pub frame: u64,
    /// Camera data for the frame
    pub camera: CameraUniform,
    /// Player state for camera placement and overlays
    pub player: PlayerView,
    /// The block type that would be placed next
    pub selected_block: BlockType,
    world: &'a VoxelGrid,
}

impl<'a> RenderFrame<'a> {
    /// Creates a frame borrowing `world`.
    pub fn new(
        frame: u64,
        world: &'a VoxelGrid,
        camera: CameraUniform,
        player: PlayerView,
        selected_block: BlockType,
    ) -> Self {
        Self {
            frame,
            camera,
            player,
            selected_block,
            world,
        }
    }

    /// Every occupied cell, in no particular order.
    pub fn voxels(&self) -> impl Iterator<Item = (BlockCoordinate, BlockType)> + 'a {
        self.world.iter()
    }

    /// Number of occupied cells.
    pub fn voxel_count(&self) -> usize {
        self.world.len()
    }

    /// Instance data for every occupied cell.
    pub fn instances(&self) -> Vec<VoxelInstance> {
        self.voxels()
            .map(|(coord, block_type)| VoxelInstance::new(coord, block_type))
            .collect()
    }

    /// Copies the frame so it can outlive the borrow of the world.
    pub fn to_snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            frame: self.frame,
            instances: self.instances(),
            camera: self.camera,
            player: self.player,
            selected_block: self.selected_block,
        }
    }
}

/// An owned copy of a [`RenderFrame`], safe to send to a render thread.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSnapshot {
    /// Index of the step that produced this frame
    pub frame: u64,
    /// Instance data for every occupied cell
    pub instances: Vec<VoxelInstance>,
    /// Camera data for the frame
    pub camera: CameraUniform,
    /// Player state
    pub player: PlayerView,
    /// The block type that would be placed next
    pub selected_block: BlockType,
}

impl RenderSnapshot {
    /// The instance buffer as raw bytes.
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

/// A collaborator that presents frames.
pub trait Renderer {
    /// Presents one frame.
    ///
    /// # Errors
    /// Any failure to present. The caller logs it and keeps simulating.
    fn render(&mut self, frame: &RenderFrame<'_>) -> VoxelResult<()>;
}

/// A headless renderer that only keeps statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStatsRenderer {
    /// Frames presented so far
    pub frames: u64,
    /// Instances in the most recent frame
    pub last_instance_count: usize,
    /// Largest instance count seen
    pub peak_instance_count: usize,
}

impl Renderer for FrameStatsRenderer {
    fn render(&mut self, frame: &RenderFrame<'_>) -> VoxelResult<()> {
        self.frames += 1;
        self.last_instance_count = frame.voxel_count();
        self.peak_instance_count = self.peak_instance_count.max(self.last_instance_count);
        Ok(())
    }
}
