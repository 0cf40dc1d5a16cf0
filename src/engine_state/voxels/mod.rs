//! # Voxel Engine Core
//!
//! This module contains the core voxel functionality, providing the foundation
//! for representing, manipulating, and generating a voxel-based world.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Block**: Defines the closed set of block types and the faces of a block
//! * **World**: The sparse grid mapping integer coordinates to block types
//! * **Terrain**: Height fields and the column layering that fills the grid
//!
//! ## Data Flow
//!
//! 1. Terrain generation writes whole columns into the world
//! 2. Raycast edits and physics queries read and modify single cells
//! 3. Renderers iterate the world between steps

pub mod block;
pub mod terrain;
pub mod world;
