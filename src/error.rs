//! # Error Module
//!
//! Error types shared across the simulation core.
//!
//! Very little in the core can actually fail. An empty cell or a ray that hits nothing are
//! ordinary outcomes and are returned as `Option`/`RaycastOutcome` values instead. What remains
//! here are the conversions that can be asked to be strict (block ids, block names), the
//! configuration layer, and failures reported back by external collaborators.

use crate::engine_state::voxels::block::BlockTypeSize;

/// Errors reported by the voxel sandbox.
#[derive(Debug, thiserror::Error)]
pub enum VoxelError {
    /// A block type id outside the known enumeration.
    #[error("invalid block type id {0}")]
    InvalidBlockType(BlockTypeSize),

    /// A block type name that is not in the name table.
    #[error("unknown block type name `{0}`")]
    UnknownBlockName(String),

    /// A configuration value that would break a simulation invariant.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed configuration text.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A renderer (or other collaborator) failed to handle a frame.
    #[error("renderer failure: {0}")]
    Renderer(String),
}

/// Result alias used throughout the crate.
pub type VoxelResult<T> = Result<T, VoxelError>;
