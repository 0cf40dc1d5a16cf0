//! # Configuration
//!
//! Tunables for the simulation, grouped by subsystem. Every field has a default and
//! every section is optional in JSON, so a configuration file only needs to name the
//! values it changes:
//!
//! ```
//! use voxel_sandbox::SimulationConfig;
//!
//! let config = SimulationConfig::from_json_str(
//!     r#"{ "physics": { "gravity": 9.8 }, "selected_block": "dirt" }"#,
//! )
//! .unwrap();
//! assert_eq!(config.physics.gravity, 9.8);
//! assert_eq!(config.physics.jump_speed, 7.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::engine_state::player::physics::CollisionResolution;
use crate::engine_state::raycast::RaycastStrategy;
use crate::engine_state::voxels::block::block_type::BlockType;
use crate::engine_state::voxels::terrain::HeightFieldConfig;
use crate::error::{VoxelError, VoxelResult};

/// Movement and collision constants for the player body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration, blocks per second squared.
    pub gravity: f32,
    /// Vertical speed set by a jump, blocks per second.
    pub jump_speed: f32,
    /// Horizontal walking speed, blocks per second.
    pub move_speed: f32,
    /// Yaw rate of the turn keys, degrees per second.
    pub turn_speed: f32,
    /// Degrees of yaw/pitch per unit of pointer motion.
    pub look_sensitivity: f32,
    /// Upper bound on the integration step, seconds.
    pub max_dt: f32,
    /// Feet below this height kill the player.
    pub fatal_y: f32,
    /// Half of the body's X/Z extent. Must stay below half a block.
    pub half_width: f32,
    /// Body height from the feet.
    pub height: f32,
    /// Camera height above the feet.
    pub eye_height: f32,
    /// How a colliding displacement is resolved.
    pub resolution: CollisionResolution,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 20.0,
            jump_speed: 7.0,
            move_speed: 5.0,
            turn_speed: 90.0,
            look_sensitivity: 0.15,
            max_dt: 0.1,
            fatal_y: -30.0,
            half_width: 0.3,
            height: 2.0,
            eye_height: 1.6,
            resolution: CollisionResolution::default(),
        }
    }
}

/// Ray marching constants for dig/place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaycastConfig {
    /// Sampling increment of the fixed-step strategy.
    pub step: f32,
    /// Furthest distance a ray may reach.
    pub max_distance: f32,
    /// Sampling strategy.
    pub strategy: RaycastStrategy,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            step: 0.05,
            max_distance: 100.0,
            strategy: RaycastStrategy::default(),
        }
    }
}

/// Terrain layering and the initial generated region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Lowest y that receives a block.
    pub floor_y: i32,
    /// Highest y filled with water.
    pub water_level: i32,
    /// Dirt layers between surface and rock.
    pub dirt_depth: i32,
    /// Half side of the square region generated at start-up.
    pub radius: i32,
    /// Surface shape.
    pub height_field: HeightFieldConfig,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            floor_y: -5,
            water_level: 0,
            dirt_depth: 3,
            radius: 16,
            height_field: HeightFieldConfig::default(),
        }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Feet position of the player at start and on respawn.
    pub spawn: [f32; 3],
    /// Block type placed until the player selects another.
    pub selected_block: BlockType,
    /// Player body constants.
    pub physics: PhysicsConfig,
    /// Dig/place constants.
    pub raycast: RaycastConfig,
    /// Terrain constants.
    pub terrain: TerrainConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            spawn: [0.0, 10.0, 0.0],
            selected_block: BlockType::DEFAULT,
            physics: PhysicsConfig::default(),
            raycast: RaycastConfig::default(),
            terrain: TerrainConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    /// `VoxelError::ConfigParse` for malformed JSON, `VoxelError::InvalidConfig` for values
    /// rejected by [`SimulationConfig::validate`].
    pub fn from_json_str(json: &str) -> VoxelResult<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> VoxelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that the values keep the simulation well defined.
    pub fn validate(&self) -> VoxelResult<()> {
        let physics = &self.physics;
        let raycast = &self.raycast;

        if !(raycast.step > 0.0 && raycast.step.is_finite()) {
            return Err(invalid("raycast.step must be positive and finite"));
        }
        if !(raycast.max_distance > 0.0 && raycast.max_distance.is_finite()) {
            return Err(invalid("raycast.max_distance must be positive and finite"));
        }
        if !(physics.max_dt > 0.0) {
            return Err(invalid("physics.max_dt must be positive"));
        }
        if !(physics.move_speed > 0.0) {
            return Err(invalid("physics.move_speed must be positive"));
        }
        if !(physics.height > 0.0) {
            return Err(invalid("physics.height must be positive"));
        }
        if !(physics.half_width > 0.0 && physics.half_width < 0.5) {
            return Err(invalid("physics.half_width must lie in (0, 0.5)"));
        }
        if self.terrain.dirt_depth < 0 {
            return Err(invalid("terrain.dirt_depth must not be negative"));
        }
        if self.spawn.iter().any(|c| !c.is_finite()) {
            return Err(invalid("spawn must be finite"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> VoxelError {
    VoxelError::InvalidConfig(message.to_string())
}
