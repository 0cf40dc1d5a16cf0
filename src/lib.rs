#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! The simulation core of a first-person voxel sandbox: a sparse block grid, procedural
//! terrain, dig/place raycasting and a player that walks, jumps and collides with the
//! grid.
//!
//! ## Key Modules
//!
//! * `engine_state` - The simulation context and its subsystems (voxels, raycast, player,
//!   camera, rendering boundary)
//! * `application_state` - Input tracking and the frame driver
//! * `config` - JSON configuration with defaults for every value
//! * `error` - The crate's error type
//!
//! ## Architecture
//!
//! Everything runs on one thread, one step per frame. An [`EngineState`] owns the world,
//! the player and the selected block type; input is translated into a `PlayerAction`
//! before each step, and renderers borrow the state between steps. Drawing, windowing
//! and asset loading are left to collaborators behind the
//! [`Renderer`](engine_state::rendering::Renderer) trait.
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::{Point3, Vector3};
//! use voxel_sandbox::{
//!     BlockType, EngineState, FlatHeightField, Ray, RaycastOutcome, SimulationConfig,
//!     TerrainRegion,
//! };
//!
//! let mut config = SimulationConfig::default();
//! config.terrain.water_level = -1;
//! let mut engine = EngineState::new(config).unwrap();
//! engine.generate_terrain_with(&TerrainRegion::square(2), &FlatHeightField(0));
//!
//! let down = Ray::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
//! assert_eq!(
//!     engine.dig(&down),
//!     RaycastOutcome::Dug { coord: Point3::new(0, 0, 0), block_type: BlockType::GRASS }
//! );
//! ```

use anyhow::Context;
use log::info;
use web_time::Duration;

pub mod application_state;
pub mod config;
pub mod engine_state;
pub mod error;

pub use application_state::{
    input_state::{KeyCode, MouseButton},
    HeadlessApplication, InputEvent,
};
pub use config::{PhysicsConfig, RaycastConfig, SimulationConfig, TerrainConfig};
pub use engine_state::{
    camera_state::CameraState,
    player::{
        aabb::Aabb,
        physics::{CollisionResolution, MovementInput, PhysicsBody, PhysicsReport},
        Player,
    },
    raycast::{EditAction, Ray, RayHit, RaycastOutcome, RaycastStrategy, Raycaster},
    rendering::{FrameStatsRenderer, RenderFrame, RenderSnapshot, Renderer},
    voxels::{
        block::{block_side::BlockSide, block_type::BlockType},
        terrain::{
            FlatHeightField, HeightField, HeightFieldConfig, PerlinHeightField, TerrainGenerator,
            TerrainRegion, WaveHeightField,
        },
        world::{BlockCoordinate, VoxelGrid},
    },
    EngineState, PlayerAction, Selection, StepReport,
};
pub use error::{VoxelError, VoxelResult};

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "VOXEL_SANDBOX_CONFIG";

/// Frames simulated by [`run`].
const SESSION_FRAMES: u32 = 240;

/// Seed of the scripted session, so every run makes the same choices.
const SESSION_SEED: u64 = 0x5eed;

/// Initializes `env_logger`, writing to stdout and filtered by `RUST_LOG`.
///
/// Calling it more than once is harmless.
pub fn init_logger() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG");
    if log_builder.try_init().is_err() {
        log::debug!("logger was already initialized");
    }
}

/// Loads the configuration named by [`CONFIG_ENV_VAR`], or the defaults if it is unset.
pub fn load_config() -> anyhow::Result<SimulationConfig> {
    let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
        info!("{CONFIG_ENV_VAR} not set, using the default configuration");
        return Ok(SimulationConfig::default());
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading configuration file {path}"))?;
    let config = SimulationConfig::from_json_str(&text)
        .with_context(|| format!("loading configuration file {path}"))?;
    info!("Loaded configuration from {path}");
    Ok(config)
}

/// Runs a short scripted headless session and logs what happens.
///
/// The player drops onto generated terrain, walks, jumps, looks around, picks random
/// block types and digs and places blocks in front of them.
pub fn run() -> anyhow::Result<()> {
    init_logger();
    info!("Logger initialized");

    let config = load_config()?;
    let mut app = HeadlessApplication::new(config)?;
    info!(
        "Generated {} blocks, player spawns at {:?}",
        app.engine_state.world.len(),
        app.engine_state.player.spawn_point()
    );

    let mut renderer = FrameStatsRenderer::default();
    let mut rng = fastrand::Rng::with_seed(SESSION_SEED);
    let dt = Duration::from_secs_f64(1.0 / 60.0);

    for frame in 0..SESSION_FRAMES {
        for event in scripted_events(frame, &mut rng) {
            app.handle_event(event);
        }

        let report = app.frame_with_duration(dt, &mut renderer);
        for outcome in &report.edits {
            info!("frame {}: {:?}", report.frame, outcome);
        }
        if report.physics.died {
            info!("frame {}: player died, respawning", report.frame);
            app.handle_event(InputEvent::Key {
                key: KeyCode::KeyR,
                pressed: true,
            });
        }
    }

    let engine = &app.engine_state;
    info!(
        "Session finished after {} frames: {} blocks, player at {:?}, grounded: {}",
        renderer.frames,
        engine.world.len(),
        engine.player.position,
        engine.player.grounded
    );
    if let Some((coord, block_type)) = engine.surface_below_player() {
        info!("Standing above {block_type} at {coord:?}");
    }
    Ok(())
}

/// Input for one frame of the scripted session.
fn scripted_events(frame: u32, rng: &mut fastrand::Rng) -> Vec<InputEvent> {
    let key = |key, pressed| InputEvent::Key { key, pressed };
    let button = |button, pressed| InputEvent::MouseButton { button, pressed };
    let digit_keys = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
    ];

    let mut events = Vec::new();
    match frame {
        60 => events.push(key(KeyCode::KeyW, true)),
        90 => events.push(key(KeyCode::Space, true)),
        92 => events.push(key(KeyCode::Space, false)),
        120 => events.push(key(KeyCode::KeyW, false)),
        150 => events.push(button(MouseButton::Left, true)),
        151 => events.push(button(MouseButton::Left, false)),
        180 => events.push(button(MouseButton::Right, true)),
        181 => events.push(button(MouseButton::Right, false)),
        _ => {}
    }

    if frame % 30 == 0 {
        events.extend(digit_keys.map(|digit| key(digit, false)));
        events.push(key(digit_keys[rng.usize(..digit_keys.len())], true));
    }
    if frame % 30 == 1 {
        events.extend(digit_keys.map(|digit| key(digit, false)));
        // Release R in case a death pressed it.
        events.push(key(KeyCode::KeyR, false));
    }

    // Look down at the ground in front before digging, then wander.
    if (130..150).contains(&frame) {
        events.push(InputEvent::MouseMotion { delta: (0.0, 12.0) });
    } else if frame > 181 {
        let dx = rng.f64() * 4.0 - 2.0;
        events.push(InputEvent::MouseMotion { delta: (dx, 0.0) });
    }
    events
}
