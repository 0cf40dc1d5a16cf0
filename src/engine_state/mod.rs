//! # Engine State Module
//!
//! The simulation context of the voxel sandbox. One `EngineState` owns the world, the
//! player and the block selection, and every step function takes it by mutable
//! reference. There is no ambient global state.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the simulation
//! * `camera_state` - Places the camera at the player's eye and builds picking rays
//! * `player` - Player state, collision boxes and physics
//! * `raycast` - Picking and the dig/place edits
//! * `rendering` - The boundary towards renderer collaborators
//! * `voxels` - Block types, the voxel grid and terrain generation
//!
//! ## Step order
//!
//! Each call to [`EngineState::step`] consumes the current [`PlayerAction`]:
//!
//! 1. Respawn and block selection are applied.
//! 2. Physics moves and turns the player.
//! 3. The camera is moved to the player's new eye position.
//! 4. Requested edits are raycast against the grid from that camera.
//!
//! A renderer only ever sees the state between two steps.

use cgmath::Point3;
use web_time::Duration;

use crate::application_state::input_state::{KeyCode, MouseButton, ProcessedInputState};
use crate::config::SimulationConfig;
use crate::error::VoxelResult;

use camera_state::{camera::Projection, CameraState};
use player::{
    physics::{MovementInput, PhysicsBody, PhysicsReport},
    Player,
};
use raycast::{EditAction, Ray, RaycastOutcome, Raycaster};
use rendering::{PlayerView, RenderFrame, RenderSnapshot, Renderer};
use voxels::{
    block::{block_type::BlockType, BlockTypeSize},
    terrain::{HeightField, TerrainGenerator, TerrainRegion},
    world::{block_containing, BlockCoordinate, VoxelGrid},
};

pub mod camera_state;
pub mod player;
pub mod raycast;
pub mod rendering;
pub mod voxels;

/// The block type that the next placement uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    block_type: BlockType,
}

impl Selection {
    /// Starts with `block_type` selected.
    pub fn new(block_type: BlockType) -> Self {
        Self { block_type }
    }

    /// The selected type.
    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    /// Selects a block type from its hotkey number.
    ///
    /// Numbers outside the enumeration select `BlockType::DEFAULT` and are logged.
    ///
    /// # Returns
    /// The type actually selected.
    pub fn select(&mut self, btype: BlockTypeSize) -> BlockType {
        self.block_type = match BlockType::try_from_int(btype) {
            Ok(block_type) => block_type,
            Err(err) => {
                log::warn!("{err}; selecting {} instead", BlockType::DEFAULT);
                BlockType::DEFAULT
            }
        };
        self.block_type
    }
}

/// Represents player actions derived from input
///
/// Movement keys count while held. The other actions trigger once, on the frame their
/// key or button goes down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerAction {
    /// Held movement keys and pointer motion
    pub movement: MovementInput,
    /// Put the player back at the spawn point
    pub respawn: bool,
    /// Hotkey number of a block type to select
    pub select_block: Option<BlockTypeSize>,
    /// Remove the block under the crosshair
    pub dig: bool,
    /// Place the selected block against the block under the crosshair
    pub place: bool,
}

/// What happened during one [`EngineState::step`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Index of the step, starting at 1
    pub frame: u64,
    /// Outcome of every edit attempted, dig before place
    pub edits: Vec<RaycastOutcome>,
    /// Collisions and death during the physics update
    pub physics: PhysicsReport,
    /// Whether the player was respawned
    pub respawned: bool,
}

/// The main state container for the simulation.
///
/// # Examples
///
/// ```
/// use voxel_sandbox::{EngineState, SimulationConfig};
/// use web_time::Duration;
///
/// let mut engine = EngineState::with_generated_terrain(SimulationConfig::default()).unwrap();
/// for _ in 0..60 {
///     engine.step(Duration::from_millis(16));
/// }
/// assert!(engine.player.is_alive());
/// ```
#[derive(Debug, Clone)]
pub struct EngineState {
    /// Occupancy of the world
    pub world: VoxelGrid,
    /// The simulated player
    pub player: Player,
    /// The block type used for placement
    pub selection: Selection,
    /// Actions to apply on the next step
    pub player_actions: PlayerAction,
    /// Camera at the player's eye
    pub camera_state: CameraState,
    physics: PhysicsBody,
    raycaster: Raycaster,
    terrain: TerrainGenerator,
    config: SimulationConfig,
    target_ray: Option<Ray>,
    frame: u64,
}

impl EngineState {
    /// Creates an empty world with the player at the configured spawn point.
    ///
    /// # Errors
    /// `VoxelError::InvalidConfig` if the configuration fails validation.
    pub fn new(config: SimulationConfig) -> VoxelResult<Self> {
        config.validate()?;

        let player = Player::new(Point3::from(config.spawn));
        let camera_state =
            CameraState::new(&player, config.physics.eye_height, Projection::default());

        Ok(Self {
            world: VoxelGrid::new(),
            player,
            selection: Selection::new(config.selected_block),
            player_actions: PlayerAction::default(),
            camera_state,
            physics: PhysicsBody::new(config.physics),
            raycaster: Raycaster::new(config.raycast),
            terrain: TerrainGenerator::from_config(&config.terrain),
            config,
            target_ray: None,
            frame: 0,
        })
    }

    /// Creates the state and generates the configured terrain around the origin.
    pub fn with_generated_terrain(config: SimulationConfig) -> VoxelResult<Self> {
        let mut engine = Self::new(config)?;
        engine.generate_terrain();
        Ok(engine)
    }

    /// Generates the configured height field over the configured square region.
    ///
    /// # Returns
    /// The number of blocks written.
    pub fn generate_terrain(&mut self) -> usize {
        let heights = self.config.terrain.height_field.build();
        let region = TerrainRegion::square(self.config.terrain.radius);
        self.generate_terrain_with(&region, heights.as_ref())
    }

    /// Generates terrain from an arbitrary height field.
    pub fn generate_terrain_with<H>(&mut self, region: &TerrainRegion, heights: &H) -> usize
    where
        H: HeightField + ?Sized,
    {
        self.terrain.generate(&mut self.world, region, heights)
    }

    /// The configuration the state was built from.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The physics used for the player.
    pub fn physics(&self) -> &PhysicsBody {
        &self.physics
    }

    /// The raycaster used for edits.
    pub fn raycaster(&self) -> &Raycaster {
        &self.raycaster
    }

    /// The terrain layering rules.
    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    /// Number of completed steps.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Sets the input commands for the next step.
    ///
    /// # Arguments
    /// * `input` - The processed input state to use for setting commands
    pub fn set_input_commands(&mut self, input: ProcessedInputState) {
        self.player_actions = Self::translate_processed_input(&input);
    }

    /// Translates the processed input state into player actions.
    ///
    /// # Arguments
    /// * `input` - The processed input state to translate
    ///
    /// # Returns
    /// A PlayerAction struct with the appropriate actions set
    pub fn translate_processed_input(input: &ProcessedInputState) -> PlayerAction {
        let held = |key| input.get_key_state(key).is_active();

        let movement = MovementInput {
            forward: held(KeyCode::KeyW),
            backward: held(KeyCode::KeyS),
            left: held(KeyCode::KeyA),
            right: held(KeyCode::KeyD),
            turn_left: held(KeyCode::KeyQ),
            turn_right: held(KeyCode::KeyE),
            jump: held(KeyCode::Space),
            look_delta: input
                .get_mouse_delta()
                .map_or((0.0, 0.0), |(dx, dy)| (dx as f32, dy as f32)),
        };

        // Digit keys only trigger on press, not hold
        let select_block = KeyCode::ALL
            .iter()
            .filter(|key| input.get_key_state(**key).is_just_pressed())
            .find_map(|key| key.digit());

        PlayerAction {
            movement,
            respawn: input.get_key_state(KeyCode::KeyR).is_just_pressed(),
            select_block,
            dig: input
                .get_mouse_button_state(MouseButton::Left)
                .is_just_pressed(),
            place: input
                .get_mouse_button_state(MouseButton::Right)
                .is_just_pressed(),
        }
    }

    /// Overrides the ray used by the next step's edits, e.g. with a
    /// [`CameraState::screen_ray`] under the pointer. Without one, edits use the view ray.
    pub fn set_target_ray(&mut self, ray: Option<Ray>) {
        self.target_ray = ray;
    }

    /// The first-person ray from the eye along the view direction.
    pub fn view_ray(&self) -> Ray {
        self.camera_state.view_ray()
    }

    /// Selects a block type by hotkey number, normalizing invalid numbers.
    pub fn select_block(&mut self, btype: BlockTypeSize) -> BlockType {
        self.selection.select(btype)
    }

    /// Applies `action` along `ray`.
    pub fn edit(&mut self, ray: &Ray, action: EditAction) -> RaycastOutcome {
        self.raycaster.apply(&mut self.world, ray, action)
    }

    /// Removes the first block along `ray`.
    pub fn dig(&mut self, ray: &Ray) -> RaycastOutcome {
        self.edit(ray, EditAction::Dig)
    }

    /// Places the selected block against the first block along `ray`.
    pub fn place(&mut self, ray: &Ray) -> RaycastOutcome {
        let block_type = self.selection.block_type();
        self.edit(ray, EditAction::Place(block_type))
    }

    /// Advances the simulation by one frame.
    ///
    /// Respawn and block selection come first, then physics and the camera follow-up,
    /// then digging and placing along the updated view.
    ///
    /// # Arguments
    /// * `dt` - Time elapsed since the previous step; clamped by the physics
    pub fn step(&mut self, dt: Duration) -> StepReport {
        let actions = std::mem::take(&mut self.player_actions);
        let mut report = StepReport::default();

        if actions.respawn {
            self.player.respawn();
            report.respawned = true;
            log::info!("player respawned at {:?}", self.player.spawn_point());
        }

        if let Some(btype) = actions.select_block {
            let block_type = self.select_block(btype);
            log::debug!("selected {block_type}");
        }

        report.physics = self.physics.step(
            &mut self.player,
            &self.world,
            &actions.movement,
            dt,
        );
        self.camera_state
            .update(&self.player, self.config.physics.eye_height);

        // Edits see the view after this step's movement and look input.
        let target_ray = self.target_ray.take();
        if actions.dig || actions.place {
            let ray = target_ray.unwrap_or_else(|| self.view_ray());
            if actions.dig {
                report.edits.push(self.dig(&ray));
            }
            if actions.place {
                report.edits.push(self.place(&ray));
            }
        }

        self.frame += 1;
        report.frame = self.frame;
        report
    }

    /// The topmost block in the player's column at or below the feet.
    pub fn surface_below_player(&self) -> Option<(BlockCoordinate, BlockType)> {
        let feet = block_containing(self.player.position);
        self.world
            .highest_in_column(feet.x, feet.z, self.config.terrain.floor_y, feet.y)
    }

    /// What the player looks like to a renderer.
    pub fn player_view(&self) -> PlayerView {
        PlayerView {
            position: self.player.position,
            yaw: self.player.yaw,
            pitch: self.player.pitch,
            dead: self.player.dead,
        }
    }

    /// Lends the current state to a renderer.
    pub fn frame(&self) -> RenderFrame<'_> {
        RenderFrame::new(
            self.frame,
            &self.world,
            self.camera_state.camera_uniform,
            self.player_view(),
            self.selection.block_type(),
        )
    }

    /// An owned copy of the current frame.
    pub fn snapshot(&self) -> RenderSnapshot {
        self.frame().to_snapshot()
    }

    /// Hands the current frame to `renderer`.
    ///
    /// A renderer error is logged and otherwise ignored; the simulation carries on.
    ///
    /// # Returns
    /// Whether the renderer succeeded.
    pub fn render(&self, renderer: &mut dyn Renderer) -> bool {
        match renderer.render(&self.frame()) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("frame {} was not rendered: {err}", self.frame);
                false
            }
        }
    }
}
