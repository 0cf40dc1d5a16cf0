//! # Application State Management
//!
//! This module drives the simulation from discrete input events, including:
//! - Input handling
//! - Frame timing
//! - Handing finished frames to a renderer
//!
//! There is no window here. Whatever owns the event source (a windowing layer, a test, a
//! scripted session) feeds [`InputEvent`]s in and calls [`HeadlessApplication::frame`] once
//! per displayed frame.

pub mod input_manager;
pub mod input_state;

use input_manager::InputManager;
use input_state::{KeyCode, MouseButton};

use crate::config::SimulationConfig;
use crate::engine_state::{rendering::Renderer, EngineState, StepReport};
use crate::error::VoxelResult;

/// A discrete input event from the outside world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key went down (`pressed == true`) or up.
    Key {
        /// The key
        key: KeyCode,
        /// Whether it is now down
        pressed: bool,
    },
    /// A mouse button went down or up.
    MouseButton {
        /// The button
        button: MouseButton,
        /// Whether it is now down
        pressed: bool,
    },
    /// Relative pointer motion.
    MouseMotion {
        /// The (x, y) delta
        delta: (f64, f64),
    },
    /// The application lost focus; every key is treated as released.
    FocusLost,
}

/// The running application: an engine, its input and its frame clock.
#[derive(Debug, Clone)]
pub struct HeadlessApplication {
    /// The core simulation state
    pub engine_state: EngineState,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// Timestamp of the last frame for delta time calculations
    pub last_wait_time: web_time::Instant,
}

impl HeadlessApplication {
    /// Creates the engine with generated terrain and starts the frame clock.
    ///
    /// # Errors
    /// `VoxelError::InvalidConfig` if the configuration fails validation.
    pub fn new(config: SimulationConfig) -> VoxelResult<Self> {
        let engine_state = EngineState::with_generated_terrain(config)?;
        Ok(Self {
            engine_state,
            input_manager: InputManager::new(),
            last_wait_time: web_time::Instant::now(),
        })
    }

    /// Records an input event for the next frame.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { key, pressed } => self.input_manager.intake_key(key, pressed),
            InputEvent::MouseButton { button, pressed } => {
                self.input_manager.intake_mouse_button(button, pressed)
            }
            InputEvent::MouseMotion { delta } => self.input_manager.intake_mouse_motion(delta),
            InputEvent::FocusLost => {
                for key in KeyCode::ALL {
                    self.input_manager.intake_key(key, false);
                }
                for button in MouseButton::ALL {
                    self.input_manager.intake_mouse_button(button, false);
                }
            }
        }
    }

    /// Runs one frame using the wall-clock time since the previous frame.
    pub fn frame(&mut self, renderer: &mut dyn Renderer) -> StepReport {
        let now = web_time::Instant::now();
        let wait_dt = now - self.last_wait_time;
        self.last_wait_time = now;
        self.frame_with_duration(wait_dt, renderer)
    }

    /// Runs one frame of length `dt`: processes input, steps the engine and renders.
    pub fn frame_with_duration(
        &mut self,
        dt: web_time::Duration,
        renderer: &mut dyn Renderer,
    ) -> StepReport {
        let processed_input = self.input_manager.get_and_reset_processed_input();
        self.engine_state.set_input_commands(processed_input);

        let report = self.engine_state.step(dt);
        self.engine_state.render(renderer);
        report
    }
}
