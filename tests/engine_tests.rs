/// End-to-end tests for the engine and the headless application
/// These tests generate terrain, feed input and check the resulting grid and frames
use cgmath::{Point3, Vector3};
use voxel_sandbox::engine_state::rendering::VoxelInstance;
use voxel_sandbox::*;
use web_time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn flat_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.spawn = [0.0, 3.0, 0.0];
    config.terrain.water_level = -1;
    config.terrain.radius = 2;
    config.terrain.height_field = HeightFieldConfig::Flat { height: 0 };
    config
}

fn down_from(x: f32, z: f32) -> Ray {
    Ray::new(Point3::new(x, 5.0, z), Vector3::new(0.0, -1.0, 0.0))
}

#[test]
fn dig_and_place_on_flat_terrain() {
    let mut engine = EngineState::with_generated_terrain(flat_config()).unwrap();
    for (x, z) in TerrainRegion::square(2).columns() {
        assert_eq!(engine.world.get(Point3::new(x, 0, z)), Some(BlockType::GRASS));
    }

    let hit = engine.raycaster().cast(&engine.world, &down_from(0.0, 0.0)).unwrap();
    assert_eq!(hit.block, Point3::new(0, 0, 0));

    assert_eq!(
        engine.dig(&down_from(0.0, 0.0)),
        RaycastOutcome::Dug {
            coord: Point3::new(0, 0, 0),
            block_type: BlockType::GRASS,
        }
    );
    assert_eq!(engine.world.get(Point3::new(0, 0, 0)), None);

    // The ray now reaches the dirt below and fills the hole back in.
    engine.select_block(2);
    assert_eq!(
        engine.place(&down_from(0.0, 0.0)),
        RaycastOutcome::Placed {
            coord: Point3::new(0, 0, 0),
            block_type: BlockType::ROCK,
        }
    );

    assert_eq!(
        engine.place(&down_from(0.0, 0.0)),
        RaycastOutcome::Placed {
            coord: Point3::new(0, 1, 0),
            block_type: BlockType::ROCK,
        }
    );
}

#[test]
fn input_drives_selection_and_edits() {
    let mut app = HeadlessApplication::new(flat_config()).unwrap();
    let mut renderer = FrameStatsRenderer::default();

    for _ in 0..60 {
        app.frame_with_duration(FRAME, &mut renderer);
    }
    assert!(app.engine_state.player.grounded);
    assert!((app.engine_state.player.position.y - 0.5).abs() < 1e-4);

    app.handle_event(InputEvent::Key {
        key: KeyCode::Digit2,
        pressed: true,
    });
    app.frame_with_duration(FRAME, &mut renderer);
    assert_eq!(app.engine_state.selection.block_type(), BlockType::ROCK);

    app.engine_state.set_target_ray(Some(down_from(2.0, 2.0)));
    app.handle_event(InputEvent::MouseButton {
        button: MouseButton::Left,
        pressed: true,
    });
    let report = app.frame_with_duration(FRAME, &mut renderer);
    assert_eq!(
        report.edits,
        vec![RaycastOutcome::Dug {
            coord: Point3::new(2, 0, 2),
            block_type: BlockType::GRASS,
        }]
    );

    // Holding the button does not dig again.
    let report = app.frame_with_duration(FRAME, &mut renderer);
    assert!(report.edits.is_empty());
    app.handle_event(InputEvent::MouseButton {
        button: MouseButton::Left,
        pressed: false,
    });

    app.engine_state.set_target_ray(Some(down_from(2.0, 2.0)));
    app.handle_event(InputEvent::MouseButton {
        button: MouseButton::Right,
        pressed: true,
    });
    let report = app.frame_with_duration(FRAME, &mut renderer);
    assert_eq!(
        report.edits,
        vec![RaycastOutcome::Placed {
            coord: Point3::new(2, 0, 2),
            block_type: BlockType::ROCK,
        }]
    );
    assert_eq!(renderer.frames, app.engine_state.frame_count());
}

#[test]
fn snapshot_mirrors_the_grid() {
    let engine = EngineState::with_generated_terrain(flat_config()).unwrap();
    let snapshot = engine.snapshot();

    assert_eq!(snapshot.frame, 0);
    assert_eq!(snapshot.instances.len(), engine.world.len());
    assert_eq!(
        snapshot.instance_bytes().len(),
        engine.world.len() * std::mem::size_of::<VoxelInstance>()
    );
    assert_eq!(snapshot.selected_block, BlockType::DEFAULT);
    assert!(!snapshot.player.dead);
}

#[test]
fn falling_off_the_world_and_respawning() {
    let mut config = flat_config();
    config.spawn = [40.0, 3.0, 40.0];
    let mut app = HeadlessApplication::new(config).unwrap();
    let mut renderer = FrameStatsRenderer::default();

    let mut died = false;
    for _ in 0..300 {
        died |= app.frame_with_duration(FRAME, &mut renderer).physics.died;
    }
    assert!(died);
    assert!(app.engine_state.player.dead);

    app.handle_event(InputEvent::Key {
        key: KeyCode::KeyR,
        pressed: true,
    });
    let report = app.frame_with_duration(FRAME, &mut renderer);
    assert!(report.respawned);
    assert!(app.engine_state.player.is_alive());
}

#[test]
fn configuration_loads_from_json() {
    let config = SimulationConfig::from_json_str(
        r#"{
            "spawn": [1.0, 4.0, 1.0],
            "selected_block": "grass",
            "physics": { "resolution": "revert" },
            "raycast": { "strategy": "fixed_step" }
        }"#,
    )
    .unwrap();
    assert_eq!(config.physics.resolution, CollisionResolution::Revert);
    assert_eq!(config.raycast.strategy, RaycastStrategy::FixedStep);

    let engine = EngineState::new(config).unwrap();
    assert_eq!(engine.player.position, Point3::new(1.0, 4.0, 1.0));
    assert_eq!(engine.selection.block_type(), BlockType::GRASS);

    let mut broken = SimulationConfig::default();
    broken.physics.half_width = 0.7;
    assert!(matches!(
        EngineState::new(broken),
        Err(VoxelError::InvalidConfig(_))
    ));
    assert!(matches!(
        SimulationConfig::from_json_str("{ not json"),
        Err(VoxelError::ConfigParse(_))
    ));
}

#[test]
fn click_released_within_the_frame_still_digs() {
    let mut app = HeadlessApplication::new(flat_config()).unwrap();
    let mut renderer = FrameStatsRenderer::default();

    app.engine_state.set_target_ray(Some(down_from(1.0, -1.0)));
    app.handle_event(InputEvent::MouseButton {
        button: MouseButton::Left,
        pressed: true,
    });
    app.handle_event(InputEvent::MouseButton {
        button: MouseButton::Left,
        pressed: false,
    });
    let report = app.frame_with_duration(FRAME, &mut renderer);
    assert_eq!(
        report.edits,
        vec![RaycastOutcome::Dug {
            coord: Point3::new(1, 0, -1),
            block_type: BlockType::GRASS,
        }]
    );

    let report = app.frame_with_duration(FRAME, &mut renderer);
    assert!(report.edits.is_empty());
}

#[test]
fn looking_down_and_digging_in_one_frame_uses_the_new_view() {
    let mut app = HeadlessApplication::new(flat_config()).unwrap();
    let mut renderer = FrameStatsRenderer::default();
    for _ in 0..60 {
        app.frame_with_duration(FRAME, &mut renderer);
    }

    app.handle_event(InputEvent::MouseMotion { delta: (0.0, 600.0) });
    app.handle_event(InputEvent::MouseButton {
        button: MouseButton::Left,
        pressed: true,
    });
    let report = app.frame_with_duration(FRAME, &mut renderer);
    assert_eq!(
        report.edits,
        vec![RaycastOutcome::Dug {
            coord: Point3::new(0, 0, 0),
            block_type: BlockType::GRASS,
        }]
    );
}
