/// Integration tests for player movement and grid collision
/// These tests drive the physics body over generated terrain
use cgmath::{Deg, Point3};
use voxel_sandbox::*;
use web_time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn flat_world() -> VoxelGrid {
    let mut world = VoxelGrid::new();
    TerrainGenerator::new(-5, -1, 3).generate(
        &mut world,
        &TerrainRegion::square(4),
        &FlatHeightField(0),
    );
    world
}

fn physics(resolution: CollisionResolution) -> PhysicsBody {
    PhysicsBody::new(PhysicsConfig {
        resolution,
        ..PhysicsConfig::default()
    })
}

#[test]
fn body_inside_a_column_settles_on_top_in_one_step() {
    let world = flat_world();
    let physics = physics(CollisionResolution::Clamp);
    // Feet start inside the grass block at y = 0.
    let mut player = Player::new(Point3::new(1.0, 0.1, 1.0));
    player.velocity.y = -3.0;

    let report = physics.step(&mut player, &world, &MovementInput::default(), FRAME);
    assert!(report.collided[1]);
    assert!(player.grounded);
    assert!((player.position.y - 0.5).abs() < 1e-5);
}

#[test]
fn falling_player_lands_and_stays_grounded() {
    let world = flat_world();
    let physics = physics(CollisionResolution::Clamp);
    let mut player = Player::new(Point3::new(0.0, 6.0, 0.0));

    for _ in 0..120 {
        physics.step(&mut player, &world, &MovementInput::default(), FRAME);
    }
    assert!(player.grounded);
    assert!((player.position.y - 0.5).abs() < 1e-4);
    let ground = Aabb::of_block(Point3::new(0, 0, 0));
    assert!(!physics.body_at(player.position).intersects(&ground));
}

#[test]
fn revert_never_lets_the_body_enter_the_ground() {
    let world = flat_world();
    let physics = physics(CollisionResolution::Revert);
    let mut player = Player::new(Point3::new(0.0, 6.0, 0.0));

    for _ in 0..120 {
        physics.step(&mut player, &world, &MovementInput::default(), FRAME);
        assert!(player.position.y >= 0.5 - 1e-3);
    }
    assert!(player.grounded);
    // Binary revert stops short of the surface by up to one step of displacement.
    assert!(player.position.y < 1.0);
}

#[test]
fn walking_into_a_wall_keeps_the_other_axis_free() {
    let mut world = flat_world();
    for z in -4..=4 {
        world.set(Point3::new(2, 1, z), BlockType::ROCK);
        world.set(Point3::new(2, 2, z), BlockType::ROCK);
    }
    let physics = physics(CollisionResolution::Clamp);
    let mut player = Player::new(Point3::new(0.0, 0.5, 0.0));
    player.grounded = true;
    // Heading between +X and +Z: X is blocked by the wall, Z keeps moving.
    player.rotate(Deg(45.0), Deg(0.0));
    let walk = MovementInput {
        forward: true,
        ..MovementInput::default()
    };

    for _ in 0..60 {
        physics.step(&mut player, &world, &walk, FRAME);
    }
    assert!((player.position.x - (1.5 - physics.config().half_width)).abs() < 1e-4);
    assert!(player.position.z > 2.0);
}

#[test]
fn jump_leaves_the_ground_and_comes_back() {
    let world = flat_world();
    let physics = physics(CollisionResolution::Clamp);
    let mut player = Player::new(Point3::new(0.0, 0.5, 0.0));
    player.grounded = true;
    let jump = MovementInput {
        jump: true,
        ..MovementInput::default()
    };

    physics.step(&mut player, &world, &jump, FRAME);
    assert!(!player.grounded);
    let mut peak = player.position.y;
    for _ in 0..120 {
        physics.step(&mut player, &world, &MovementInput::default(), FRAME);
        peak = peak.max(player.position.y);
    }
    assert!(peak > 1.0);
    assert!(player.grounded);
    assert!((player.position.y - 0.5).abs() < 1e-4);
}

#[test]
fn dead_player_keeps_falling_but_cannot_walk() {
    let world = VoxelGrid::new();
    let physics = physics(CollisionResolution::Clamp);
    let mut player = Player::new(Point3::new(0.0, 0.0, 0.0));
    let walk = MovementInput {
        forward: true,
        jump: true,
        ..MovementInput::default()
    };

    let mut deaths = 0;
    for _ in 0..300 {
        if physics.step(&mut player, &world, &walk, FRAME).died {
            deaths += 1;
        }
    }
    assert_eq!(deaths, 1);
    assert!(player.dead);
    assert_eq!(player.velocity.x, 0.0);
    assert!(player.velocity.y < 0.0);

    player.respawn();
    assert!(player.is_alive());
    assert_eq!(player.position, player.spawn_point());
}

#[test]
fn standing_at_500_fps_stays_grounded_and_can_jump() {
    let world = flat_world();
    let physics = physics(CollisionResolution::Clamp);
    let mut player = Player::new(Point3::new(0.0, 0.5, 0.0));
    let dt = Duration::from_millis(2);

    let grounded: Vec<bool> = (0..8)
        .map(|_| {
            physics.step(&mut player, &world, &MovementInput::default(), dt);
            player.grounded
        })
        .collect();
    assert_eq!(grounded, vec![true; 8]);

    let jump = MovementInput {
        jump: true,
        ..MovementInput::default()
    };
    physics.step(&mut player, &world, &jump, dt);
    assert!(player.velocity.y > 0.0);
}
