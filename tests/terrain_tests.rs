/// Integration tests for terrain generation
/// These tests validate determinism and the layering order of generated columns
use cgmath::Point3;
use voxel_sandbox::*;

fn generator() -> TerrainGenerator {
    TerrainGenerator::new(-5, -1, 3)
}

#[test]
fn flat_terrain_has_grass_at_zero_in_every_column() {
    let mut world = VoxelGrid::new();
    let region = TerrainRegion::new(-2, 2, -2, 2);
    generator().generate(&mut world, &region, &FlatHeightField(0));

    for (x, z) in region.columns() {
        assert_eq!(world.get(Point3::new(x, 0, z)), Some(BlockType::GRASS));
        assert_eq!(world.get(Point3::new(x, 1, z)), None);
        assert_eq!(
            world.highest_in_column(x, z, -10, 10),
            Some((Point3::new(x, 0, z), BlockType::GRASS))
        );
    }
    assert_eq!(region.column_count(), 25);
}

#[test]
fn generating_twice_gives_identical_grids() {
    let heights = PerlinHeightField::new(7, 2.0, 6.0, 0.08);
    let region = TerrainRegion::square(6);

    let mut first = VoxelGrid::new();
    let mut second = VoxelGrid::new();
    let written = generator().generate(&mut first, &region, &heights);
    generator().generate(&mut second, &region, &heights);
    assert_eq!(first, second);

    // Regenerating over existing terrain overwrites rather than adds.
    generator().generate(&mut first, &region, &heights);
    assert_eq!(first, second);
    assert_eq!(first.len(), written);
}

#[test]
fn height_fields_are_deterministic() {
    let fields: Vec<Box<dyn HeightField>> = vec![
        HeightFieldConfig::default().build(),
        HeightFieldConfig::Flat { height: 3 }.build(),
        HeightFieldConfig::Perlin {
            seed: 42,
            base: 0.0,
            amplitude: 8.0,
            scale: 0.05,
        }
        .build(),
    ];
    for field in &fields {
        for (x, z) in TerrainRegion::square(5).columns() {
            assert_eq!(field.height_at(x, z), field.height_at(x, z));
        }
    }
}

#[test]
fn columns_layer_rock_dirt_surface_water() {
    let terrain = TerrainGenerator::new(-5, 0, 2);

    let dry: Vec<BlockType> = terrain.column_blocks(3).map(|(_, t)| t).collect();
    let rank = |t: &BlockType| match t {
        BlockType::ROCK => 0,
        BlockType::DIRT => 1,
        BlockType::GRASS | BlockType::SAND => 2,
        BlockType::WATER => 3,
    };
    assert!(dry.windows(2).all(|w| rank(&w[0]) <= rank(&w[1])));
    assert_eq!(dry.last(), Some(&BlockType::GRASS));

    let flooded: Vec<(i32, BlockType)> = terrain.column_blocks(-2).collect();
    assert!(flooded.contains(&(-2, BlockType::SAND)));
    assert_eq!(
        flooded
            .iter()
            .filter(|(_, t)| *t == BlockType::WATER)
            .map(|(y, _)| *y)
            .collect::<Vec<_>>(),
        vec![-1, 0]
    );
}

#[test]
fn surface_below_the_floor_is_all_water() {
    let terrain = TerrainGenerator::new(-5, 0, 3);
    let column: Vec<(i32, BlockType)> = terrain.column_blocks(-9).collect();
    assert_eq!(column.len(), 6);
    assert!(column.iter().all(|(y, t)| *t == BlockType::WATER && *y >= -5));
}

#[test]
fn terrain_configuration_round_trips_through_json() {
    let config = SimulationConfig::from_json_str(
        r#"{ "terrain": { "water_level": -2, "height_field": { "kind": "flat", "height": 4 } } }"#,
    )
    .unwrap();
    assert_eq!(config.terrain.water_level, -2);
    assert_eq!(
        config.terrain.height_field,
        HeightFieldConfig::Flat { height: 4 }
    );
    assert_eq!(config.terrain.height_field.build().height_at(10, -10), 4);
}

#[test]
fn regenerating_lower_terrain_matches_a_fresh_run() {
    let region = TerrainRegion::new(0, 0, 0, 0);
    let mut world = VoxelGrid::new();
    generator().generate(&mut world, &region, &FlatHeightField(5));
    generator().generate(&mut world, &region, &FlatHeightField(0));

    let mut fresh = VoxelGrid::new();
    generator().generate(&mut fresh, &region, &FlatHeightField(0));
    assert_eq!(world, fresh);
    assert_eq!(world.get(Point3::new(0, 3, 0)), None);
}
