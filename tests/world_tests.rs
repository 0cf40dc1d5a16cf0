/// Integration tests for the voxel grid
/// These tests check the occupancy contract every other subsystem relies on
use cgmath::Point3;
use voxel_sandbox::*;

fn sample_coords() -> Vec<BlockCoordinate> {
    let mut coords = Vec::new();
    for x in [-7, -1, 0, 3] {
        for y in [-2, 0, 9] {
            for z in [-4, 0, 5] {
                coords.push(Point3::new(x, y, z));
            }
        }
    }
    coords
}

#[test]
fn set_then_get_returns_the_type() {
    let mut world = VoxelGrid::new();
    for (i, coord) in sample_coords().into_iter().enumerate() {
        let block_type = BlockType::ALL[i % BlockType::ALL.len()];
        world.set(coord, block_type);
        assert_eq!(world.get(coord), Some(block_type));
    }
}

#[test]
fn removing_twice_equals_removing_once() {
    for coord in sample_coords() {
        let mut once = VoxelGrid::new();
        once.set(coord, BlockType::DIRT);
        once.set(Point3::new(100, 100, 100), BlockType::ROCK);
        let mut twice = once.clone();

        assert_eq!(once.remove(coord), Some(BlockType::DIRT));
        twice.remove(coord);
        assert_eq!(twice.remove(coord), None);
        assert_eq!(once, twice);
    }
}

#[test]
fn unknown_cells_are_air() {
    let world = VoxelGrid::new();
    assert_eq!(world.get(Point3::new(i32::MAX, i32::MIN, 0)), None);
    assert!(!world.contains(Point3::new(0, 0, 0)));
}

#[test]
fn raw_ids_outside_the_enumeration_are_normalized() {
    let mut world = VoxelGrid::new();
    for id in [0u8, 6, 200] {
        assert_eq!(
            world.set_from_int(Point3::new(id as i32, 0, 0), id),
            BlockType::DEFAULT
        );
    }
    assert!(matches!(
        BlockType::try_from_int(6),
        Err(VoxelError::InvalidBlockType(6))
    ));
}

#[test]
fn block_names_parse_case_insensitively() {
    assert_eq!(" Grass ".parse::<BlockType>().unwrap(), BlockType::GRASS);
    assert_eq!("stone".parse::<BlockType>().unwrap(), BlockType::ROCK);
    assert!(matches!(
        "lava".parse::<BlockType>(),
        Err(VoxelError::UnknownBlockName(_))
    ));
}
