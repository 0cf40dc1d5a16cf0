use cgmath::Point3;

use super::{Ray, RayHit};
use crate::engine_state::voxels::{block::block_side::BlockSide, world::VoxelGrid};

/// Walks every cell crossed by `ray`, in order, until an occupied one is found or the
/// next boundary lies beyond `max_distance`.
///
/// Cells are centred on integer coordinates, so the walk runs in a frame shifted by half
/// a block where cell boundaries fall on integers.
pub(super) fn traverse(world: &VoxelGrid, ray: &Ray, max_distance: f32) -> Option<RayHit> {
    if !max_distance.is_finite() || ray.is_degenerate() {
        return None;
    }

    let origin = [ray.origin.x + 0.5, ray.origin.y + 0.5, ray.origin.z + 0.5];
    let direction = [ray.direction.x, ray.direction.y, ray.direction.z];

    let mut cell = [0i32; 3];
    let mut step = [0i32; 3];
    let mut t_max = [f32::INFINITY; 3];
    let mut t_delta = [f32::INFINITY; 3];

    for axis in 0..3 {
        let floor = origin[axis].floor();
        cell[axis] = floor as i32;
        let d = direction[axis];
        if d > 0.0 {
            step[axis] = 1;
            t_delta[axis] = 1.0 / d;
            t_max[axis] = (floor + 1.0 - origin[axis]) / d;
        } else if d < 0.0 {
            step[axis] = -1;
            t_delta[axis] = -1.0 / d;
            t_max[axis] = (origin[axis] - floor) / -d;
        }
    }

    let mut previous = None;
    let mut face = None;
    let mut distance = 0.0;

    loop {
        let block = Point3::new(cell[0], cell[1], cell[2]);
        if let Some(block_type) = world.get(block) {
            return Some(RayHit {
                block,
                block_type,
                previous,
                face,
                distance,
            });
        }

        let axis = if t_max[0] < t_max[1] {
            if t_max[0] < t_max[2] {
                0
            } else {
                2
            }
        } else if t_max[1] < t_max[2] {
            1
        } else {
            2
        };

        distance = t_max[axis];
        if !(distance <= max_distance) {
            return None;
        }

        previous = Some(block);
        cell[axis] += step[axis];
        t_max[axis] += t_delta[axis];
        face = Some(BlockSide::entered_from(axis, step[axis]));
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    #[test]
    fn straight_down_enters_through_the_top_face() {
        let mut world = VoxelGrid::new();
        world.set(Point3::new(0, 0, 0), BlockType::GRASS);
        let ray = Ray::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(0.0, -1.0, 0.0));

        let hit = traverse(&world, &ray, 100.0).unwrap();
        assert_eq!(hit.block, Point3::new(0, 0, 0));
        assert_eq!(hit.previous, Some(Point3::new(0, 1, 0)));
        assert_eq!(hit.face, Some(BlockSide::TOP));
        assert!((hit.distance - 4.5).abs() < 1e-5);
    }

    #[test]
    fn does_not_tunnel_where_coarse_sampling_would() {
        let mut world = VoxelGrid::new();
        world.set(Point3::new(1, 0, 0), BlockType::ROCK);
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let hit = traverse(&world, &ray, 4.0).unwrap();
        assert_eq!(hit.block, Point3::new(1, 0, 0));
        assert_eq!(hit.previous, Some(Point3::new(0, 0, 0)));
        assert_eq!(hit.face, Some(BlockSide::LEFT));
    }

    #[test]
    fn diagonal_ray_visits_face_neighbours() {
        let mut world = VoxelGrid::new();
        world.set(Point3::new(3, 2, 0), BlockType::DIRT);
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.7, 0.0));
        let hit = traverse(&world, &ray, 10.0).unwrap();
        assert_eq!(hit.block, Point3::new(3, 2, 0));
        let previous = hit.previous.unwrap();
        // Consecutive cells of a traversal always share a face.
        let manhattan = (previous.x - 3).abs() + (previous.y - 2).abs() + previous.z.abs();
        assert_eq!(manhattan, 1);
    }

    #[test]
    fn starting_inside_a_block_has_no_placement_cell() {
        let mut world = VoxelGrid::new();
        world.set(Point3::new(0, 0, 0), BlockType::ROCK);
        let ray = Ray::new(Point3::new(0.1, 0.1, 0.1), Vector3::new(0.0, 1.0, 0.0));
        let hit = traverse(&world, &ray, 5.0).unwrap();
        assert_eq!(hit.block, Point3::new(0, 0, 0));
        assert_eq!(hit.previous, None);
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn misses_beyond_range() {
        let mut world = VoxelGrid::new();
        world.set(Point3::new(0, 0, -8), BlockType::ROCK);
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(traverse(&world, &ray, 7.0).is_none());
        assert!(traverse(&world, &ray, 8.0).is_some());
        assert!(traverse(&world, &ray, f32::INFINITY).is_none());
    }
}
