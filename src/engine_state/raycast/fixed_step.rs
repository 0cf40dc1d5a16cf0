use super::{Ray, RayHit};
use crate::engine_state::voxels::world::{block_containing, VoxelGrid};

/// Samples `ray` every `step` units from the origin while the distance is below
/// `max_distance`, returning the first sample whose cell is occupied.
///
/// The placement cell is taken from the sample two steps back, which keeps it outside
/// the block that was hit when the ray enters through a face at a shallow angle.
pub(super) fn march(world: &VoxelGrid, ray: &Ray, step: f32, max_distance: f32) -> Option<RayHit> {
    if !(step > 0.0) || !max_distance.is_finite() || ray.is_degenerate() {
        return None;
    }

    // Distances are derived from the sample index so error does not accumulate.
    let mut index: u32 = 0;
    loop {
        let distance = index as f32 * step;
        if distance >= max_distance {
            return None;
        }

        let block = block_containing(ray.point_at(distance));
        if let Some(block_type) = world.get(block) {
            let previous = block_containing(ray.point_at(distance - 2.0 * step));
            return Some(RayHit {
                block,
                block_type,
                previous: Some(previous),
                face: None,
                distance,
            });
        }

        index = index.checked_add(1)?;
    }
}
