//! # Collision Resolution
//!
//! Pushes the actor out of every voxel it overlaps after integration.
//!
//! Voxels are visited in grid order. Each one is first rejected if its center is more
//! than `collision_radius` away from the actor. A voxel that overlaps the actor's box
//! is then resolved along exactly one axis, the one with the largest absolute offset
//! between actor and voxel center (x beats y beats z unless strictly smaller). The
//! actor is moved to the voxel's box boundary on that axis and the camera coordinate
//! on that axis snaps to it. Resolving upward onto a voxel zeroes the vertical
//! velocity and grounds the actor.
//!
//! All comparisons are strict: an actor exactly touching a voxel does not collide.

use crate::engine_state::rendering::face::VOXEL_HALF_EXTENT;
use crate::engine_state::voxels::{position::VoxelPosition, world::VoxelGrid};

use super::{Actor, ActorExtents};

/// Default broad-phase radius around the actor.
pub const DEFAULT_COLLISION_RADIUS: f32 = 4.0;

/// The axis a collision was resolved along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionAxis {
    /// Pushed along X
    X,
    /// Pushed along Y; `grounded` when pushed up onto the voxel
    Y {
        /// Whether the push was upward
        grounded: bool,
    },
    /// Pushed along Z
    Z,
}

/// Whether the actor's box, centered at `offset` from a voxel center, overlaps it.
fn overlaps(offset: cgmath::Vector3<f32>, extents: &ActorExtents) -> bool {
    let reach_x = VOXEL_HALF_EXTENT + extents.half_width;
    let reach_z = VOXEL_HALF_EXTENT + extents.half_width;
    let vertical = (offset.y > 0.0 && offset.y < VOXEL_HALF_EXTENT + extents.half_height_bottom)
        || (offset.y < 0.0 && offset.y > -VOXEL_HALF_EXTENT - extents.half_height_top);

    offset.x.abs() < reach_x && vertical && offset.z.abs() < reach_z
}

/// Whether the actor's box would overlap a voxel placed at `position`.
pub fn intersects_cell(actor: &Actor, position: VoxelPosition) -> bool {
    overlaps(position.offset_to(actor.position), &actor.extents)
}

/// Resolves the actor against a single voxel.
///
/// # Returns
/// The axis the actor was pushed along, or `None` if the voxel did not collide.
pub fn resolve_voxel(actor: &mut Actor, position: VoxelPosition) -> Option<ResolutionAxis> {
    let center = position.center();
    let offset = position.offset_to(actor.position);
    if !overlaps(offset, &actor.extents) {
        return None;
    }

    let (dx, dy, dz) = (offset.x.abs(), offset.y.abs(), offset.z.abs());
    let extents = actor.extents;

    if dx > dy && dx > dz {
        if offset.x > 0.0 {
            actor.position.x = center.x + VOXEL_HALF_EXTENT + extents.half_width;
        } else if offset.x < 0.0 {
            actor.position.x = center.x - VOXEL_HALF_EXTENT - extents.half_width;
        }
        actor.camera.position.x = actor.position.x;
        Some(ResolutionAxis::X)
    } else if dy > dz {
        // only a voxel under (or over) the eye point holds the actor up (or down)
        if !(dx < VOXEL_HALF_EXTENT && dz < VOXEL_HALF_EXTENT) {
            return None;
        }
        let grounded = offset.y > 0.0;
        if grounded {
            actor.position.y = center.y + VOXEL_HALF_EXTENT + extents.half_height_bottom;
        } else {
            actor.position.y = center.y - VOXEL_HALF_EXTENT - extents.half_height_top;
        }
        actor.vertical_velocity = 0.0;
        actor.camera.position.y = actor.position.y;
        Some(ResolutionAxis::Y { grounded })
    } else {
        if offset.z > 0.0 {
            actor.position.z = center.z + VOXEL_HALF_EXTENT + extents.half_width;
        } else if offset.z < 0.0 {
            actor.position.z = center.z - VOXEL_HALF_EXTENT - extents.half_width;
        }
        actor.camera.position.z = actor.position.z;
        Some(ResolutionAxis::Z)
    }
}

/// Resolves the actor against every voxel within `collision_radius`.
///
/// Sets and returns `actor.grounded`: true iff some voxel pushed the actor upward.
pub fn resolve(actor: &mut Actor, grid: &VoxelGrid, collision_radius: f32) -> bool {
    let radius_squared = collision_radius * collision_radius;
    let mut grounded = false;

    for voxel in grid.iter() {
        let offset = voxel.position.offset_to(actor.position);
        let distance_squared = offset.x * offset.x + offset.y * offset.y + offset.z * offset.z;
        if distance_squared > radius_squared {
            continue;
        }

        if let Some(axis) = resolve_voxel(actor, voxel.position) {
            log::trace!("Resolved actor against {} along {:?}", voxel.position, axis);
            if let ResolutionAxis::Y { grounded: true } = axis {
                grounded = true;
            }
        }
    }

    actor.grounded = grounded;
    grounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::actor_state::MotionSettings;
    use crate::engine_state::voxels::block::color::HueBrightness;
    use cgmath::Point3;

    fn grid_with(positions: &[(i32, i32, i32)]) -> VoxelGrid {
        let mut grid = VoxelGrid::new();
        for p in positions {
            grid.insert(VoxelPosition::new(p.0, p.1, p.2), HueBrightness::default());
        }
        grid
    }

    fn actor_at(x: f32, y: f32, z: f32) -> Actor {
        Actor::new(Point3::new(x, y, z), ActorExtents::default())
    }

    #[test]
    fn falling_actor_comes_to_rest_on_top() {
        let grid = grid_with(&[(0, 0, 0)]);
        let extents = ActorExtents::default();
        let rest = 0.5 + extents.half_height_bottom;
        let mut actor = actor_at(0.0, rest + 2.0, 0.0);
        actor.vertical_velocity = -10.0;
        let settings = MotionSettings::default();

        for _ in 0..200 {
            actor.integrate(0.02, &settings, true);
            resolve(&mut actor, &grid, DEFAULT_COLLISION_RADIUS);
        }

        assert_eq!(actor.position.y, rest);
        assert_eq!(actor.vertical_velocity, 0.0);
        assert!(actor.grounded);
    }

    #[test]
    fn walking_off_the_edge_clears_grounded() {
        let grid = grid_with(&[(0, 0, 0)]);
        let settings = MotionSettings::default();
        let mut actor = actor_at(0.0, 0.5 + ActorExtents::default().half_height_bottom, 0.0);
        actor.intent.sideward = 1;

        actor.integrate(0.02, &settings, true);
        assert!(resolve(&mut actor, &grid, DEFAULT_COLLISION_RADIUS));

        for _ in 0..9 {
            actor.integrate(0.02, &settings, true);
            resolve(&mut actor, &grid, DEFAULT_COLLISION_RADIUS);
        }
        assert!(actor.position.x > 1.4);
        assert!(!actor.grounded);
        assert!(actor.vertical_velocity < 0.0);
    }

    #[test]
    fn head_bump_pushes_down_without_grounding() {
        let grid = grid_with(&[(0, 3, 0)]);
        let mut actor = actor_at(0.0, 2.4, 0.0);
        actor.vertical_velocity = 4.0;
        assert!(!resolve(&mut actor, &grid, DEFAULT_COLLISION_RADIUS));
        assert_eq!(actor.position.y, 3.0 - 0.5 - actor.extents.half_height_top);
        assert_eq!(actor.vertical_velocity, 0.0);
    }

    #[test]
    fn wall_pushes_along_dominant_axis() {
        let grid = grid_with(&[(1, 0, 0)]);
        let mut actor = actor_at(0.3, 0.1, 0.2);
        assert_eq!(resolve_voxel(&mut actor, VoxelPosition::new(1, 0, 0)), Some(ResolutionAxis::X));
        assert_eq!(actor.position.x, 1.0 - 0.5 - actor.extents.half_width);
        assert_eq!(actor.camera.position.x, actor.position.x);
        assert!(!resolve(&mut actor, &grid, DEFAULT_COLLISION_RADIUS));

        let mut actor = actor_at(0.1, 0.2, -0.6);
        assert_eq!(resolve_voxel(&mut actor, VoxelPosition::ORIGIN), Some(ResolutionAxis::Z));
        assert_eq!(actor.position.z, -0.5 - actor.extents.half_width);
    }

    #[test]
    fn ties_fall_through_to_later_axes() {
        // |dx| == |dz| > |dy|: x is not strictly largest, y loses to z
        let mut actor = actor_at(0.6, 0.1, 0.6);
        assert_eq!(resolve_voxel(&mut actor, VoxelPosition::ORIGIN), Some(ResolutionAxis::Z));

        // |dx| == |dy| > |dz| with the eye outside the footprint: y is chosen and skipped
        let mut actor = actor_at(0.7, 0.7, 0.0);
        assert_eq!(resolve_voxel(&mut actor, VoxelPosition::ORIGIN), None);
        assert_eq!(actor.position, Point3::new(0.7, 0.7, 0.0));
    }

    #[test]
    fn touching_is_not_colliding() {
        let extents = ActorExtents::default();
        let mut actor = actor_at(0.0, 0.5 + extents.half_height_bottom, 0.0);
        assert_eq!(resolve_voxel(&mut actor, VoxelPosition::ORIGIN), None);

        let mut actor = actor_at(0.5 + extents.half_width, 0.3, 0.0);
        assert_eq!(resolve_voxel(&mut actor, VoxelPosition::ORIGIN), None);

        // level with the voxel center, the vertical overlap test fails on both sides
        let mut actor = actor_at(0.2, 0.0, 0.1);
        assert_eq!(resolve_voxel(&mut actor, VoxelPosition::ORIGIN), None);
    }

    #[test]
    fn broad_phase_ignores_distant_voxels() {
        let grid = grid_with(&[(0, 0, 0)]);
        let mut actor = actor_at(0.0, 1.0, 0.0);
        assert!(!resolve(&mut actor, &grid, 0.5));
        assert_eq!(actor.position.y, 1.0);
        assert!(resolve(&mut actor, &grid, DEFAULT_COLLISION_RADIUS));
    }

    #[test]
    fn cell_intersection_for_placement() {
        let actor = actor_at(0.0, 2.3, 0.0);
        assert!(intersects_cell(&actor, VoxelPosition::new(0, 1, 0)));
        assert!(intersects_cell(&actor, VoxelPosition::new(0, 2, 0)));
        assert!(!intersects_cell(&actor, VoxelPosition::new(0, 3, 0)));
        assert!(!intersects_cell(&actor, VoxelPosition::new(1, 1, 0)));
    }
}
