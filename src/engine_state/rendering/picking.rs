//! # Target Picking
//!
//! Finds the face under the crosshair by casting the view ray against every slot of
//! the frame batch. Each slot is intersected with the plane through its corners; hits
//! behind the camera or outside the quad are rejected, and the nearest remaining hit
//! wins, with the lower slot winning an exact tie.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::voxels::{block::block_side::BlockSide, position::VoxelPosition};

use super::batch::FrameBatch;
use super::face::Face;

/// A half-line from the camera into the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Where the ray starts
    pub origin: Point3<f32>,
    /// Direction of travel, normally unit length
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Creates a new ray.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Ray { origin, direction }
    }

    /// The point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}

/// The face currently under the crosshair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Slot of the face in the frame batch
    pub slot: usize,
    /// The voxel owning the face
    pub position: VoxelPosition,
    /// Which face of the voxel was hit
    pub side: BlockSide,
    /// Ray parameter of the hit; the distance when the direction is unit length
    pub distance: f32,
}

impl PickHit {
    /// The empty cell in front of the hit face, where a new voxel would go.
    ///
    /// `None` when that cell lies outside the coordinate range.
    pub fn adjacent_position(&self) -> Option<VoxelPosition> {
        self.position.neighbor(self.side)
    }
}

/// Intersects `ray` with one batched face.
///
/// # Arguments
/// * `ray` - The view ray
/// * `corners` - The slot's 12 corner scalars, which fix the plane
/// * `face` - The face the slot was built from, which bounds the hit
///
/// # Returns
/// The ray parameter of the hit, or `None` when the ray is parallel to the face,
/// the plane is behind the origin, or the hit falls outside the quad.
fn intersect_slot(ray: &Ray, corners: &[f32], face: &Face) -> Option<f32> {
    let normal = face.normal();
    let denominator = ray.direction.dot(normal);
    if denominator == 0.0 {
        return None;
    }

    let mut center = Vector3::new(0.0, 0.0, 0.0);
    for corner in corners.chunks_exact(3) {
        center += Vector3::new(corner[0], corner[1], corner[2]);
    }
    let center = Point3::new(0.0, 0.0, 0.0) + center * 0.25;

    let t = (center - ray.origin).dot(normal) / denominator;
    if t.is_nan() || t <= 0.0 {
        return None;
    }

    face.contains_planar_point(ray.at(t)).then_some(t)
}

/// Casts `ray` against every face in `batch` and returns the nearest hit.
///
/// # Arguments
/// * `batch` - This frame's batched faces
/// * `ray` - The view ray
///
/// # Returns
/// `None` when no face is under the crosshair, which disables editing for the tick.
pub fn pick(batch: &FrameBatch, ray: &Ray) -> Option<PickHit> {
    let mut nearest: Option<PickHit> = None;

    for (slot, visible) in batch.slots.iter().enumerate() {
        let Some(corners) = batch.corners(slot) else {
            log::warn!("Slot {} has no corner positions", slot);
            continue;
        };
        let face = Face::new(visible.position, visible.side);
        let Some(t) = intersect_slot(ray, corners, &face) else {
            continue;
        };

        if nearest.map_or(true, |hit| t < hit.distance) {
            nearest = Some(PickHit {
                slot,
                position: visible.position,
                side: visible.side,
                distance: t,
            });
        }
    }

    nearest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::{
        block::color::HueBrightness, visibility::visible_faces, world::VoxelGrid,
    };

    fn batch_for(positions: &[(i32, i32, i32)]) -> FrameBatch {
        let mut grid = VoxelGrid::new();
        for p in positions {
            grid.insert(VoxelPosition::new(p.0, p.1, p.2), HueBrightness::default());
        }
        FrameBatch::build(&grid, &visible_faces(&grid))
    }

    #[test]
    fn looking_down_hits_top_face() {
        let batch = batch_for(&[(0, 0, 0)]);
        let ray = Ray::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
        let hit = pick(&batch, &ray).unwrap();
        assert_eq!(hit.position, VoxelPosition::ORIGIN);
        assert_eq!(hit.side, BlockSide::TOP);
        assert!((hit.distance - 4.5).abs() < 1e-5);
        assert_eq!(hit.adjacent_position(), Some(VoxelPosition::new(0, 1, 0)));
    }

    #[test]
    fn looking_away_hits_nothing() {
        let batch = batch_for(&[(0, 0, 0)]);
        let ray = Ray::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(pick(&batch, &ray), None);
    }

    #[test]
    fn nearest_voxel_wins() {
        let batch = batch_for(&[(0, 0, -3), (0, 0, -6)]);
        let ray = Ray::new(Point3::new(0.2, 0.1, 0.0), Vector3::new(0.0, 0.0, -1.0));
        let hit = pick(&batch, &ray).unwrap();
        assert_eq!(hit.position, VoxelPosition::new(0, 0, -3));
        assert_eq!(hit.side, BlockSide::FRONT);
        assert!((hit.distance - 2.5).abs() < 1e-5);
    }

    #[test]
    fn edge_grazing_ray_misses() {
        let batch = batch_for(&[(0, 0, 0)]);
        // passes exactly along the x = 0.5 edge of the top face
        let ray = Ray::new(Point3::new(0.5, 5.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
        let hit = pick(&batch, &ray);
        assert!(hit.map_or(true, |h| h.side != BlockSide::TOP));
    }

    #[test]
    fn occluded_faces_cannot_be_picked() {
        let batch = batch_for(&[(0, 0, 0), (0, 1, 0)]);
        let directions = [
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.3, -1.0, 0.2).normalize(),
            Vector3::new(-0.2, 1.0, 0.1).normalize(),
        ];
        let origins = [Point3::new(0.0, 0.5, 0.0), Point3::new(0.1, 4.0, 0.0), Point3::new(0.0, -3.0, 0.1)];
        for origin in origins {
            for direction in directions {
                if let Some(hit) = pick(&batch, &Ray::new(origin, direction)) {
                    assert!(!(hit.position == VoxelPosition::new(0, 0, 0) && hit.side == BlockSide::TOP));
                    assert!(!(hit.position == VoxelPosition::new(0, 1, 0) && hit.side == BlockSide::BOTTOM));
                }
            }
        }
    }

    #[test]
    fn tie_goes_to_lowest_slot() {
        // two overlapping copies of one face at the same depth
        let mut batch = batch_for(&[(0, 0, 0)]);
        let top = batch.slots.iter().position(|f| f.side == BlockSide::TOP).unwrap();
        let duplicate = batch.slots[top];
        let corners = batch.corners(top).unwrap().to_vec();
        batch.slots.push(duplicate);
        batch.positions.extend_from_slice(&corners);

        let ray = Ray::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(pick(&batch, &ray).unwrap().slot, top);
    }

    #[test]
    fn short_position_array_skips_missing_slots() {
        let mut batch = batch_for(&[(0, 0, 0)]);
        // keep only the RIGHT face's corners
        batch.positions.truncate(12);
        let down = Ray::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(pick(&batch, &down), None);

        let left = Ray::new(Point3::new(5.0, 0.1, 0.2), Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(pick(&batch, &left).unwrap().side, BlockSide::RIGHT);
    }
}
