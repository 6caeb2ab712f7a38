//! Geometry of a single voxel face: its corners, normal, and extent.

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::{block::block_side::BlockSide, position::VoxelPosition};

/// Texture coordinates of the four corners of every face.
pub const FACE_TEX_COORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Half the edge length of a voxel.
pub const VOXEL_HALF_EXTENT: f32 = 0.5;

/// Corner offsets from the voxel center for each side, indexed by `BlockSide`.
///
/// Corner `i` receives texture coordinate `FACE_TEX_COORDS[i]`.
#[rustfmt::skip]
const CORNER_OFFSETS: [[[f32; 3]; 4]; 6] = [
    // RIGHT (+x)
    [[ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5], [ 0.5, -0.5,  0.5]],
    // LEFT (-x)
    [[-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5], [-0.5, -0.5, -0.5]],
    // TOP (+y)
    [[-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5]],
    // BOTTOM (-y)
    [[-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5]],
    // FRONT (+z)
    [[-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5]],
    // BACK (-z)
    [[-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5], [-0.5, -0.5, -0.5]],
];

/// Represents a single unit quad on the surface of a voxel.
///
/// A face is derived from its owning voxel and outward side; it is never stored in
/// the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// The voxel this face belongs to
    pub position: VoxelPosition,
    /// Which side of the voxel this face represents
    pub side: BlockSide,
    /// The four corners in world space
    pub corners: [Point3<f32>; 4],
}

impl Face {
    /// Creates the face of the voxel at `position` pointing toward `side`.
    pub fn new(position: VoxelPosition, side: BlockSide) -> Self {
        let center = position.center();
        let corners = CORNER_OFFSETS[side.index()]
            .map(|[x, y, z]| center + Vector3::new(x, y, z));
        Face {
            position,
            side,
            corners,
        }
    }

    /// Outward unit normal.
    pub fn normal(&self) -> Vector3<f32> {
        self.side.normal()
    }

    /// The point in the middle of the quad.
    pub fn center(&self) -> Point3<f32> {
        self.position.center() + self.normal() * VOXEL_HALF_EXTENT
    }

    /// Whether a point on the face's plane lies strictly inside the quad.
    ///
    /// Points on the boundary are outside.
    pub fn contains_planar_point(&self, point: Point3<f32>) -> bool {
        let offset = point - self.center();
        let axis = self.side.axis();
        (0..3)
            .filter(|i| *i != axis)
            .all(|i| offset[i].abs() < VOXEL_HALF_EXTENT)
    }
}
