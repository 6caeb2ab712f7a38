//! # Voxel Position Module
//!
//! Integer grid coordinates for voxels. Positions order lexicographically
//! (x, then y, then z), which gives the grid a deterministic iteration order.

use std::fmt;

use cgmath::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::block::block_side::BlockSide;

/// The integer cell a voxel occupies.
///
/// The derived `Ord` compares `x`, then `y`, then `z`, because of the field order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VoxelPosition {
    /// X coordinate of the cell
    pub x: i32,
    /// Y coordinate of the cell (vertical)
    pub y: i32,
    /// Z coordinate of the cell
    pub z: i32,
}

impl VoxelPosition {
    /// Creates a new position from its three coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        VoxelPosition { x, y, z }
    }

    /// The grid origin, where the starting voxel sits.
    pub const ORIGIN: VoxelPosition = VoxelPosition::new(0, 0, 0);

    /// Returns the cell adjacent to this one across the given side.
    ///
    /// # Arguments
    /// * `side` - The face to step across
    ///
    /// # Returns
    /// The neighboring position one unit along the side's outward normal, or `None`
    /// when that step leaves the `i32` range.
    pub fn neighbor(&self, side: BlockSide) -> Option<Self> {
        let offset = side.offset();
        Some(VoxelPosition::new(
            self.x.checked_add(offset.x)?,
            self.y.checked_add(offset.y)?,
            self.z.checked_add(offset.z)?,
        ))
    }

    /// All six face-adjacent neighbors, in canonical side order.
    pub fn neighbors(&self) -> [Option<VoxelPosition>; 6] {
        BlockSide::all().map(|side| self.neighbor(side))
    }

    /// The world-space center of the unit cube at this position.
    pub fn center(&self) -> Point3<f32> {
        Point3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    /// Signed offset from the cube center to a world-space point.
    pub fn offset_to(&self, point: Point3<f32>) -> Vector3<f32> {
        point - self.center()
    }
}

impl fmt::Display for VoxelPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
