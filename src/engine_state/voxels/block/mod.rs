//! # Block Module
//!
//! This module provides the voxel data stored in the grid: its position and the
//! colors of its faces.

use block_side::BlockSide;
use color::HueBrightness;

use super::position::VoxelPosition;

pub mod block_side;
pub mod color;

/// How a voxel's faces are painted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum VoxelColoring {
    /// Every face shares one color.
    Uniform(HueBrightness),
    /// Each face has its own color, indexed by `BlockSide`.
    PerFace([HueBrightness; 6]),
}

/// Represents a single voxel in the world.
///
/// Voxels are created by an explicit add and destroyed by an explicit remove.
/// The only in-place change is a face recolor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Voxel {
    /// The cell this voxel occupies
    pub position: VoxelPosition,
    /// Face colors
    pub coloring: VoxelColoring,
}

impl Voxel {
    /// Creates a new voxel with every face painted the same color.
    ///
    /// # Arguments
    /// * `position` - The grid cell of the voxel
    /// * `color` - The color of all six faces
    pub fn new(position: VoxelPosition, color: HueBrightness) -> Self {
        Voxel {
            position,
            coloring: VoxelColoring::Uniform(color),
        }
    }

    /// Gets the color of one face.
    pub fn face_color(&self, side: BlockSide) -> HueBrightness {
        match &self.coloring {
            VoxelColoring::Uniform(color) => *color,
            VoxelColoring::PerFace(colors) => colors[side.index()],
        }
    }

    /// Paints a single face, splitting a uniform coloring into per-face colors.
    pub fn set_face_color(&mut self, side: BlockSide, color: HueBrightness) {
        let mut colors = match self.coloring {
            VoxelColoring::Uniform(old) => [old; 6],
            VoxelColoring::PerFace(colors) => colors,
        };
        colors[side.index()] = color;
        self.coloring = VoxelColoring::PerFace(colors);
    }
}
