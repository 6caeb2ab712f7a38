//! # Frame Batching
//!
//! Flattens the visible faces of the grid into the arrays a renderer draws from.
//! Every face occupies one *slot*; slot `i` covers
//! - scalars `12 * i .. 12 * i + 12` of `positions` (four xyz corners),
//! - scalars `8 * i .. 8 * i + 8` of `tex_coords` (four uv pairs),
//! - scalars `16 * i .. 16 * i + 16` of `colors` (four rgba tuples),
//! - entry `i` of `slots`, which names the voxel and side it came from.
//!
//! The slot table is the only way to map a picked slot back to a grid face.

use crate::engine_state::voxels::{
    block::block_side::BlockSide, position::VoxelPosition, visibility::VisibleFace,
    world::VoxelGrid,
};

use super::face::{Face, FACE_TEX_COORDS};
use super::vertex::Vertex;

/// Scalars per face in the position array.
pub const POSITION_SCALARS_PER_FACE: usize = 12;
/// Scalars per face in the texture coordinate array.
pub const TEX_COORD_SCALARS_PER_FACE: usize = 8;
/// Scalars per face in the color array.
pub const COLOR_SCALARS_PER_FACE: usize = 16;

/// The batched faces of a single frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameBatch {
    /// Corner positions, 12 scalars per face
    pub positions: Vec<f32>,
    /// Corner texture coordinates, 8 scalars per face
    pub tex_coords: Vec<f32>,
    /// Corner colors, 16 scalars per face
    pub colors: Vec<f32>,
    /// Slot index to the face it was built from
    pub slots: Vec<VisibleFace>,
}

impl FrameBatch {
    /// Builds the batch for the given visible faces, in their order.
    ///
    /// # Arguments
    /// * `grid` - The grid the faces were computed from, used for colors
    /// * `faces` - Visible faces, as produced by the visibility pass
    ///
    /// # Returns
    /// A batch with one slot per face whose voxel is present in `grid`.
    pub fn build(grid: &VoxelGrid, faces: &[VisibleFace]) -> Self {
        let mut batch = FrameBatch {
            positions: Vec::with_capacity(faces.len() * POSITION_SCALARS_PER_FACE),
            tex_coords: Vec::with_capacity(faces.len() * TEX_COORD_SCALARS_PER_FACE),
            colors: Vec::with_capacity(faces.len() * COLOR_SCALARS_PER_FACE),
            slots: Vec::with_capacity(faces.len()),
        };

        for visible in faces {
            let Some(voxel) = grid.get(visible.position) else {
                log::warn!("Skipping face of missing voxel {}", visible.position);
                continue;
            };
            let face = Face::new(visible.position, visible.side);
            let color = voxel.face_color(visible.side).to_rgba().0;

            for corner in face.corners {
                batch.positions.extend_from_slice(&[corner.x, corner.y, corner.z]);
            }
            for uv in FACE_TEX_COORDS {
                batch.tex_coords.extend_from_slice(&uv);
            }
            for _ in 0..4 {
                batch.colors.extend_from_slice(&color);
            }
            batch.slots.push(*visible);
        }

        batch
    }

    /// Number of face slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the batch has no faces.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The voxel and side behind slot `slot`.
    pub fn slot(&self, slot: usize) -> Option<(VoxelPosition, BlockSide)> {
        self.slots.get(slot).map(|f| (f.position, f.side))
    }

    /// The four corner positions emitted for slot `slot`.
    pub fn corners(&self, slot: usize) -> Option<&[f32]> {
        let start = slot * POSITION_SCALARS_PER_FACE;
        self.positions.get(start..start + POSITION_SCALARS_PER_FACE)
    }

    /// Interleaves the batch into one vertex per corner, four per slot.
    ///
    /// Stops at the shortest of the three arrays.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.positions
            .chunks_exact(3)
            .zip(self.tex_coords.chunks_exact(2))
            .zip(self.colors.chunks_exact(4))
            .map(|((p, uv), c)| Vertex {
                position: [p[0], p[1], p[2]],
                tex_coords: [uv[0], uv[1]],
                color: [c[0], c[1], c[2], c[3]],
            })
            .collect()
    }
}
