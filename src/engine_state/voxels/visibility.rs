//! # Face Visibility Module
//!
//! A voxel face is visible when the cell on its outward side is empty. Faces pressed
//! against another voxel are culled: never batched, never pickable.
//!
//! Two ways of computing the visible set are provided:
//! - `visible_faces`: a full scan of the grid, the reference behavior
//! - `VisibilityCache`: keeps the result between frames and only re-examines a mutated
//!   cell and its six neighbors
//!
//! Both produce the same ordered sequence: voxels in grid order, then faces in
//! canonical `BlockSide` order.

use std::collections::{BTreeMap, BTreeSet};

use super::block::block_side::BlockSide;
use super::position::VoxelPosition;
use super::world::VoxelGrid;

/// One visible face, identified by its owning voxel and outward direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VisibleFace {
    /// The voxel the face belongs to
    pub position: VoxelPosition,
    /// The direction the face points
    pub side: BlockSide,
}

/// Bitmask of the visible faces of the voxel at `position`, bit `i` for side `i`.
///
/// A side whose neighbor lies outside the coordinate range faces empty space.
fn visibility_mask(grid: &VoxelGrid, position: VoxelPosition) -> u8 {
    BlockSide::all()
        .into_iter()
        .filter(|side| position.neighbor(*side).map_or(true, |n| !grid.contains(n)))
        .fold(0, |mask, side| mask | (1 << side.index()))
}

fn push_faces(faces: &mut Vec<VisibleFace>, position: VoxelPosition, mask: u8) {
    for side in BlockSide::all() {
        if mask & (1 << side.index()) != 0 {
            faces.push(VisibleFace { position, side });
        }
    }
}

/// Computes every visible face in the grid by checking all six neighbors of every voxel.
///
/// # Returns
/// The visible faces in grid order, then canonical side order.
pub fn visible_faces(grid: &VoxelGrid) -> Vec<VisibleFace> {
    let mut faces = Vec::new();
    for voxel in grid.iter() {
        push_faces(&mut faces, voxel.position, visibility_mask(grid, voxel.position));
    }
    faces
}

/// Incrementally maintained face visibility.
///
/// Every grid insert or remove must be reported with `mark_dirty` before the next
/// `refresh`; the cache then re-evaluates only the touched cells.
#[derive(Debug, Default)]
pub struct VisibilityCache {
    masks: BTreeMap<VoxelPosition, u8>,
    dirty: BTreeSet<VoxelPosition>,
}

impl VisibilityCache {
    /// Builds a cache holding the full-scan result for `grid`.
    pub fn new(grid: &VoxelGrid) -> Self {
        let masks = grid
            .iter()
            .map(|voxel| (voxel.position, visibility_mask(grid, voxel.position)))
            .collect();
        VisibilityCache {
            masks,
            dirty: BTreeSet::new(),
        }
    }

    /// Records that the cell at `position` was inserted or removed.
    ///
    /// The cell itself and its six neighbors are queued for re-evaluation.
    pub fn mark_dirty(&mut self, position: VoxelPosition) {
        self.dirty.insert(position);
        self.dirty.extend(position.neighbors().into_iter().flatten());
    }

    /// Whether any cells are waiting to be re-evaluated.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Re-evaluates every queued cell against the current grid.
    pub fn refresh(&mut self, grid: &VoxelGrid) {
        for position in std::mem::take(&mut self.dirty) {
            if grid.contains(position) {
                self.masks.insert(position, visibility_mask(grid, position));
            } else {
                self.masks.remove(&position);
            }
        }
    }

    /// The cached visible faces, in the same order as `visible_faces`.
    pub fn faces(&self) -> Vec<VisibleFace> {
        let mut faces = Vec::new();
        for (position, mask) in &self.masks {
            push_faces(&mut faces, *position, *mask);
        }
        faces
    }
}
