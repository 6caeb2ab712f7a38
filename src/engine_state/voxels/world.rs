//! # World Module
//!
//! This module provides the `VoxelGrid`, the sparse store of every occupied cell in
//! the sandbox.
//!
//! ## Storage
//!
//! Voxels are kept in an ordered map keyed by `VoxelPosition`. Lookup is O(log n),
//! which comfortably supports six neighbor checks per voxel per frame at ~10⁴ voxels,
//! and iteration is always lexicographic so every derived frame is reproducible.
//!
//! ## Generation
//!
//! Several seeding strategies are supported:
//! - Single: one voxel at the origin
//! - Flat: a square floor one cell below the origin
//! - Perlin: a floor whose height follows 2D Perlin noise
//! - Empty: no voxels at all

use std::collections::btree_map::{self, BTreeMap};

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use super::block::{block_side::BlockSide, color::HueBrightness, Voxel};
use super::position::VoxelPosition;

/// Scaling factor applied to world coordinates when sampling Perlin noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.08;
/// Height in cells of the tallest Perlin column above the base floor.
pub const PERLIN_AMPLITUDE: f64 = 3.0;

/// The strategy used to seed a new world.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorldGenerationMethod {
    /// One voxel at the origin
    #[default]
    Single,
    /// A square floor at y = -1
    Flat,
    /// A noise heightmap floor starting at y = -1
    Perlin,
    /// No voxels
    Empty,
}

/// Sparse mapping from grid cells to voxels.
///
/// A position holds at most one voxel; inserting over an occupied cell fails without
/// touching the grid.
///
/// # Examples
///
/// ```
/// use voxel_sandbox::engine_state::voxels::{
///     block::color::HueBrightness, position::VoxelPosition, world::VoxelGrid,
/// };
///
/// let mut grid = VoxelGrid::new();
/// assert!(grid.insert(VoxelPosition::ORIGIN, HueBrightness::default()));
/// assert!(!grid.insert(VoxelPosition::ORIGIN, HueBrightness::default()));
/// assert!(grid.remove(VoxelPosition::ORIGIN));
/// assert!(grid.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoxelGrid {
    voxels: BTreeMap<VoxelPosition, Voxel>,
}

impl VoxelGrid {
    /// Creates a new, empty grid.
    pub fn new() -> Self {
        VoxelGrid {
            voxels: BTreeMap::new(),
        }
    }

    /// Seeds a new grid with the given generation method.
    ///
    /// # Arguments
    /// * `method` - Which layout to generate
    /// * `radius` - Half-width of the floor for `Flat` and `Perlin`
    /// * `seed` - Noise seed for `Perlin`
    pub fn generate(method: WorldGenerationMethod, radius: i32, seed: u32) -> Self {
        let mut grid = VoxelGrid::new();
        let floor_color = HueBrightness::new(2.0, 0.6);

        match method {
            WorldGenerationMethod::Single => {
                grid.insert(VoxelPosition::ORIGIN, HueBrightness::default());
            }
            WorldGenerationMethod::Flat => {
                for x in -radius..=radius {
                    for z in -radius..=radius {
                        grid.insert(VoxelPosition::new(x, -1, z), floor_color);
                    }
                }
            }
            WorldGenerationMethod::Perlin => {
                let perlin = Perlin::new(seed);
                for x in -radius..=radius {
                    for z in -radius..=radius {
                        let sample = perlin.get([
                            x as f64 * PERLIN_SCALE_FACTOR,
                            z as f64 * PERLIN_SCALE_FACTOR,
                        ]);
                        let height = ((sample + 1.0) * 0.5 * PERLIN_AMPLITUDE).floor() as i32;
                        for y in -1..=(height - 1).max(-1) {
                            let brightness = 0.5 + 0.15 * (y + 1) as f32;
                            grid.insert(
                                VoxelPosition::new(x, y, z),
                                HueBrightness::new(2.0 - 0.3 * (y + 1) as f32, brightness),
                            );
                        }
                    }
                }
            }
            WorldGenerationMethod::Empty => {}
        }

        grid
    }

    /// Adds a voxel at `position` if the cell is free.
    ///
    /// # Returns
    /// `true` if the voxel was added, `false` if the cell was already occupied.
    pub fn insert(&mut self, position: VoxelPosition, color: HueBrightness) -> bool {
        match self.voxels.entry(position) {
            btree_map::Entry::Occupied(_) => false,
            btree_map::Entry::Vacant(entry) => {
                entry.insert(Voxel::new(position, color));
                true
            }
        }
    }

    /// Deletes the voxel at `position`.
    ///
    /// # Returns
    /// `true` if a voxel was removed, `false` if the cell was empty.
    pub fn remove(&mut self, position: VoxelPosition) -> bool {
        self.voxels.remove(&position).is_some()
    }

    /// Checks whether a cell is occupied.
    pub fn contains(&self, position: VoxelPosition) -> bool {
        self.voxels.contains_key(&position)
    }

    /// Gets the voxel at `position`, if any.
    pub fn get(&self, position: VoxelPosition) -> Option<&Voxel> {
        self.voxels.get(&position)
    }

    /// Paints one face of an existing voxel.
    ///
    /// # Returns
    /// `true` if the voxel exists and was recolored.
    pub fn recolor_face(&mut self, position: VoxelPosition, side: BlockSide, color: HueBrightness) -> bool {
        match self.voxels.get_mut(&position) {
            Some(voxel) => {
                voxel.set_face_color(side, color);
                true
            }
            None => false,
        }
    }

    /// Iterates over all voxels in lexicographic position order.
    pub fn iter(&self) -> impl Iterator<Item = &Voxel> + '_ {
        self.voxels.values()
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Whether the grid holds no voxels.
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_contains_and_remove_then_absent() {
        let mut grid = VoxelGrid::new();
        let positions = [
            VoxelPosition::new(0, 0, 0),
            VoxelPosition::new(-5, 12, 3),
            VoxelPosition::new(i32::MAX, i32::MIN, 0),
        ];
        for p in positions {
            assert!(grid.insert(p, HueBrightness::default()));
            assert!(grid.contains(p));
        }
        for p in positions {
            assert!(grid.remove(p));
            assert!(!grid.contains(p));
            assert!(grid.get(p).is_none());
        }
    }

    #[test]
    fn insert_over_occupied_cell_keeps_original() {
        let mut grid = VoxelGrid::new();
        let red = HueBrightness::new(0.0, 1.0);
        let blue = HueBrightness::new(4.0, 1.0);
        assert!(grid.insert(VoxelPosition::ORIGIN, red));
        let before = grid.clone();

        assert!(!grid.insert(VoxelPosition::ORIGIN, blue));
        assert_eq!(grid, before);
        assert_eq!(
            grid.get(VoxelPosition::ORIGIN).map(|v| v.face_color(BlockSide::TOP)),
            Some(red)
        );
    }

    #[test]
    fn remove_absent_fails() {
        let mut grid = VoxelGrid::new();
        assert!(!grid.remove(VoxelPosition::new(1, 2, 3)));
        assert!(!grid.recolor_face(VoxelPosition::new(1, 2, 3), BlockSide::TOP, HueBrightness::default()));
    }

    #[test]
    fn iteration_is_sorted() {
        let mut grid = VoxelGrid::new();
        for p in [(3, 0, 0), (0, 0, 1), (0, -1, 9), (-2, 4, 4)] {
            grid.insert(VoxelPosition::new(p.0, p.1, p.2), HueBrightness::default());
        }
        let order: Vec<VoxelPosition> = grid.iter().map(|v| v.position).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }

    #[test]
    fn generation_methods() {
        let single = VoxelGrid::generate(WorldGenerationMethod::Single, 8, 0);
        assert_eq!(single.len(), 1);
        assert!(single.contains(VoxelPosition::ORIGIN));

        let flat = VoxelGrid::generate(WorldGenerationMethod::Flat, 2, 0);
        assert_eq!(flat.len(), 25);
        assert!(flat.iter().all(|v| v.position.y == -1));

        let perlin = VoxelGrid::generate(WorldGenerationMethod::Perlin, 4, 7);
        for x in -4..=4 {
            for z in -4..=4 {
                assert!(perlin.contains(VoxelPosition::new(x, -1, z)));
            }
        }

        assert!(VoxelGrid::generate(WorldGenerationMethod::Empty, 8, 0).is_empty());
    }
}
