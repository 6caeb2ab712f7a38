//! # Voxel Core
//!
//! This module contains the voxel data model: grid positions, voxel colors, the
//! sparse grid itself, and the hidden-face culling that derives which faces border
//! empty space.
//!
//! ## Architecture
//!
//! * **Position**: Integer cell coordinates with a lexicographic order
//! * **Block**: Voxel payload (face colors) and the six face directions
//! * **World**: The sparse `VoxelGrid` and its seeding strategies
//! * **Visibility**: Full-scan and incremental visible-face computation
//!
//! ## Data Flow
//!
//! 1. Edit commands insert or remove voxels in the grid
//! 2. The visibility cache is told which cells changed
//! 3. The visible face list is handed to the frame batcher every tick

pub mod block;
pub mod position;
pub mod visibility;
pub mod world;
