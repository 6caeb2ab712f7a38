//! Per-frame face data for the voxel sandbox.
//!
//! This module turns the visible faces of the grid into the flat arrays a renderer
//! draws, and answers "which face is under the crosshair" against those same arrays.
//! Nothing here talks to a graphics API; the presentation layer consumes the batch.

pub mod batch;
pub mod face;
pub mod picking;
pub mod vertex;

// Re-export commonly used types
pub use batch::FrameBatch;
pub use picking::{PickHit, Ray};
pub use vertex::Vertex;
