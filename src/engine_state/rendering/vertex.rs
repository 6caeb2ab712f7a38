//! Interleaved vertex format for handing a frame batch to a GPU.
//!
//! The batcher keeps positions, texture coordinates, and colors in separate flat
//! arrays. A presentation layer that prefers a single interleaved buffer can convert
//! a batch into `Vertex` values and upload them with `bytemuck::cast_slice`.

/// A single face corner in the interleaved layout.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Color: [f32; 4] (16 bytes)
///
/// Total size: 36 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// World-space corner position
    pub position: [f32; 3],
    /// UV texture coordinates (0.0-1.0)
    pub tex_coords: [f32; 2],
    /// RGBA color
    pub color: [f32; 4],
}

impl Vertex {
    /// Size of one vertex in bytes.
    pub const SIZE: usize = std::mem::size_of::<Vertex>();
}
