//! Canvas addressing for chunked surfaces.
//!
//! - [`CanvasPos`]: absolute pixel position on the owning canvas
//! - [`ChunkPos`]: position in the chunk grid
//! - [`LocalPos`]: position inside one chunk (`0..size`)
//!
//! Placement of chunks on a canvas is the owner's business; these types only
//! translate between the three spaces for a given chunk size.

use bevy::math::Vec2;

use crate::utils::math::positive_mod_unsigned;

/// Absolute pixel position on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CanvasPos {
  pub x: i32,
  pub y: i32,
}

impl CanvasPos {
  pub const fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }

  /// Splits into the owning chunk and the offset inside it.
  ///
  /// Negative positions floor toward negative infinity, so `-1` with a chunk
  /// size of 16 is chunk `-1`, local `15`.
  pub fn to_chunk_and_local(self, chunk_size: u32) -> (ChunkPos, LocalPos) {
    let size = chunk_size as i32;
    let cx = self.x.div_euclid(size);
    let cy = self.y.div_euclid(size);
    let lx = positive_mod_unsigned(self.x, chunk_size);
    let ly = positive_mod_unsigned(self.y, chunk_size);
    (ChunkPos::new(cx, cy), LocalPos::new(lx, ly))
  }
}

/// Position in the chunk grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkPos {
  pub x: i32,
  pub y: i32,
}

impl ChunkPos {
  pub const fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }

  /// Canvas position of this chunk's bottom-left pixel.
  pub const fn origin(self, chunk_size: u32) -> CanvasPos {
    CanvasPos::new(self.x * chunk_size as i32, self.y * chunk_size as i32)
  }

  /// World-space translation of the chunk's bottom-left corner.
  pub fn world_origin(self, chunk_size: u32, pixels_per_unit: f32) -> Vec2 {
    let origin = self.origin(chunk_size);
    Vec2::new(origin.x as f32, origin.y as f32) / pixels_per_unit
  }
}

/// Position within a chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalPos {
  pub x: u32,
  pub y: u32,
}

impl LocalPos {
  pub const fn new(x: u32, y: u32) -> Self {
    Self { x, y }
  }

  /// Canvas position of this offset inside `chunk`.
  pub const fn to_canvas(self, chunk: ChunkPos, chunk_size: u32) -> CanvasPos {
    let origin = chunk.origin(chunk_size);
    CanvasPos::new(origin.x + self.x as i32, origin.y + self.y as i32)
  }
}
