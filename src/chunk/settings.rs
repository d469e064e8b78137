//! Placement and layering parameters supplied when a chunk is initialized.

use super::ChunkError;

/// Sorting layer every chunk joins unless told otherwise.
pub const DEFAULT_LAYER: &str = "Default";

/// Pixels per world unit when neither settings nor config say otherwise.
pub const DEFAULT_PIXELS_PER_UNIT: f32 = 100.0;

/// Sorting layer name plus order within that layer.
///
/// Higher orders draw on top of lower ones in the same layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkSorting {
  pub layer: String,
  pub order: i32,
}

impl ChunkSorting {
  pub fn new(layer: impl Into<String>, order: i32) -> Self {
    Self {
      layer: layer.into(),
      order,
    }
  }
}

impl Default for ChunkSorting {
  fn default() -> Self {
    Self::new(DEFAULT_LAYER, 0)
  }
}

/// Parameters for [`PixelChunk::initialize`](super::PixelChunk::initialize).
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkSettings {
  /// Edge length in pixels.
  pub size: u32,
  /// Pixels per world unit.
  pub pixels_per_unit: f32,
  pub sorting: ChunkSorting,
  /// Sprite alpha in `[0, 1]`.
  pub transparency: f32,
}

impl ChunkSettings {
  /// Settings for a `size × size` chunk on the default layer, fully opaque.
  pub fn new(size: u32) -> Self {
    Self {
      size,
      pixels_per_unit: DEFAULT_PIXELS_PER_UNIT,
      sorting: ChunkSorting::default(),
      transparency: 1.0,
    }
  }

  pub fn with_pixels_per_unit(mut self, pixels_per_unit: f32) -> Self {
    self.pixels_per_unit = pixels_per_unit;
    self
  }

  pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
    self.sorting.layer = layer.into();
    self
  }

  pub fn with_order(mut self, order: i32) -> Self {
    self.sorting.order = order;
    self
  }

  /// Sets the sprite alpha. Values are clamped to `[0, 1]`.
  pub fn with_transparency(mut self, transparency: f32) -> Self {
    self.transparency = transparency.clamp(0.0, 1.0);
    self
  }

  pub(crate) fn validate(&self) -> Result<(), ChunkError> {
    if self.size == 0 {
      return Err(ChunkError::ZeroSize);
    }
    if !self.pixels_per_unit.is_finite() || self.pixels_per_unit <= 0.0 {
      return Err(ChunkError::InvalidPixelsPerUnit(self.pixels_per_unit));
    }
    Ok(())
  }
}
