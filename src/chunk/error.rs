use std::fmt;

use bevy::prelude::Entity;
use bevy::render::render_resource::TextureFormat;

/// Errors raised by chunk initialization and buffer copies.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkError {
  /// Chunk edge length of zero.
  ZeroSize,
  /// Pixels per unit must be finite and positive.
  InvalidPixelsPerUnit(f32),
  /// Source surface dimensions differ from the chunk buffer.
  SizeMismatch {
    expected: (u32, u32),
    actual: (u32, u32),
  },
  /// Raw byte source has the wrong length.
  ByteLengthMismatch { expected: usize, actual: usize },
  /// Operation needs an initialized chunk.
  Uninitialized,
  /// Image pixel format cannot be imported as RGBA8.
  UnsupportedFormat(TextureFormat),
  /// Image has no CPU-side pixel data.
  MissingImageData,
  /// Target entity does not exist.
  MissingEntity(Entity),
  /// `Assets<Image>` is not registered in the world.
  NoImageAssets,
}

impl fmt::Display for ChunkError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::ZeroSize => write!(f, "chunk size must be greater than zero"),
      Self::InvalidPixelsPerUnit(ppu) => write!(f, "invalid pixels per unit: {ppu}"),
      Self::SizeMismatch { expected, actual } => write!(
        f,
        "size mismatch: expected {}x{}, got {}x{}",
        expected.0, expected.1, actual.0, actual.1
      ),
      Self::ByteLengthMismatch { expected, actual } => {
        write!(f, "byte length mismatch: expected {expected}, got {actual}")
      }
      Self::Uninitialized => write!(f, "chunk is not initialized"),
      Self::UnsupportedFormat(format) => write!(f, "unsupported texture format: {format:?}"),
      Self::MissingImageData => write!(f, "image has no pixel data"),
      Self::MissingEntity(entity) => write!(f, "entity {entity} does not exist"),
      Self::NoImageAssets => write!(f, "Assets<Image> resource is missing"),
    }
  }
}

impl std::error::Error for ChunkError {}
