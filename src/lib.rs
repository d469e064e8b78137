//! Pixel Chunk - fixed-size raster tiles for Bevy.
//!
//! A [`PixelChunk`] is one square tile of a larger pixel canvas. It owns its
//! pixel buffer, renders through a point-filtered sprite, and tracks writes
//! with a dirty flag that [`PixelChunkPlugin`] commits every frame.
//!
//! The [`utils`] module holds the small stateless helpers (grid
//! construction, component extraction, positive modulo) used alongside it.

pub mod chunk;
pub mod config;
pub mod coords;
mod plugin;
pub mod primitives;
pub mod render;
pub mod utils;

pub use chunk::{
  ChunkError, ChunkSettings, ChunkSorting, DEFAULT_LAYER, DEFAULT_PIXELS_PER_UNIT,
  InitializeChunk, PixelChunk,
};
pub use config::{ConfigError, PixelChunkConfig, SortingLayer};
pub use coords::{CanvasPos, ChunkPos, LocalPos};
pub use plugin::{ChunkSet, PixelChunkPlugin};
pub use primitives::{Rect, RgbaSurface, Surface};
pub use render::{Rgba, create_texture, rgb, surface_from_image, upload_surface};
pub use utils::{
  PositiveMod, all_equal, extract_components, extract_with, make_filled_1d, make_filled_2d,
  positive_mod, positive_mod_unsigned,
};
