//! PixelChunk - one fixed-size square tile of a larger pixel canvas.
//!
//! A chunk owns a CPU-side [`RgbaSurface`] and a GPU texture the chunk's
//! sprite samples. Buffer writes only touch the CPU copy and set a dirty
//! flag; [`PixelChunk::commit`] (run automatically by
//! [`ChunkSet::Commit`](crate::ChunkSet::Commit)) uploads it.
//!
//! Lifecycle: `Uninitialized` → `Initialized` via [`PixelChunk::initialize`].
//! Re-initializing releases the previous texture before allocating a new
//! one. [`PixelChunk::release`] returns to `Uninitialized`.

mod command;
mod error;
mod settings;
pub(crate) mod systems;

use bevy::color::Alpha;
use bevy::prelude::*;
use bevy::sprite::Anchor;

pub use command::InitializeChunk;
pub use error::ChunkError;
pub use settings::{ChunkSettings, ChunkSorting, DEFAULT_LAYER, DEFAULT_PIXELS_PER_UNIT};

use crate::coords::LocalPos;
use crate::primitives::{Rect, RgbaSurface};
use crate::render::{Rgba, create_texture, upload_surface};

/// A single addressable raster tile.
#[derive(Component, Debug)]
#[require(Transform, Visibility)]
pub struct PixelChunk {
  size: u32,
  pixels_per_unit: f32,
  pixels: RgbaSurface,
  texture: Option<Handle<Image>>,
  transparency: f32,
  sorting: ChunkSorting,
  /// CPU buffer differs from the texture.
  dirty: bool,
}

impl Default for PixelChunk {
  fn default() -> Self {
    Self {
      size: 0,
      pixels_per_unit: DEFAULT_PIXELS_PER_UNIT,
      pixels: RgbaSurface::new(0, 0),
      texture: None,
      transparency: 1.0,
      sorting: ChunkSorting::default(),
      dirty: false,
    }
  }
}

impl PixelChunk {
  /// (Re)builds the chunk from `source`.
  ///
  /// `source` must be exactly `settings.size` on each edge. Any texture from
  /// a previous initialization is removed from `images` first. The new
  /// texture holds the source pixels on return, so the chunk starts clean.
  pub fn initialize(
    &mut self,
    images: &mut Assets<Image>,
    source: &RgbaSurface,
    settings: ChunkSettings,
  ) -> Result<(), ChunkError> {
    settings.validate()?;
    let expected = (settings.size, settings.size);
    if source.dimensions() != expected {
      return Err(ChunkError::SizeMismatch {
        expected,
        actual: source.dimensions(),
      });
    }

    self.release(images);

    let pixels = source.clone();
    let texture = create_texture(images, settings.size, settings.size);
    if let Some(image) = images.get_mut(&texture) {
      upload_surface(&pixels, image);
    }

    debug!(
      "chunk initialized: size={} ppu={} layer={} order={}",
      settings.size, settings.pixels_per_unit, settings.sorting.layer, settings.sorting.order
    );

    self.size = settings.size;
    self.pixels_per_unit = settings.pixels_per_unit;
    self.pixels = pixels;
    self.texture = Some(texture);
    self.transparency = settings.transparency.clamp(0.0, 1.0);
    self.sorting = settings.sorting;
    self.dirty = false;
    Ok(())
  }

  /// Removes the texture from `images` and returns to the uninitialized
  /// state. No-op when already uninitialized.
  pub fn release(&mut self, images: &mut Assets<Image>) {
    let Some(texture) = self.texture.take() else {
      return;
    };
    images.remove(&texture);
    self.size = 0;
    self.pixels = RgbaSurface::new(0, 0);
    self.dirty = false;
  }

  /// Sprite and anchor presenting this chunk, or `None` before
  /// initialization.
  ///
  /// The sprite is anchored at its bottom-left corner (the chunk's local
  /// origin), spans `size / pixels_per_unit` world units, and is flipped
  /// vertically because surfaces store their bottom row first.
  pub fn render_surface(&self) -> Option<(Sprite, Anchor)> {
    let image = self.texture.clone()?;
    let edge = self.size as f32;
    let sprite = Sprite {
      image,
      color: Color::WHITE.with_alpha(self.transparency),
      custom_size: Some(self.world_size()),
      rect: Some(bevy::math::Rect::new(0.0, 0.0, edge, edge)),
      flip_y: true,
      ..default()
    };
    Some((sprite, Anchor::BOTTOM_LEFT))
  }

  /// Raw-copies `source` over the whole buffer and marks the chunk dirty.
  ///
  /// The texture is left untouched until [`Self::commit`].
  pub fn set_texture(&mut self, source: &RgbaSurface) -> Result<(), ChunkError> {
    self.ensure_initialized()?;
    if source.dimensions() != self.pixels.dimensions() {
      return Err(ChunkError::SizeMismatch {
        expected: self.pixels.dimensions(),
        actual: source.dimensions(),
      });
    }
    self.set_texture_bytes(source.as_bytes())
  }

  /// Like [`Self::set_texture`], from tightly packed RGBA8 bytes (bottom row
  /// first).
  pub fn set_texture_bytes(&mut self, bytes: &[u8]) -> Result<(), ChunkError> {
    self.ensure_initialized()?;
    if !self.pixels.copy_from_bytes(bytes) {
      return Err(ChunkError::ByteLengthMismatch {
        expected: self.pixels.byte_len(),
        actual: bytes.len(),
      });
    }
    self.dirty = true;
    Ok(())
  }

  /// Copies part of `source` into the chunk with its bottom-left at `dst`.
  ///
  /// The region is clamped to both surfaces. Returns the number of pixels
  /// written; the chunk is marked dirty only if that is non-zero.
  pub fn copy_region(
    &mut self,
    source: &RgbaSurface,
    src: Rect,
    dst: LocalPos,
  ) -> Result<usize, ChunkError> {
    self.ensure_initialized()?;
    let written = self.pixels.copy_region(source, src, dst.x, dst.y);
    if written > 0 {
      self.dirty = true;
    }
    Ok(written)
  }

  /// Writes one pixel. Returns `false` when out of bounds.
  pub fn set_pixel(&mut self, pos: LocalPos, color: Rgba) -> bool {
    let written = self.pixels.set(pos.x, pos.y, color);
    self.dirty |= written;
    written
  }

  /// Reads one pixel from the CPU buffer.
  pub fn pixel(&self, pos: LocalPos) -> Option<Rgba> {
    self.pixels.get(pos.x, pos.y).copied()
  }

  /// Uploads the buffer to the texture if dirty.
  ///
  /// Returns `true` when an upload happened. If the texture asset has gone
  /// missing the chunk stays dirty.
  pub fn commit(&mut self, images: &mut Assets<Image>) -> bool {
    if !self.dirty {
      return false;
    }
    let Some(image) = self.texture.as_ref().and_then(|h| images.get_mut(h)) else {
      return false;
    };
    if !upload_surface(&self.pixels, image) {
      return false;
    }
    self.dirty = false;
    true
  }

  /// Edge length in pixels; `0` before initialization.
  #[inline]
  pub fn size(&self) -> u32 {
    self.size
  }

  #[inline]
  pub fn pixels_per_unit(&self) -> f32 {
    self.pixels_per_unit
  }

  #[inline]
  pub fn transparency(&self) -> f32 {
    self.transparency
  }

  /// Sets the sprite alpha, clamped to `[0, 1]`. Applied to the sprite by
  /// [`ChunkSet::Sync`](crate::ChunkSet::Sync).
  pub fn set_transparency(&mut self, transparency: f32) {
    self.transparency = transparency.clamp(0.0, 1.0);
  }

  #[inline]
  pub fn sorting(&self) -> &ChunkSorting {
    &self.sorting
  }

  pub fn set_sorting(&mut self, sorting: ChunkSorting) {
    self.sorting = sorting;
  }

  #[inline]
  pub fn texture(&self) -> Option<&Handle<Image>> {
    self.texture.as_ref()
  }

  /// The CPU-side buffer.
  #[inline]
  pub fn pixels(&self) -> &RgbaSurface {
    &self.pixels
  }

  #[inline]
  pub fn is_dirty(&self) -> bool {
    self.dirty
  }

  #[inline]
  pub fn is_initialized(&self) -> bool {
    self.texture.is_some()
  }

  /// Footprint in world units.
  pub fn world_size(&self) -> Vec2 {
    Vec2::splat(self.size as f32 / self.pixels_per_unit)
  }

  fn ensure_initialized(&self) -> Result<(), ChunkError> {
    if self.is_initialized() {
      Ok(())
    } else {
      Err(ChunkError::Uninitialized)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::render::rgb;

  fn checker(size: u32) -> RgbaSurface {
    let mut surface = RgbaSurface::new(size, size);
    for y in 0..size {
      for x in 0..size {
        let v = if (x + y) % 2 == 0 { 255 } else { 0 };
        surface.set(x, y, rgb(v, x as u8, y as u8));
      }
    }
    surface
  }

  fn initialized(size: u32, images: &mut Assets<Image>) -> PixelChunk {
    let mut chunk = PixelChunk::default();
    chunk
      .initialize(images, &checker(size), ChunkSettings::new(size))
      .unwrap();
    chunk
  }

  #[test]
  fn initialize_copies_source_and_uploads() {
    let mut images = Assets::<Image>::default();
    let source = checker(8);
    let mut chunk = PixelChunk::default();
    assert!(!chunk.is_initialized());

    chunk
      .initialize(
        &mut images,
        &source,
        ChunkSettings::new(8).with_transparency(0.25),
      )
      .unwrap();

    assert_eq!(chunk.size(), 8);
    assert_eq!(chunk.pixels_per_unit(), DEFAULT_PIXELS_PER_UNIT);
    assert_eq!(chunk.pixels(), &source);
    assert!(!chunk.is_dirty());

    let image = images.get(chunk.texture().unwrap()).unwrap();
    assert_eq!(image.data.as_deref(), Some(source.as_bytes()));

    let (sprite, anchor) = chunk.render_surface().unwrap();
    assert_eq!(sprite.color.alpha(), 0.25);
    assert_eq!(anchor.0, Anchor::BOTTOM_LEFT.0);
    assert_eq!(sprite.custom_size, Some(Vec2::splat(0.08)));
    assert!(sprite.flip_y);
  }

  #[test]
  fn initialize_rejects_bad_input() {
    let mut images = Assets::<Image>::default();
    let mut chunk = PixelChunk::default();
    assert_eq!(
      chunk.initialize(&mut images, &checker(4), ChunkSettings::new(8)),
      Err(ChunkError::SizeMismatch {
        expected: (8, 8),
        actual: (4, 4)
      })
    );
    assert_eq!(
      chunk.initialize(&mut images, &checker(4), ChunkSettings::new(0)),
      Err(ChunkError::ZeroSize)
    );
    assert!(!chunk.is_initialized());
    assert_eq!(images.len(), 0);
  }

  #[test]
  fn initialize_clamps_literal_transparency() {
    let mut images = Assets::<Image>::default();
    let mut chunk = PixelChunk::default();
    let settings = ChunkSettings {
      transparency: 5.0,
      ..ChunkSettings::new(4)
    };
    chunk.initialize(&mut images, &checker(4), settings).unwrap();
    assert_eq!(chunk.transparency(), 1.0);
    let (sprite, _) = chunk.render_surface().unwrap();
    assert_eq!(sprite.color.alpha(), 1.0);

    let settings = ChunkSettings {
      transparency: -3.0,
      ..ChunkSettings::new(4)
    };
    chunk.initialize(&mut images, &checker(4), settings).unwrap();
    assert_eq!(chunk.transparency(), 0.0);
  }

  #[test]
  fn reinitialize_releases_previous_texture() {
    let mut images = Assets::<Image>::default();
    let mut chunk = initialized(4, &mut images);
    let first = chunk.texture().unwrap().id();

    chunk
      .initialize(&mut images, &checker(16), ChunkSettings::new(16))
      .unwrap();

    assert!(images.get(first).is_none());
    assert_eq!(images.len(), 1);
    assert_eq!(chunk.size(), 16);
    assert_ne!(chunk.texture().unwrap().id(), first);
  }

  #[test]
  fn set_texture_defers_upload_until_commit() {
    let mut images = Assets::<Image>::default();
    let mut chunk = initialized(8, &mut images);
    let replacement = RgbaSurface::filled(8, 8, rgb(10, 20, 30));

    chunk.set_texture(&replacement).unwrap();
    assert!(chunk.is_dirty());
    assert_eq!(chunk.size(), 8);
    assert_eq!(chunk.pixels().as_bytes(), replacement.as_bytes());

    let texture = chunk.texture().unwrap().clone();
    assert_ne!(
      images.get(&texture).unwrap().data.as_deref(),
      Some(replacement.as_bytes())
    );

    assert!(chunk.commit(&mut images));
    assert!(!chunk.is_dirty());
    assert_eq!(
      images.get(&texture).unwrap().data.as_deref(),
      Some(replacement.as_bytes())
    );
    assert!(!chunk.commit(&mut images));
  }

  #[test]
  fn set_texture_requires_matching_size() {
    let mut images = Assets::<Image>::default();
    let mut chunk = initialized(8, &mut images);
    let err = chunk.set_texture(&checker(4)).unwrap_err();
    assert_eq!(
      err,
      ChunkError::SizeMismatch {
        expected: (8, 8),
        actual: (4, 4)
      }
    );
    assert!(!chunk.is_dirty());

    let err = chunk.set_texture_bytes(&[0; 12]).unwrap_err();
    assert_eq!(
      err,
      ChunkError::ByteLengthMismatch {
        expected: 256,
        actual: 12
      }
    );
  }

  #[test]
  fn writes_before_initialize_fail() {
    let mut chunk = PixelChunk::default();
    assert_eq!(
      chunk.set_texture(&checker(2)),
      Err(ChunkError::Uninitialized)
    );
    assert!(!chunk.set_pixel(LocalPos::new(0, 0), rgb(1, 1, 1)));
    assert!(chunk.render_surface().is_none());
  }

  #[test]
  fn copy_region_and_pixels_mark_dirty() {
    let mut images = Assets::<Image>::default();
    let mut chunk = initialized(4, &mut images);
    let patch = RgbaSurface::filled(2, 2, rgb(7, 7, 7));

    let written = chunk
      .copy_region(&patch, Rect::full(2, 2), LocalPos::new(3, 3))
      .unwrap();
    assert_eq!(written, 1);
    assert!(chunk.is_dirty());
    assert_eq!(chunk.pixel(LocalPos::new(3, 3)), Some(rgb(7, 7, 7)));

    chunk.commit(&mut images);
    let written = chunk
      .copy_region(&patch, Rect::full(2, 2), LocalPos::new(9, 9))
      .unwrap();
    assert_eq!(written, 0);
    assert!(!chunk.is_dirty());

    assert!(chunk.set_pixel(LocalPos::new(0, 0), rgb(1, 2, 3)));
    assert!(chunk.is_dirty());
    assert!(!chunk.set_pixel(LocalPos::new(4, 0), rgb(1, 2, 3)));
    assert_eq!(chunk.pixel(LocalPos::new(4, 0)), None);
  }

  #[test]
  fn release_removes_texture() {
    let mut images = Assets::<Image>::default();
    let mut chunk = initialized(4, &mut images);
    chunk.release(&mut images);
    assert!(!chunk.is_initialized());
    assert_eq!(chunk.size(), 0);
    assert_eq!(images.len(), 0);
    chunk.release(&mut images);
  }

  #[test]
  fn commit_keeps_dirty_when_texture_vanished() {
    let mut images = Assets::<Image>::default();
    let mut chunk = initialized(2, &mut images);
    chunk.set_pixel(LocalPos::new(1, 1), rgb(0, 0, 0));
    images.remove(chunk.texture().unwrap());
    assert!(!chunk.commit(&mut images));
    assert!(chunk.is_dirty());
  }
}
