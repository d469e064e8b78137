//! GPU texture creation and upload for chunk surfaces.
//!
//! Surfaces are Y+ up while Bevy images store the top row first. Uploads copy
//! rows verbatim and the chunk sprite is flipped vertically, so only
//! [`surface_from_image`] has to reorder rows.

use bevy::asset::RenderAssetUsages;
use bevy::image::ImageSampler;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::chunk::ChunkError;
use crate::primitives::{RGBA_STRIDE, RgbaSurface};

/// Creates an RGBA8 texture with nearest-neighbor sampling.
///
/// Returns a handle to the created image.
pub fn create_texture(images: &mut Assets<Image>, width: u32, height: u32) -> Handle<Image> {
  let size = Extent3d {
    width,
    height,
    depth_or_array_layers: 1,
  };

  let mut image = Image::new_fill(
    size,
    TextureDimension::D2,
    &[0, 0, 0, 0],
    TextureFormat::Rgba8UnormSrgb,
    RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
  );

  // Point filtering keeps chunk pixels crisp at any zoom
  image.sampler = ImageSampler::nearest();

  images.add(image)
}

/// Uploads surface pixel data to an existing texture.
///
/// Returns `false` when the image has no CPU-side data or its length differs
/// from the surface.
pub fn upload_surface(surface: &RgbaSurface, image: &mut Image) -> bool {
  let bytes = surface.as_bytes();
  match image.data {
    Some(ref mut data) if data.len() == bytes.len() => {
      data.copy_from_slice(bytes);
      true
    }
    _ => false,
  }
}

/// Imports an RGBA8 image into a Y+ up surface.
pub fn surface_from_image(image: &Image) -> Result<RgbaSurface, ChunkError> {
  let format = image.texture_descriptor.format;
  if !matches!(
    format,
    TextureFormat::Rgba8UnormSrgb | TextureFormat::Rgba8Unorm | TextureFormat::Rgba8Uint
  ) {
    return Err(ChunkError::UnsupportedFormat(format));
  }

  let data = image.data.as_ref().ok_or(ChunkError::MissingImageData)?;
  let (width, height) = (image.width(), image.height());
  let row_bytes = width as usize * RGBA_STRIDE;
  let expected = row_bytes * height as usize;
  if data.len() != expected {
    return Err(ChunkError::ByteLengthMismatch {
      expected,
      actual: data.len(),
    });
  }

  let flipped: Vec<u8> = data
    .chunks_exact(row_bytes.max(1))
    .rev()
    .flatten()
    .copied()
    .collect();

  RgbaSurface::from_bytes(width, height, &flipped).ok_or(ChunkError::ByteLengthMismatch {
    expected,
    actual: flipped.len(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::render::rgb;

  fn image_from_rows(width: u32, height: u32, data: Vec<u8>, format: TextureFormat) -> Image {
    Image::new(
      Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
      },
      TextureDimension::D2,
      data,
      format,
      RenderAssetUsages::MAIN_WORLD,
    )
  }

  #[test]
  fn created_texture_is_point_filtered() {
    let mut images = Assets::<Image>::default();
    let handle = create_texture(&mut images, 4, 2);
    let image = images.get(&handle).unwrap();
    assert_eq!(image.width(), 4);
    assert_eq!(image.height(), 2);
    assert_eq!(image.texture_descriptor.format, TextureFormat::Rgba8UnormSrgb);
    assert!(matches!(image.sampler, ImageSampler::Descriptor(_)));
  }

  #[test]
  fn upload_copies_raw_bytes() {
    let mut images = Assets::<Image>::default();
    let handle = create_texture(&mut images, 2, 1);
    let mut surface = RgbaSurface::new(2, 1);
    surface.set(1, 0, rgb(1, 2, 3));

    let image = images.get_mut(&handle).unwrap();
    assert!(upload_surface(&surface, image));
    assert_eq!(image.data.as_deref(), Some(surface.as_bytes()));
  }

  #[test]
  fn upload_rejects_size_mismatch() {
    let mut images = Assets::<Image>::default();
    let handle = create_texture(&mut images, 3, 3);
    let surface = RgbaSurface::new(2, 2);
    assert!(!upload_surface(&surface, images.get_mut(&handle).unwrap()));
  }

  #[test]
  fn import_flips_rows_to_y_up() {
    // Top row red, bottom row blue, as an image file stores them.
    let data = vec![
      255, 0, 0, 255, 255, 0, 0, 255, //
      0, 0, 255, 255, 0, 0, 255, 255,
    ];
    let image = image_from_rows(2, 2, data, TextureFormat::Rgba8UnormSrgb);
    let surface = surface_from_image(&image).unwrap();
    assert_eq!(surface[(0, 0)], rgb(0, 0, 255));
    assert_eq!(surface[(1, 1)], rgb(255, 0, 0));
  }

  #[test]
  fn import_rejects_other_formats() {
    let image = image_from_rows(1, 1, vec![0; 4], TextureFormat::R32Float);
    assert!(matches!(
      surface_from_image(&image),
      Err(ChunkError::UnsupportedFormat(TextureFormat::R32Float))
    ));
  }
}
