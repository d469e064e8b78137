//! Owned 2D pixel buffer.
//!
//! A [`Surface`] is a generic 2D buffer that can hold any element type.
//! [`RgbaSurface`] is the chunk backing store and the unit of GPU upload.
//!
//! # Coordinate System
//!
//! Surfaces use a Y+ up coordinate system:
//! - **X+** is to the right
//! - **Y+** is upward
//! - **(0, 0)** is the bottom-left corner
//!
//! Data is stored in row-major order where row 0 is the bottom of the surface.

use std::ops::{Index, IndexMut};

use super::rect::Rect;
use crate::render::Rgba;

// as_bytes() reinterprets Rgba slices, so the layout must stay 4 packed bytes.
const _: () = assert!(std::mem::size_of::<Rgba>() == 4);

/// Bytes per [`Rgba`] pixel.
pub const RGBA_STRIDE: usize = 4;

/// A 2D buffer of elements.
///
/// Data is stored in row-major order (y * width + x).
#[derive(Clone, Debug, PartialEq)]
pub struct Surface<T> {
  data: Box<[T]>,
  width: u32,
  height: u32,
}

impl<T: Clone + Default> Surface<T> {
  /// Creates a new surface filled with the default value.
  pub fn new(width: u32, height: u32) -> Self {
    Self::filled(width, height, T::default())
  }
}

impl<T: Clone> Surface<T> {
  /// Creates a new surface filled with the given value.
  pub fn filled(width: u32, height: u32, value: T) -> Self {
    let len = (width as usize) * (height as usize);
    Self {
      data: vec![value; len].into_boxed_slice(),
      width,
      height,
    }
  }

  /// Fills the entire surface with the given value.
  #[inline]
  pub fn fill(&mut self, value: T) {
    self.data.fill(value);
  }

  /// Copies `src` (a region of `source`) so its bottom-left lands on
  /// `(dst_x, dst_y)` in this surface.
  ///
  /// The region is clamped to both surfaces. Returns the number of elements
  /// written.
  pub fn copy_region(&mut self, source: &Surface<T>, src: Rect, dst_x: u32, dst_y: u32) -> usize {
    let src = src.clamped(source.width, source.height);
    let dst = Rect::new(dst_x, dst_y, src.width, src.height).clamped(self.width, self.height);
    if dst.is_empty() {
      return 0;
    }

    let row_len = dst.width as usize;
    for row in 0..dst.height {
      let from = source.linear(src.x, src.y + row);
      let to = self.linear(dst.x, dst.y + row);
      self.data[to..to + row_len].clone_from_slice(&source.data[from..from + row_len]);
    }
    dst.area()
  }
}

impl<T> Surface<T> {
  /// Returns the width of the surface.
  #[inline]
  pub fn width(&self) -> u32 {
    self.width
  }

  /// Returns the height of the surface.
  #[inline]
  pub fn height(&self) -> u32 {
    self.height
  }

  /// Returns `(width, height)`.
  #[inline]
  pub fn dimensions(&self) -> (u32, u32) {
    (self.width, self.height)
  }

  #[inline]
  fn linear(&self, x: u32, y: u32) -> usize {
    (y as usize) * (self.width as usize) + (x as usize)
  }

  /// Converts (x, y) to a linear index, or `None` if out of bounds.
  #[inline]
  fn index_of(&self, x: u32, y: u32) -> Option<usize> {
    if x < self.width && y < self.height {
      Some(self.linear(x, y))
    } else {
      None
    }
  }

  /// Returns a reference to the element at (x, y), or `None` if out of bounds.
  #[inline]
  pub fn get(&self, x: u32, y: u32) -> Option<&T> {
    self.index_of(x, y).map(|i| &self.data[i])
  }

  /// Sets the element at (x, y). Returns `true` if successful, `false` if out
  /// of bounds.
  #[inline]
  pub fn set(&mut self, x: u32, y: u32, value: T) -> bool {
    if let Some(i) = self.index_of(x, y) {
      self.data[i] = value;
      true
    } else {
      false
    }
  }

  /// Returns a slice of the underlying data.
  #[inline]
  pub fn as_slice(&self) -> &[T] {
    &self.data
  }
}

impl<T> Index<(u32, u32)> for Surface<T> {
  type Output = T;

  #[inline]
  fn index(&self, (x, y): (u32, u32)) -> &Self::Output {
    &self.data[self.linear(x, y)]
  }
}

impl<T> IndexMut<(u32, u32)> for Surface<T> {
  #[inline]
  fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut Self::Output {
    let i = self.linear(x, y);
    &mut self.data[i]
  }
}

/// A surface containing RGBA pixels, suitable for GPU upload.
pub type RgbaSurface = Surface<Rgba>;

impl Surface<Rgba> {
  /// Builds a surface from tightly packed RGBA8 bytes, row 0 first.
  ///
  /// Returns `None` when `bytes` is not exactly `width * height * 4` long.
  pub fn from_bytes(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
    let mut surface = Self::new(width, height);
    surface.copy_from_bytes(bytes).then_some(surface)
  }

  /// Length in bytes of the raw pixel data.
  #[inline]
  pub fn byte_len(&self) -> usize {
    self.data.len() * RGBA_STRIDE
  }

  /// Returns the raw data as a byte slice (for GPU upload).
  #[inline]
  pub fn as_bytes(&self) -> &[u8] {
    let ptr = self.data.as_ptr() as *const u8;
    // SAFETY: Rgba is four u8 channels with no padding (asserted above), and
    // the boxed slice is contiguous.
    unsafe { std::slice::from_raw_parts(ptr, self.byte_len()) }
  }

  /// Overwrites every pixel from raw RGBA8 bytes.
  ///
  /// Returns `false` and leaves the surface untouched if the length differs
  /// from [`Self::byte_len`].
  pub fn copy_from_bytes(&mut self, bytes: &[u8]) -> bool {
    if bytes.len() != self.byte_len() {
      log::debug!(
        "rejected raw copy: {} bytes into {}x{} surface",
        bytes.len(),
        self.width,
        self.height
      );
      return false;
    }
    for (pixel, b) in self.data.iter_mut().zip(bytes.chunks_exact(RGBA_STRIDE)) {
      *pixel = Rgba::new(b[0], b[1], b[2], b[3]);
    }
    true
  }
}
