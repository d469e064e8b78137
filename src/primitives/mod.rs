mod rect;
mod surface;

pub use rect::Rect;
pub use surface::{RGBA_STRIDE, RgbaSurface, Surface};
