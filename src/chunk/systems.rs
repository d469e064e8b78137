//! Systems that keep chunk sprites and textures in step with chunk state.

use bevy::color::Alpha;
use bevy::prelude::*;

use super::PixelChunk;
use crate::config::PixelChunkConfig;

/// System: Uploads every dirty chunk buffer to its texture.
///
/// Runs before rendering extracts images, so buffer writes made during
/// `Update` are visible in the same frame.
pub(crate) fn commit_dirty_chunks(
  mut chunks: Query<(Entity, &mut PixelChunk)>,
  mut images: ResMut<Assets<Image>>,
) {
  let mut committed = 0usize;
  for (entity, mut chunk) in &mut chunks {
    if !chunk.is_dirty() {
      continue;
    }
    if chunk.commit(&mut images) {
      committed += 1;
    } else {
      debug!("Chunk {} is dirty but its texture is unavailable", entity);
    }
  }
  if committed > 0 {
    trace!("Committed {} dirty chunks", committed);
  }
}

/// System: Mirrors chunk transparency onto the sprite color.
pub(crate) fn sync_chunk_sprites(
  mut chunks: Query<(&PixelChunk, &mut Sprite), Changed<PixelChunk>>,
) {
  for (chunk, mut sprite) in &mut chunks {
    if !chunk.is_initialized() {
      continue;
    }
    let alpha = chunk.transparency();
    if sprite.color.alpha() != alpha {
      sprite.color.set_alpha(alpha);
    }
  }
}

/// System: Places chunks on the Z axis from their sorting layer and order.
///
/// Re-evaluates every chunk when the config changes, otherwise only chunks
/// whose component changed.
pub(crate) fn apply_chunk_sorting(
  config: Res<PixelChunkConfig>,
  mut chunks: Query<(Ref<PixelChunk>, &mut Transform)>,
) {
  let refresh_all = config.is_changed();
  for (chunk, mut transform) in &mut chunks {
    if !refresh_all && !chunk.is_changed() {
      continue;
    }
    if !chunk.is_initialized() {
      continue;
    }
    let z = config.sorting_depth(chunk.sorting());
    if transform.translation.z != z {
      transform.translation.z = z;
    }
  }
}
