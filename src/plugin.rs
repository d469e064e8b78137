//! Plugin wiring for chunk commit and sprite sync.

use bevy::prelude::*;
use bevy::transform::TransformSystems;
use bevy_common_assets::toml::TomlAssetPlugin;

use crate::chunk::systems::{apply_chunk_sorting, commit_dirty_chunks, sync_chunk_sprites};
use crate::config::{ConfigSource, PixelChunkConfig, load_config_asset, watch_config_changes};

/// System sets for chunk maintenance, both in `PostUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChunkSet {
  /// Sprite alpha and Z placement follow chunk state.
  Sync,
  /// Dirty buffers are uploaded to their textures.
  Commit,
}

/// Plugin for pixel chunk tiles.
///
/// This plugin provides:
/// - The [`PixelChunkConfig`] resource (sorting layers, default scale)
/// - Automatic commit of dirty chunk buffers before rendering
/// - Sprite alpha and Z-order sync from chunk state
/// - Optional hot-reloadable config asset (needs `AssetPlugin`)
///
/// Requires `Assets<Image>`, which `DefaultPlugins` provides.
#[derive(Default)]
pub struct PixelChunkPlugin {
  /// Config used until (or instead of) the config asset loads.
  pub config: PixelChunkConfig,
  /// Asset path of a `*.chunks.toml` config file.
  pub config_path: Option<String>,
}

impl PixelChunkPlugin {
  /// Sets the in-code configuration.
  pub fn config(mut self, config: PixelChunkConfig) -> Self {
    self.config = config;
    self
  }

  /// Loads the configuration from an asset path such as
  /// `"config/world.chunks.toml"`, reloading it when the file changes.
  pub fn config_path(mut self, path: impl Into<String>) -> Self {
    self.config_path = Some(path.into());
    self
  }
}

impl Plugin for PixelChunkPlugin {
  fn build(&self, app: &mut App) {
    app.insert_resource(self.config.clone());

    if let Some(ref path) = self.config_path {
      app
        .add_plugins(TomlAssetPlugin::<PixelChunkConfig>::new(&["chunks.toml"]))
        .insert_resource(ConfigSource(path.clone()))
        .add_systems(Startup, load_config_asset)
        .add_systems(Update, watch_config_changes);
    }

    app
      .configure_sets(
        PostUpdate,
        (ChunkSet::Sync, ChunkSet::Commit)
          .chain()
          .before(TransformSystems::Propagate),
      )
      .add_systems(
        PostUpdate,
        (sync_chunk_sprites, apply_chunk_sorting).in_set(ChunkSet::Sync),
      )
      .add_systems(PostUpdate, commit_dirty_chunks.in_set(ChunkSet::Commit));
  }
}
