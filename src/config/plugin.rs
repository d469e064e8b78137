use bevy::asset::AssetEvent;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::PixelChunkConfig;

/// Asset path of the chunk config, relative to the asset folder.
#[derive(Resource)]
pub(crate) struct ConfigSource(pub String);

#[derive(Resource)]
pub(crate) struct ConfigHandle(pub Handle<PixelChunkConfig>);

pub(crate) fn load_config_asset(
  mut commands: Commands,
  asset_server: Res<AssetServer>,
  source: Res<ConfigSource>,
) {
  let handle: Handle<PixelChunkConfig> = asset_server.load(source.0.clone());
  info!("Loading chunk config from {}", source.0);
  commands.insert_resource(ConfigHandle(handle));
}

pub(crate) fn watch_config_changes(
  mut commands: Commands,
  config_handle: Option<Res<ConfigHandle>>,
  mut messages: MessageReader<AssetEvent<PixelChunkConfig>>,
  configs: Res<Assets<PixelChunkConfig>>,
) {
  let Some(config_handle) = config_handle else {
    return;
  };
  for event in messages.read() {
    let (AssetEvent::LoadedWithDependencies { id } | AssetEvent::Modified { id }) = event else {
      continue;
    };
    if config_handle.0.id() != *id {
      continue;
    }
    if let Some(config) = configs.get(&config_handle.0) {
      info!("Chunk config reloaded");
      commands.insert_resource(config.clone());
    }
  }
}
