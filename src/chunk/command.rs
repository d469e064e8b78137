//! Command for initializing a chunk entity from ECS code.

use bevy::ecs::system::Command;
use bevy::prelude::*;

use super::{ChunkError, ChunkSettings, PixelChunk};
use crate::config::PixelChunkConfig;
use crate::primitives::RgbaSurface;

/// Initializes (or re-initializes) the [`PixelChunk`] on `entity` and
/// inserts its sprite.
///
/// The entity gets a `PixelChunk` if it does not have one. Without explicit
/// settings the chunk edge is the source width and the pixels-per-unit comes
/// from [`PixelChunkConfig`].
///
/// # Example
/// ```ignore
/// fn spawn_chunk(mut commands: Commands) {
///     let entity = commands.spawn(Transform::from_xyz(0.0, 0.0, 0.0)).id();
///     let source = RgbaSurface::new(32, 32);
///     commands.queue(InitializeChunk::new(entity, source).with_layer("Terrain"));
/// }
/// ```
pub struct InitializeChunk {
  entity: Entity,
  source: RgbaSurface,
  settings: Option<ChunkSettings>,
  layer: Option<String>,
  order: i32,
  transparency: f32,
}

impl InitializeChunk {
  pub fn new(entity: Entity, source: RgbaSurface) -> Self {
    Self {
      entity,
      source,
      settings: None,
      layer: None,
      order: 0,
      transparency: 1.0,
    }
  }

  /// Uses explicit settings, ignoring the config defaults and the other
  /// builder methods.
  pub fn with_settings(mut self, settings: ChunkSettings) -> Self {
    self.settings = Some(settings);
    self
  }

  pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
    self.layer = Some(layer.into());
    self
  }

  pub fn with_order(mut self, order: i32) -> Self {
    self.order = order;
    self
  }

  pub fn with_transparency(mut self, transparency: f32) -> Self {
    self.transparency = transparency;
    self
  }

  fn resolve_settings(&mut self, config: Option<&PixelChunkConfig>) -> ChunkSettings {
    if let Some(settings) = self.settings.take() {
      return settings;
    }
    let base = match config {
      Some(config) => config.settings(self.source.width()),
      None => ChunkSettings::new(self.source.width()),
    };
    let base = match self.layer.take() {
      Some(layer) => base.with_layer(layer),
      None => base,
    };
    base
      .with_order(self.order)
      .with_transparency(self.transparency)
  }

  fn try_apply(mut self, world: &mut World) -> Result<(), ChunkError> {
    let config = world.get_resource::<PixelChunkConfig>();
    let settings = self.resolve_settings(config);
    if config.is_some_and(|config| config.layer_depth(&settings.sorting.layer).is_none()) {
      warn!(
        "Chunk {} uses unknown sorting layer {:?}, placing it at depth 0",
        self.entity, settings.sorting.layer
      );
    }
    let entity = self.entity;
    let source = self.source;

    world
      .try_resource_scope(|world, mut images: Mut<Assets<Image>>| {
        let mut entity_mut = world
          .get_entity_mut(entity)
          .map_err(|_| ChunkError::MissingEntity(entity))?;
        if !entity_mut.contains::<PixelChunk>() {
          entity_mut.insert(PixelChunk::default());
        }

        let surface = {
          let mut chunk = entity_mut
            .get_mut::<PixelChunk>()
            .ok_or(ChunkError::MissingEntity(entity))?;
          chunk.initialize(&mut images, &source, settings)?;
          chunk.render_surface().ok_or(ChunkError::Uninitialized)?
        };
        entity_mut.insert(surface);
        Ok(())
      })
      .unwrap_or(Err(ChunkError::NoImageAssets))
  }
}

impl Command for InitializeChunk {
  fn apply(self, world: &mut World) {
    let entity = self.entity;
    if let Err(err) = self.try_apply(world) {
      warn!("Failed to initialize chunk {}: {}", entity, err);
    }
  }
}
