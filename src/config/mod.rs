//! Chunk rendering configuration.
//!
//! Loaded from TOML, either directly ([`PixelChunkConfig::from_toml_str`],
//! [`PixelChunkConfig::load`]) or as a hot-reloadable asset when
//! [`PixelChunkPlugin::config_path`](crate::PixelChunkPlugin::config_path)
//! is set.
//!
//! ```toml
//! default_pixels_per_unit = 16.0
//! order_spacing = 0.001
//!
//! [[layers]]
//! name = "Default"
//! depth = 0.0
//!
//! [[layers]]
//! name = "Foreground"
//! depth = 10.0
//! ```

mod plugin;

use std::path::Path;
use std::{fmt, io};

use bevy::{asset::Asset, prelude::*, reflect::TypePath};
pub(crate) use plugin::{ConfigSource, load_config_asset, watch_config_changes};
use serde::Deserialize;

use crate::chunk::{ChunkSettings, ChunkSorting, DEFAULT_LAYER, DEFAULT_PIXELS_PER_UNIT};

/// Named sorting layer and its base Z depth.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SortingLayer {
  pub name: String,
  pub depth: f32,
}

#[derive(Asset, TypePath, Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PixelChunkConfig {
  /// Used by [`InitializeChunk`](crate::InitializeChunk) when no explicit
  /// settings are given.
  pub default_pixels_per_unit: f32,
  /// Z distance between consecutive orders in one layer. Keep
  /// `order_spacing * max_order` below the gap between layer depths.
  pub order_spacing: f32,
  pub layers: Vec<SortingLayer>,
}

impl Default for PixelChunkConfig {
  fn default() -> Self {
    Self {
      default_pixels_per_unit: DEFAULT_PIXELS_PER_UNIT,
      order_spacing: 0.001,
      layers: vec![SortingLayer {
        name: DEFAULT_LAYER.to_string(),
        depth: 0.0,
      }],
    }
  }
}

impl PixelChunkConfig {
  pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str(source)?)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let source = std::fs::read_to_string(path)?;
    Self::from_toml_str(&source)
  }

  /// Settings for a `size × size` chunk using this config's defaults.
  pub fn settings(&self, size: u32) -> ChunkSettings {
    ChunkSettings::new(size).with_pixels_per_unit(self.default_pixels_per_unit)
  }

  /// Depth of a named layer, or `None` if the layer is not configured.
  pub fn layer_depth(&self, name: &str) -> Option<f32> {
    self
      .layers
      .iter()
      .find(|layer| layer.name == name)
      .map(|layer| layer.depth)
  }

  /// Z translation for a chunk with the given sorting.
  ///
  /// Unknown layers sort at depth `0.0`. This runs every time a chunk
  /// changes, so the miss is only logged at debug level.
  pub fn sorting_depth(&self, sorting: &ChunkSorting) -> f32 {
    let base = self.layer_depth(&sorting.layer).unwrap_or_else(|| {
      log::debug!("unknown sorting layer {:?}, using depth 0", sorting.layer);
      0.0
    });
    base + sorting.order as f32 * self.order_spacing
  }
}

/// Error reading or parsing a config file.
#[derive(Debug)]
pub enum ConfigError {
  Io(io::Error),
  Parse(toml::de::Error),
}

impl From<io::Error> for ConfigError {
  fn from(err: io::Error) -> Self {
    Self::Io(err)
  }
}

impl From<toml::de::Error> for ConfigError {
  fn from(err: toml::de::Error) -> Self {
    Self::Parse(err)
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Io(e) => write!(f, "I/O error: {e}"),
      Self::Parse(e) => write!(f, "parse error: {e}"),
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io(e) => Some(e),
      Self::Parse(e) => Some(e),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_has_default_layer() {
    let config = PixelChunkConfig::default();
    assert_eq!(config.layer_depth("Default"), Some(0.0));
    assert_eq!(config.layer_depth("Missing"), None);
  }

  #[test]
  fn partial_toml_keeps_defaults() {
    let config = PixelChunkConfig::from_toml_str("default_pixels_per_unit = 16.0").unwrap();
    assert_eq!(config.default_pixels_per_unit, 16.0);
    assert_eq!(config.order_spacing, 0.001);
    assert_eq!(config.layers.len(), 1);
    assert_eq!(config.settings(32).pixels_per_unit, 16.0);
  }

  #[test]
  fn sorting_depth_adds_order() {
    let config = PixelChunkConfig {
      order_spacing: 0.5,
      layers: vec![
        SortingLayer {
          name: "Back".into(),
          depth: -10.0,
        },
        SortingLayer {
          name: "Front".into(),
          depth: 10.0,
        },
      ],
      ..default()
    };
    assert_eq!(config.sorting_depth(&ChunkSorting::new("Back", 2)), -9.0);
    assert_eq!(config.sorting_depth(&ChunkSorting::new("Front", -4)), 8.0);
    assert_eq!(config.sorting_depth(&ChunkSorting::new("Nowhere", 1)), 0.5);
  }

  #[test]
  fn malformed_toml_is_a_parse_error() {
    let err = PixelChunkConfig::from_toml_str("order_spacing = \"wide\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }

  #[test]
  fn missing_file_is_io_error() {
    let err = PixelChunkConfig::load("/definitely/not/here.chunks.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
  }
}
