//! Plugin configuration.
//!
//! ```toml
//! scale = 4.0
//! solid_categories = ["walls", "spikes"]
//! friction = 0.1
//! restitution = 0.1
//! max_loop_points = 100000
//! debug_gizmos = true
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::collision::{ChainSurface, DEFAULT_MAX_LOOP_POINTS, ExtractorConfig};

/// Configuration for chain extraction and collider creation.
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TileChainsConfig {
  /// Level pixel to world unit scale.
  pub scale: f32,
  /// Int-grid categories that collide.
  pub solid_categories: Vec<String>,
  pub friction: f32,
  pub restitution: f32,
  /// Safety cap on points per walked loop.
  pub max_loop_points: usize,
  /// Draw chains with gizmos (requires the `visual_debug` feature).
  pub debug_gizmos: bool,
}

impl Default for TileChainsConfig {
  fn default() -> Self {
    Self {
      scale: 4.0,
      solid_categories: vec!["walls".to_string()],
      friction: 0.1,
      restitution: 0.1,
      max_loop_points: DEFAULT_MAX_LOOP_POINTS,
      debug_gizmos: true,
    }
  }
}

/// Rejected configuration values.
#[derive(Debug)]
pub enum ConfigError {
  Parse(toml::de::Error),
  InvalidScale(f32),
  ZeroLoopCap,
  NegativeFriction(f32),
  NegativeRestitution(f32),
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Parse(e) => write!(f, "failed to parse config: {}", e),
      Self::InvalidScale(s) => write!(f, "scale must be positive and finite, got {}", s),
      Self::ZeroLoopCap => write!(f, "max_loop_points must be at least 1"),
      Self::NegativeFriction(v) => write!(f, "friction must not be negative, got {}", v),
      Self::NegativeRestitution(v) => write!(f, "restitution must not be negative, got {}", v),
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Parse(e) => Some(e),
      _ => None,
    }
  }
}

impl From<toml::de::Error> for ConfigError {
  fn from(e: toml::de::Error) -> Self {
    Self::Parse(e)
  }
}

impl TileChainsConfig {
  /// Parses and validates a config. Missing keys take their defaults.
  pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
    let config: TileChainsConfig = toml::from_str(source)?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if !self.scale.is_finite() || self.scale <= 0.0 {
      return Err(ConfigError::InvalidScale(self.scale));
    }
    if self.max_loop_points == 0 {
      return Err(ConfigError::ZeroLoopCap);
    }
    if self.friction.is_nan() || self.friction < 0.0 {
      return Err(ConfigError::NegativeFriction(self.friction));
    }
    if self.restitution.is_nan() || self.restitution < 0.0 {
      return Err(ConfigError::NegativeRestitution(self.restitution));
    }
    Ok(())
  }

  /// Sets the level pixel to world unit scale.
  pub fn with_scale(mut self, scale: f32) -> Self {
    self.scale = scale;
    self
  }

  /// Replaces the colliding categories.
  pub fn with_solid_categories<I, S>(mut self, categories: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.solid_categories = categories.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_friction(mut self, friction: f32) -> Self {
    self.friction = friction;
    self
  }

  pub fn with_restitution(mut self, restitution: f32) -> Self {
    self.restitution = restitution;
    self
  }

  /// Sets the loop walker safety cap.
  pub fn with_max_loop_points(mut self, max_loop_points: usize) -> Self {
    self.max_loop_points = max_loop_points;
    self
  }

  pub fn with_debug_gizmos(mut self, enabled: bool) -> Self {
    self.debug_gizmos = enabled;
    self
  }

  pub fn surface(&self) -> ChainSurface {
    ChainSurface {
      friction: self.friction,
      restitution: self.restitution,
    }
  }

  /// Extractor parameters for a layer with the given cell size.
  pub fn extractor_config(&self, cell_size: f32) -> ExtractorConfig {
    ExtractorConfig::new(cell_size, self.scale).with_max_loop_points(self.max_loop_points)
  }
}
