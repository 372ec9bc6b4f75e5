//! Tile Chains - closed chain colliders from tile level layers, for Bevy.
//!
//! Solid cells of each int-grid layer are traced into closed loops of grid
//! corners, wound so that solid material lies on the right of travel, with
//! every collinear corner removed. The loops are handed to a physics backend
//! (`avian2d` or `rapier2d` feature) as one static body per layer.
//!
//! # Example
//! ```ignore
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(TileChainsPlugin::new(
//!         TileChainsConfig::default().with_solid_categories(["walls", "spikes"]),
//!     ))
//!     .add_systems(Startup, |mut commands: Commands| {
//!         commands.queue(SpawnLevel::from_path("levels/playground.level.toml"));
//!     })
//!     .run();
//! ```

use bevy::prelude::*;
use bevy_common_assets::toml::TomlAssetPlugin;

pub mod collision;
pub mod config;
pub mod coords;
pub mod grid;
pub mod level;

#[cfg(physics)]
pub use collision::physics::{ChainCollider, ColliderSpawner};
pub use collision::{
  ChainLoop, ChainSink, ChainSurface, Extraction, ExtractionStats, ExtractorConfig, LayerChains,
  LevelHandle, LevelLayer, SpawnLevel, extract_boundary_loops,
};
pub use config::{ConfigError, TileChainsConfig};
pub use coords::{Corner, LevelGeometry};
pub use grid::{CellClassifier, SolidGrid};
pub use level::{
  CategoryClassifier, IntGridLayer, IntGridValue, LayerDescription, LevelDescription, LevelError,
  TileLayer,
};

/// Ordering of the plugin's systems within `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TileChainsSet {
  /// Layer entities are spawned from loaded levels.
  Spawn,
  /// Chains are extracted from new or changed layers.
  Extract,
  /// Physics colliders and debug drawing consume the chains.
  Consume,
}

/// Plugin that extracts chain loops for every [`TileLayer`].
///
/// Level assets (`*.level.toml`) are only registered when the `AssetPlugin`
/// has been added before this plugin. A modified level asset respawns its
/// layers.
#[derive(Default)]
pub struct TileChainsPlugin {
  pub config: TileChainsConfig,
}

impl TileChainsPlugin {
  pub fn new(config: TileChainsConfig) -> Self {
    Self { config }
  }
}

impl Plugin for TileChainsPlugin {
  fn build(&self, app: &mut App) {
    if let Err(e) = self.config.validate() {
      error!("Invalid TileChainsConfig: {}. Using defaults.", e);
      app.insert_resource(TileChainsConfig::default());
    } else {
      app.insert_resource(self.config.clone());
    }

    let assets = app.is_plugin_added::<AssetPlugin>();
    if assets {
      app.add_plugins(TomlAssetPlugin::<LevelDescription>::new(&["level.toml"]));
    }

    app.configure_sets(
      Update,
      (
        TileChainsSet::Spawn,
        TileChainsSet::Extract,
        TileChainsSet::Consume,
      )
        .chain(),
    );

    app.add_systems(
      Update,
      (
        collision::spawn_level_layers.in_set(TileChainsSet::Spawn),
        collision::build_layer_chains.in_set(TileChainsSet::Extract),
      ),
    );

    // Level asset messages only exist once the asset type is registered.
    if assets {
      app.add_systems(
        Update,
        collision::reload_modified_level
          .before(collision::spawn_level_layers)
          .in_set(TileChainsSet::Spawn),
      );
    }

    #[cfg(physics)]
    app.add_systems(
      Update,
      collision::physics::sync_chain_colliders.in_set(TileChainsSet::Consume),
    );

    #[cfg(feature = "visual_debug")]
    if app.is_plugin_added::<bevy::gizmos::GizmoPlugin>() {
      app.add_systems(
        Update,
        collision::draw_chain_gizmos.in_set(TileChainsSet::Consume),
      );
    }
  }
}
