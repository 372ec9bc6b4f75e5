//! Bevy systems that turn tile layers into chain loops.

use bevy::{asset::AssetEvent, ecs::message::MessageReader, prelude::*};

use super::chains::{ChainLoop, LayerChains};
use super::extract::extract_boundary_loops;
use crate::config::TileChainsConfig;
use crate::level::{IntGridLayer, LevelDescription, TileLayer};

/// Builds the world-space chains of one layer.
///
/// Layers are independent: nothing computed here is reused for the next one.
/// A layer whose cell size is not positive and finite has no world extent and
/// yields no chains.
pub fn chains_for_layer(grid: &IntGridLayer, config: &TileChainsConfig) -> LayerChains {
  let surface = config.surface();
  if !(grid.cell_size.is_finite() && grid.cell_size > 0.0) {
    warn!(
      "Layer '{}': invalid cell size {}; skipping chain extraction",
      grid.name, grid.cell_size
    );
    return LayerChains {
      surface,
      ..Default::default()
    };
  }

  let classifier = grid.classify(&config.solid_categories);
  if classifier.is_inert() {
    return LayerChains {
      surface,
      ..Default::default()
    };
  }

  let extraction = extract_boundary_loops(&classifier, &config.extractor_config(grid.cell_size));
  let geometry = grid.geometry(config.scale);
  let chains = extraction
    .loops
    .iter()
    .map(|points| ChainLoop::from_corners(points, &geometry))
    .collect();

  LayerChains {
    chains,
    surface,
    stats: extraction.stats,
  }
}

/// Extracts chains for new or modified [`TileLayer`]s.
///
/// A config change rebuilds every layer.
pub fn build_layer_chains(
  mut commands: Commands,
  config: Res<TileChainsConfig>,
  layers: Query<(Entity, Ref<TileLayer>)>,
) {
  let rebuild_all = config.is_changed();

  for (entity, layer) in &layers {
    if !rebuild_all && !layer.is_changed() {
      continue;
    }

    let grid = &layer.grid;
    let chains = chains_for_layer(grid, &config);
    let stats = chains.stats;

    if stats.open_chains > 0 {
      warn!(
        "Layer '{}': {} boundary walk(s) did not close; chains may leak",
        grid.name, stats.open_chains
      );
    }
    if stats.capped_walks > 0 {
      warn!(
        "Layer '{}': {} walk(s) hit the {}-point safety cap",
        grid.name, stats.capped_walks, config.max_loop_points
      );
    }
    if stats.degenerate > 0 {
      warn!(
        "Layer '{}': {} loop(s) kept their traced winding (no edge with length)",
        grid.name, stats.degenerate
      );
    }
    debug!(
      "Layer '{}': {} edges -> {} chains, {} vertices ({} reversed, {} discarded) in {:.2}ms",
      grid.name,
      stats.edges,
      chains.chains.len(),
      stats.vertices,
      stats.reversed,
      stats.discarded,
      stats.elapsed_ms
    );

    commands.entity(entity).insert(chains);
  }
}

/// The level whose layers are spawned once its asset has loaded.
#[derive(Resource, Clone, Debug)]
pub struct LevelHandle {
  pub handle: Handle<LevelDescription>,
  /// Set once the layer entities exist.
  pub spawned: bool,
}

/// Marks layer entities spawned from a level asset.
///
/// They are despawned and respawned when that asset is modified.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelLayer {
  pub level: AssetId<LevelDescription>,
}

/// Command to spawn one [`TileLayer`] entity per level layer.
///
/// # Example
/// ```ignore
/// fn setup(mut commands: Commands) {
///     commands.queue(SpawnLevel::from_path("levels/playground.level.toml"));
/// }
/// ```
pub enum SpawnLevel {
  /// Load through the asset server; layers spawn when loading finishes.
  Path(String),
  /// Spawn right away from an already parsed level.
  Description(LevelDescription),
}

impl SpawnLevel {
  pub fn from_path(path: impl Into<String>) -> Self {
    Self::Path(path.into())
  }

  pub fn from_description(level: LevelDescription) -> Self {
    Self::Description(level)
  }
}

impl bevy::ecs::system::Command for SpawnLevel {
  fn apply(self, world: &mut World) {
    match self {
      Self::Path(path) => {
        let Some(server) = world.get_resource::<AssetServer>() else {
          warn!("Cannot load level {}: no AssetServer", path);
          return;
        };
        let handle = server.load(path);
        world.insert_resource(LevelHandle {
          handle,
          spawned: false,
        });
      }
      Self::Description(level) => spawn_layers(world, &level, None),
    }
  }
}

/// Spawns layer entities for the pending [`LevelHandle`] once loaded.
pub fn spawn_level_layers(
  mut commands: Commands,
  level: Option<ResMut<LevelHandle>>,
  levels: Option<Res<Assets<LevelDescription>>>,
) {
  let (Some(mut level), Some(levels)) = (level, levels) else {
    return;
  };
  if level.spawned {
    return;
  }
  let Some(description) = levels.get(&level.handle) else {
    return;
  };

  level.spawned = true;
  let description = description.clone();
  let id = level.handle.id();
  commands.queue(move |world: &mut World| spawn_layers(world, &description, Some(id)));
}

/// Drops the layers of a modified level asset so they spawn again.
pub fn reload_modified_level(
  mut commands: Commands,
  level: Option<ResMut<LevelHandle>>,
  mut messages: MessageReader<AssetEvent<LevelDescription>>,
  layers: Query<(Entity, &LevelLayer)>,
) {
  let Some(mut level) = level else {
    return;
  };

  let id = level.handle.id();
  let mut modified = false;
  for event in messages.read() {
    if let AssetEvent::Modified { id: changed } = event {
      modified |= *changed == id;
    }
  }
  if !modified {
    return;
  }

  info!("Level asset modified, respawning layers");
  for (entity, layer) in &layers {
    if layer.level == id {
      commands.entity(entity).despawn();
    }
  }
  level.spawned = false;
}

fn spawn_layers(
  world: &mut World,
  level: &LevelDescription,
  source: Option<AssetId<LevelDescription>>,
) {
  let grids = match level.validate().and_then(|()| level.int_grids()) {
    Ok(grids) => grids,
    Err(e) => {
      warn!("Failed to spawn level '{}': {}", level.name, e);
      return;
    }
  };

  info!("Spawning level '{}' ({} layers)", level.name, grids.len());
  for grid in grids {
    let mut entity = world.spawn((
      Name::new(grid.name.clone()),
      TileLayer::new(grid),
      Transform::default(),
    ));
    if let Some(level) = source {
      entity.insert(LevelLayer { level });
    }
  }
}
