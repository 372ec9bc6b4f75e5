//! Physics library integration for chain loops.
//!
//! Provides optional feature-gated support for avian2d and rapier2d physics
//! engines. Enable one (but not both) via Cargo features:
//!
//! ```toml
//! bevy_tile_chains = { version = "...", features = ["avian2d"] }
//! # or
//! bevy_tile_chains = { version = "...", features = ["rapier2d"] }
//! ```
//!
//! Every layer entity becomes one static body; each of its chains is a child
//! collider shaped as a closed polyline.

#[cfg(all(feature = "avian2d", feature = "rapier2d"))]
compile_error!("Cannot enable both avian2d and rapier2d features simultaneously");

#[cfg(feature = "avian2d")]
mod avian;
#[cfg(feature = "avian2d")]
use avian as backend;

#[cfg(feature = "rapier2d")]
mod rapier;
#[cfg(feature = "rapier2d")]
use rapier as backend;

use bevy::prelude::*;

use super::chains::{ChainLoop, ChainSink, ChainSurface, LayerChains};
use crate::level::TileLayer;

/// Marker component for chain collider entities.
#[derive(Component, Clone, Debug)]
pub struct ChainCollider {
  /// Layer entity (and static body) this chain belongs to.
  pub layer: Entity,
  /// Index of the chain within its layer.
  pub index: usize,
}

/// Spawns one child collider per chain under a static body.
pub struct ColliderSpawner<'a, 'w, 's> {
  pub commands: &'a mut Commands<'w, 's>,
  pub body: Entity,
  spawned: usize,
}

impl<'a, 'w, 's> ColliderSpawner<'a, 'w, 's> {
  pub fn new(commands: &'a mut Commands<'w, 's>, body: Entity) -> Self {
    Self {
      commands,
      body,
      spawned: 0,
    }
  }

  /// Colliders spawned so far.
  pub fn spawned(&self) -> usize {
    self.spawned
  }
}

impl ChainSink for ColliderSpawner<'_, '_, '_> {
  fn add_chain(&mut self, layer: &str, chain: &ChainLoop, surface: ChainSurface) {
    if chain.len() < 3 {
      return;
    }
    self.commands.spawn((
      Name::new(format!("{} chain {}", layer, self.spawned)),
      ChainCollider {
        layer: self.body,
        index: self.spawned,
      },
      backend::chain_collider(chain, surface),
      Transform::default(),
      ChildOf(self.body),
    ));
    self.spawned += 1;
  }
}

/// System: (Re)builds colliders for layers whose chains changed.
pub fn sync_chain_colliders(
  mut commands: Commands,
  layers: Query<(Entity, &TileLayer, &LayerChains), Changed<LayerChains>>,
  existing: Query<(Entity, &ChainCollider)>,
) {
  for (entity, layer, chains) in &layers {
    for (collider, chain) in &existing {
      if chain.layer == entity {
        commands.entity(collider).despawn();
      }
    }

    commands.entity(entity).insert(backend::static_body());

    let mut spawner = ColliderSpawner::new(&mut commands, entity);
    chains.emit(&layer.grid.name, &mut spawner);
    debug!(
      "Layer '{}': {} chain colliders",
      layer.grid.name,
      spawner.spawned()
    );
  }
}
