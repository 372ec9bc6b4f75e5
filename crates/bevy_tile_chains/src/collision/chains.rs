//! World-space chain loops and their consumers.

use bevy::math::Vec2;
use bevy::prelude::*;

use super::extract::ExtractionStats;
use crate::coords::{Corner, LevelGeometry};

/// Surface material applied to every edge of a chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChainSurface {
  pub friction: f32,
  pub restitution: f32,
}

impl Default for ChainSurface {
  fn default() -> Self {
    Self {
      friction: 0.1,
      restitution: 0.1,
    }
  }
}

/// One closed chain in world space (Y-up).
///
/// Vertices are implicitly closed and ordered so that solid material is on
/// the right of travel in world space.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainLoop {
  pub vertices: Vec<Vec2>,
}

impl ChainLoop {
  /// Converts a grid loop (solid on the right in Y-down grid space).
  ///
  /// The Y flip turns the grid's right-hand normal `(-dy, dx)` into the world
  /// right-hand normal `(dy, -dx)`, so point order carries over unchanged.
  pub fn from_corners(points: &[Corner], geometry: &LevelGeometry) -> Self {
    let vertices = points
      .iter()
      .map(|&p| geometry.corner_to_world(p))
      .collect();
    Self { vertices }
  }

  pub fn len(&self) -> usize {
    self.vertices.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  /// Iterates edges `(start, end)`, including the closing edge.
  pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    let n = self.vertices.len();
    (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
  }

  /// Index pairs for a closed polyline collider.
  pub fn closed_indices(&self) -> Vec<[u32; 2]> {
    let n = self.vertices.len() as u32;
    (0..n).map(|i| [i, (i + 1) % n]).collect()
  }
}

/// Receives the chains of a layer once they are built.
///
/// Physics backends and debug drawing are both chain sinks; the extractor
/// itself never knows who consumes its output.
pub trait ChainSink {
  fn add_chain(&mut self, layer: &str, chain: &ChainLoop, surface: ChainSurface);
}

impl ChainSink for Vec<ChainLoop> {
  fn add_chain(&mut self, _layer: &str, chain: &ChainLoop, _surface: ChainSurface) {
    self.push(chain.clone());
  }
}

/// Chains built for a [`TileLayer`](crate::level::TileLayer) entity.
#[derive(Component, Clone, Debug, Default)]
pub struct LayerChains {
  pub chains: Vec<ChainLoop>,
  pub surface: ChainSurface,
  pub stats: ExtractionStats,
}

impl LayerChains {
  /// Feeds every chain to `sink`.
  pub fn emit(&self, layer: &str, sink: &mut impl ChainSink) {
    for chain in &self.chains {
      sink.add_chain(layer, chain, self.surface);
    }
  }

  /// Total vertices across all chains.
  pub fn vertex_count(&self) -> usize {
    self.chains.iter().map(ChainLoop::len).sum()
  }
}
