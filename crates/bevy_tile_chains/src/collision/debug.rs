//! Gizmo drawing of chain loops.

use bevy::prelude::*;

use super::chains::{ChainLoop, ChainSink, ChainSurface, LayerChains};
use crate::config::TileChainsConfig;
use crate::level::TileLayer;

/// Mint #B8E0D2
const CHAIN_COLOR: Color = Color::srgb(0.722, 0.878, 0.824);

/// Coral #FF6F61
const SOLID_SIDE_COLOR: Color = Color::srgb(1.0, 0.435, 0.380);

/// Gold #FFD700
const START_COLOR: Color = Color::srgb(1.0, 0.843, 0.0);

/// Draws each chain as a closed line strip.
///
/// The first edge also gets a short tick pointing at the solid side, which
/// makes a wrongly wound loop obvious at a glance.
pub struct GizmoChainSink<'a, 'w, 's> {
  pub gizmos: &'a mut Gizmos<'w, 's>,
  /// Length of the solid-side tick in world units.
  pub tick: f32,
}

impl ChainSink for GizmoChainSink<'_, '_, '_> {
  fn add_chain(&mut self, _layer: &str, chain: &ChainLoop, _surface: ChainSurface) {
    let Some(&first) = chain.vertices.first() else {
      return;
    };

    self.gizmos.linestrip_2d(
      chain.vertices.iter().copied().chain(std::iter::once(first)),
      CHAIN_COLOR,
    );
    self.gizmos.circle_2d(first, self.tick * 0.25, START_COLOR);

    let Some((a, b)) = chain.edges().find(|(a, b)| a != b) else {
      return;
    };
    let dir = (b - a).normalize_or_zero();
    // Right-hand normal, Y-up.
    let right = Vec2::new(dir.y, -dir.x);
    let mid = (a + b) * 0.5;
    self.gizmos.line_2d(mid, mid + right * self.tick, SOLID_SIDE_COLOR);
  }
}

/// System: Draws every layer's chains.
pub fn draw_chain_gizmos(
  config: Res<TileChainsConfig>,
  layers: Query<(&TileLayer, &LayerChains)>,
  mut gizmos: Gizmos,
) {
  if !config.debug_gizmos {
    return;
  }

  for (layer, chains) in &layers {
    let tick = layer.grid.geometry(config.scale).cell_span() * 0.5;
    let mut sink = GizmoChainSink {
      gizmos: &mut gizmos,
      tick,
    };
    chains.emit(&layer.grid.name, &mut sink);
  }
}
