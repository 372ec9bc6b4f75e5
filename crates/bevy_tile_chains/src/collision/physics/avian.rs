//! Avian2d physics integration for chain loops.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::collision::{ChainLoop, ChainSurface};

pub(super) fn static_body() -> RigidBody {
  RigidBody::Static
}

/// Closed polyline collider with the chain's surface material.
pub(super) fn chain_collider(chain: &ChainLoop, surface: ChainSurface) -> impl Bundle + use<> {
  (
    Collider::polyline(chain.vertices.clone(), Some(chain.closed_indices())),
    Friction::new(surface.friction),
    Restitution::new(surface.restitution),
  )
}
