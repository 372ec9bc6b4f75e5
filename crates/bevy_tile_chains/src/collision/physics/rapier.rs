//! Rapier2d physics integration for chain loops.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::collision::{ChainLoop, ChainSurface};

pub(super) fn static_body() -> RigidBody {
  RigidBody::Fixed
}

/// Closed polyline collider with the chain's surface material.
pub(super) fn chain_collider(chain: &ChainLoop, surface: ChainSurface) -> impl Bundle + use<> {
  (
    Collider::polyline(chain.vertices.clone(), Some(chain.closed_indices())),
    Friction::coefficient(surface.friction),
    Restitution::coefficient(surface.restitution),
  )
}
