//! Loads a level and draws its chain loops.
//!
//! Run: cargo run -p bevy_tile_chains --example playground --features visual_debug

use bevy::prelude::*;
use bevy_tile_chains::{SpawnLevel, TileChainsConfig, TileChainsPlugin};

fn main() {
  App::new()
    .add_plugins(DefaultPlugins)
    .add_plugins(TileChainsPlugin::new(
      TileChainsConfig::default().with_solid_categories(["walls", "spikes"]),
    ))
    .add_systems(Startup, setup)
    .run();
}

fn setup(mut commands: Commands) {
  // 24x10 cells of 16px at scale 4.
  commands.spawn((
    Camera2d,
    Transform::from_xyz(768.0, -320.0, 0.0).with_scale(Vec3::splat(1.6)),
  ));
  commands.queue(SpawnLevel::from_path("levels/playground.level.toml"));
}
