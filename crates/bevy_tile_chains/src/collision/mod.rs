//! Chain collision extraction for tile layers.
//!
//! # Pipeline
//!
//! 1. [`collect_boundary_edges`] records every cell side between a solid cell
//!    and a non-solid cell (or the grid border)
//! 2. [`walk_loops`] drains the edge set into closed loops of grid corners
//! 3. [`correct_winding`] samples one edge per loop and reverses the loop
//!    unless solid material lies on the right of travel
//! 4. [`reduce_collinear`] keeps only the corners where direction changes
//!
//! [`extract_boundary_loops`] runs all four steps for one grid. The
//! [`build_layer_chains`] system does it for every [`TileLayer`] entity and
//! stores the world-space result as [`LayerChains`].
//!
//! # Usage
//!
//! ```ignore
//! let grid = SolidGrid::from_rows(&["###", "#.#", "###"]);
//! let extraction = extract_boundary_loops(&grid, &ExtractorConfig::default());
//! assert_eq!(extraction.loops.len(), 2);
//! ```
//!
//! [`TileLayer`]: crate::level::TileLayer

mod chains;
#[cfg(feature = "visual_debug")]
mod debug;
mod edges;
mod extract;
mod reduce;
mod systems;
mod walker;
mod winding;

#[cfg(physics)]
pub mod physics;

pub use chains::{ChainLoop, ChainSink, ChainSurface, LayerChains};
#[cfg(feature = "visual_debug")]
pub use debug::{GizmoChainSink, draw_chain_gizmos};
pub use edges::{BoundaryEdge, EdgeSet, collect_boundary_edges};
pub use extract::{Extraction, ExtractionStats, ExtractorConfig, extract_boundary_loops};
pub use reduce::reduce_collinear;
pub use systems::{
  LevelHandle, LevelLayer, SpawnLevel, build_layer_chains, chains_for_layer, reload_modified_level,
  spawn_level_layers,
};
pub use walker::{AdjacencyMap, DEFAULT_MAX_LOOP_POINTS, WalkStats, walk_loops};
pub use winding::{WindingFix, correct_winding, solid_on_right};
