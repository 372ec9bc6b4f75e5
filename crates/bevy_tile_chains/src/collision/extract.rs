//! Extraction driver: edges → loops → winding → reduction.

// WASM compat: use web_time::Instant, NOT std::time::Instant
use web_time::Instant;

use super::edges::collect_boundary_edges;
use super::reduce::reduce_collinear;
use super::walker::{DEFAULT_MAX_LOOP_POINTS, walk_loops};
use super::winding::{WindingFix, correct_winding};
use crate::coords::Corner;
use crate::grid::CellClassifier;

/// Parameters for one extraction call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtractorConfig {
  /// Level pixels per grid cell.
  pub cell_size: f32,
  /// Level pixel to world unit scale.
  pub scale: f32,
  /// Safety cap on points per walked loop.
  pub max_loop_points: usize,
}

impl Default for ExtractorConfig {
  fn default() -> Self {
    Self {
      cell_size: 1.0,
      scale: 1.0,
      max_loop_points: DEFAULT_MAX_LOOP_POINTS,
    }
  }
}

impl ExtractorConfig {
  pub fn new(cell_size: f32, scale: f32) -> Self {
    Self {
      cell_size,
      scale,
      ..Default::default()
    }
  }

  /// Sets the loop walker safety cap.
  pub fn with_max_loop_points(mut self, max_loop_points: usize) -> Self {
    self.max_loop_points = max_loop_points;
    self
  }
}

/// What happened during one extraction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExtractionStats {
  /// Boundary edges collected from the grid.
  pub edges: usize,
  /// Loops produced by the walker before reduction.
  pub raw_loops: usize,
  /// Walks that could not return to their start.
  pub open_chains: usize,
  /// Walks aborted by the safety cap.
  pub capped_walks: usize,
  /// Walks or reduced loops dropped for having fewer than 3 points.
  pub discarded: usize,
  /// Loops whose order was reversed by winding correction.
  pub reversed: usize,
  /// Loops the winding check could not classify (every edge zero-length).
  pub degenerate: usize,
  /// Vertices across all emitted loops.
  pub vertices: usize,
  /// Wall time spent extracting.
  pub elapsed_ms: f32,
}

impl ExtractionStats {
  /// Returns true if any walk ended somewhere other than its start.
  pub fn has_broken_walks(&self) -> bool {
    self.open_chains > 0 || self.capped_walks > 0
  }
}

/// Reduced, correctly wound loops for one grid.
#[derive(Clone, Debug, Default)]
pub struct Extraction {
  /// Loops of grid corners, implicitly closed, solid on the right (Y-down).
  pub loops: Vec<Vec<Corner>>,
  pub stats: ExtractionStats,
}

impl Extraction {
  pub fn is_empty(&self) -> bool {
    self.loops.is_empty()
  }
}

/// Traces the solid regions of `grid` into closed chain loops.
///
/// Never fails: malformed topology shows up as open or capped walks in the
/// returned stats, and an empty grid yields no loops.
pub fn extract_boundary_loops(grid: &impl CellClassifier, config: &ExtractorConfig) -> Extraction {
  let start = Instant::now();
  let mut stats = ExtractionStats::default();

  let edges = collect_boundary_edges(grid);
  stats.edges = edges.len();

  let (raw_loops, walk) = walk_loops(edges, config.max_loop_points);
  stats.raw_loops = raw_loops.len();
  stats.open_chains = walk.open_chains;
  stats.capped_walks = walk.capped_walks;
  stats.discarded = walk.discarded;

  let mut loops = Vec::with_capacity(raw_loops.len());
  for mut points in raw_loops {
    match correct_winding(&mut points, grid, config.cell_size, config.scale) {
      WindingFix::Kept => {}
      WindingFix::Reversed => stats.reversed += 1,
      WindingFix::Degenerate => stats.degenerate += 1,
    }

    let reduced = reduce_collinear(&points);
    if reduced.len() < 3 {
      stats.discarded += 1;
      continue;
    }
    stats.vertices += reduced.len();
    loops.push(reduced);
  }

  stats.elapsed_ms = start.elapsed().as_secs_f32() * 1000.0;

  Extraction { loops, stats }
}
