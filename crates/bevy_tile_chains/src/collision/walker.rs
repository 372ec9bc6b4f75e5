//! Loop walking.
//!
//! Drains an [`EdgeSet`] into closed loops of corners by repeatedly picking a
//! remaining edge and following connected boundary edges until the walk
//! returns to its start.

use std::collections::HashMap;

use super::edges::{BoundaryEdge, EdgeSet};
use crate::coords::Corner;

/// Default safety cap on the number of points in one walked loop.
pub const DEFAULT_MAX_LOOP_POINTS: usize = 100_000;

/// Corner → corners connected to it by a boundary edge.
///
/// Built once from the full edge set and never updated, so it still lists
/// edges the walker has already consumed. Liveness must always be checked
/// against the [`EdgeSet`].
#[derive(Debug, Default)]
pub struct AdjacencyMap {
  neighbors: HashMap<Corner, Vec<Corner>>,
}

impl AdjacencyMap {
  pub fn build(edges: &EdgeSet) -> Self {
    let mut neighbors: HashMap<Corner, Vec<Corner>> = HashMap::with_capacity(edges.len());
    for edge in edges {
      neighbors.entry(edge.a()).or_default().push(edge.b());
      neighbors.entry(edge.b()).or_default().push(edge.a());
    }
    Self { neighbors }
  }

  /// Returns the corners adjacent to `corner`, in insertion order.
  pub fn neighbors(&self, corner: Corner) -> &[Corner] {
    self
      .neighbors
      .get(&corner)
      .map(Vec::as_slice)
      .unwrap_or(&[])
  }

  /// Number of boundary edges touching `corner` in the original edge set.
  pub fn degree(&self, corner: Corner) -> usize {
    self.neighbors(corner).len()
  }
}

/// Counters describing how a set of walks terminated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkStats {
  /// Loops kept (3 or more points).
  pub loops: usize,
  /// Walks that ran out of live edges before returning to their start.
  pub open_chains: usize,
  /// Walks aborted by the safety cap.
  pub capped_walks: usize,
  /// Walks dropped for having fewer than 3 points.
  pub discarded: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WalkEnd {
  Closed,
  Open,
  Capped,
}

/// Picks the next corner after walking `prev → cur`.
///
/// Only edges still present in `edges` are candidates. A candidate that turns
/// is preferred over one that continues straight: where four boundary edges
/// meet (two solid cells touching only diagonally), going straight would put
/// the solid side of the walk on the other hand.
fn next_corner(
  adjacency: &AdjacencyMap,
  edges: &EdgeSet,
  prev: Corner,
  cur: Corner,
) -> Option<Corner> {
  let incoming = prev.step_to(cur);
  let mut straight = None;

  for &candidate in adjacency.neighbors(cur) {
    if candidate == prev || !edges.contains(cur, candidate) {
      continue;
    }
    if cur.step_to(candidate) == incoming {
      straight.get_or_insert(candidate);
      continue;
    }
    return Some(candidate);
  }

  straight
}

/// Walks one loop starting with `start_edge`, consuming edges as it goes.
fn walk_from(
  edges: &mut EdgeSet,
  adjacency: &AdjacencyMap,
  start_edge: BoundaryEdge,
  max_points: usize,
) -> (Vec<Corner>, WalkEnd) {
  let start = start_edge.a();
  let mut prev = start;
  let mut cur = start_edge.b();
  let mut points = vec![start, cur];
  edges.remove(start, cur);

  let end = loop {
    if cur == start {
      break WalkEnd::Closed;
    }
    if points.len() >= max_points {
      break WalkEnd::Capped;
    }
    let Some(next) = next_corner(adjacency, edges, prev, cur) else {
      break WalkEnd::Open;
    };
    edges.remove(cur, next);
    prev = cur;
    cur = next;
    points.push(cur);
  };

  // Loops are stored open; the closing edge back to the start is implicit.
  if points.len() > 1 && points.first() == points.last() {
    points.pop();
  }

  (points, end)
}

/// Drains `edges` into loops.
///
/// Each walk starts from the smallest remaining edge. Walks that cannot close
/// keep the points they collected; walks with fewer than 3 points are
/// dropped. `max_points` bounds a single walk so malformed topology can never
/// loop forever.
pub fn walk_loops(mut edges: EdgeSet, max_points: usize) -> (Vec<Vec<Corner>>, WalkStats) {
  let adjacency = AdjacencyMap::build(&edges);
  let mut loops = Vec::new();
  let mut stats = WalkStats::default();

  while let Some(start_edge) = edges.first() {
    let (points, end) = walk_from(&mut edges, &adjacency, start_edge, max_points);

    match end {
      WalkEnd::Closed => {}
      WalkEnd::Open => {
        if let Some(stall) = points.last() {
          log::debug!(
            "open chain stalled at ({}, {}) after {} points",
            stall.x,
            stall.y,
            points.len()
          );
        }
        stats.open_chains += 1;
      }
      WalkEnd::Capped => stats.capped_walks += 1,
    }

    if points.len() >= 3 {
      stats.loops += 1;
      loops.push(points);
    } else {
      stats.discarded += 1;
    }
  }

  (loops, stats)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::collision::edges::collect_boundary_edges;
  use crate::grid::SolidGrid;

  fn walk(rows: &[&str]) -> (Vec<Vec<Corner>>, WalkStats) {
    let grid = SolidGrid::from_rows(rows);
    walk_loops(collect_boundary_edges(&grid), DEFAULT_MAX_LOOP_POINTS)
  }

  #[test]
  fn single_cell_walks_four_corners() {
    let (loops, stats) = walk(&["#"]);
    assert_eq!(loops.len(), 1);
    assert_eq!(loops[0].len(), 4);
    assert_eq!(stats.open_chains, 0);
    assert_eq!(stats.capped_walks, 0);
  }

  #[test]
  fn loop_is_stored_without_closing_duplicate() {
    let (loops, _) = walk(&["##", "##"]);
    let first = loops[0].first().unwrap();
    let last = loops[0].last().unwrap();
    assert_ne!(first, last);
    assert!(first.is_unit_neighbor(*last));
  }

  #[test]
  fn walk_starts_from_smallest_edge() {
    let (loops, _) = walk(&["..", ".#"]);
    assert_eq!(loops[0][0], Corner::new(1, 1));
  }

  #[test]
  fn adjacency_keeps_consumed_edges() {
    let grid = SolidGrid::from_rows(&["#"]);
    let edges = collect_boundary_edges(&grid);
    let adjacency = AdjacencyMap::build(&edges);
    let (_, _) = walk_loops(edges, DEFAULT_MAX_LOOP_POINTS);
    assert_eq!(adjacency.degree(Corner::new(0, 0)), 2);
  }

  #[test]
  fn diagonal_pinch_keeps_turning() {
    // Cells (0,0) and (1,1) share only the corner (1,1).
    let (loops, stats) = walk(&["#.", ".#"]);
    let total: usize = loops.iter().map(Vec::len).sum();
    assert_eq!(total, 8);
    assert_eq!(stats.open_chains, 0);

    // No walk passes straight through the pinch corner.
    for points in &loops {
      let n = points.len();
      for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let cur = points[i];
        let next = points[(i + 1) % n];
        if cur == Corner::new(1, 1) {
          assert_ne!(prev.step_to(cur), cur.step_to(next));
        }
      }
    }
  }

  #[test]
  fn safety_cap_aborts_walk() {
    let (loops, stats) = {
      let grid = SolidGrid::from_rows(&["###", "###", "###"]);
      walk_loops(collect_boundary_edges(&grid), 5)
    };
    assert!(stats.capped_walks >= 1);
    assert!(loops.iter().all(|l| l.len() <= 5));
  }

  #[test]
  fn open_chain_is_reported() {
    let mut edges = EdgeSet::new();
    edges.insert(Corner::new(0, 0), Corner::new(1, 0));
    edges.insert(Corner::new(1, 0), Corner::new(2, 0));
    edges.insert(Corner::new(2, 0), Corner::new(2, 1));
    let (loops, stats) = walk_loops(edges, DEFAULT_MAX_LOOP_POINTS);
    assert_eq!(stats.open_chains, 1);
    assert_eq!(loops.len(), 1);
    assert_eq!(loops[0].len(), 4);
  }

  #[test]
  fn short_open_chain_is_discarded() {
    let mut edges = EdgeSet::new();
    edges.insert(Corner::new(0, 0), Corner::new(1, 0));
    let (loops, stats) = walk_loops(edges, DEFAULT_MAX_LOOP_POINTS);
    assert!(loops.is_empty());
    assert_eq!(stats.discarded, 1);
    assert_eq!(stats.open_chains, 1);
  }

  #[test]
  fn empty_set_yields_nothing() {
    let (loops, stats) = walk_loops(EdgeSet::new(), DEFAULT_MAX_LOOP_POINTS);
    assert!(loops.is_empty());
    assert_eq!(stats, WalkStats::default());
  }
}
