//! Boundary edge collection.
//!
//! Every side of a solid cell that faces a non-solid neighbour (or the outside
//! of the grid) becomes one undirected unit edge between two corners.

use std::collections::BTreeSet;
use std::collections::btree_set;

use crate::coords::Corner;
use crate::grid::CellClassifier;

/// An undirected unit edge between two grid corners.
///
/// Endpoints are stored ordered (`a <= b`) so that `(p, q)` and `(q, p)` are
/// the same edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundaryEdge {
  a: Corner,
  b: Corner,
}

impl BoundaryEdge {
  pub fn new(p: Corner, q: Corner) -> Self {
    if q < p { Self { a: q, b: p } } else { Self { a: p, b: q } }
  }

  /// The lower endpoint.
  pub fn a(&self) -> Corner {
    self.a
  }

  /// The upper endpoint.
  pub fn b(&self) -> Corner {
    self.b
  }

  /// Returns the endpoint opposite to `corner`, if `corner` is an endpoint.
  pub fn other(&self, corner: Corner) -> Option<Corner> {
    if corner == self.a {
      Some(self.b)
    } else if corner == self.b {
      Some(self.a)
    } else {
      None
    }
  }
}

/// The working set of not-yet-consumed boundary edges.
///
/// Backed by an ordered set so iteration, and therefore loop emission order,
/// is the same on every run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeSet {
  edges: BTreeSet<BoundaryEdge>,
}

impl EdgeSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Inserts an edge; returns false if it was already present.
  pub fn insert(&mut self, p: Corner, q: Corner) -> bool {
    self.edges.insert(BoundaryEdge::new(p, q))
  }

  /// Removes an edge; returns false if it was not present.
  pub fn remove(&mut self, p: Corner, q: Corner) -> bool {
    self.edges.remove(&BoundaryEdge::new(p, q))
  }

  pub fn contains(&self, p: Corner, q: Corner) -> bool {
    self.edges.contains(&BoundaryEdge::new(p, q))
  }

  /// Returns the first remaining edge in canonical order.
  pub fn first(&self) -> Option<BoundaryEdge> {
    self.edges.first().copied()
  }

  pub fn len(&self) -> usize {
    self.edges.len()
  }

  pub fn is_empty(&self) -> bool {
    self.edges.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &BoundaryEdge> {
    self.edges.iter()
  }
}

impl<'a> IntoIterator for &'a EdgeSet {
  type Item = &'a BoundaryEdge;
  type IntoIter = btree_set::Iter<'a, BoundaryEdge>;

  fn into_iter(self) -> Self::IntoIter {
    self.edges.iter()
  }
}

/// Collects every boundary edge of the solid cells in `grid`.
///
/// Out-of-bounds neighbours count as non-solid, so regions touching the grid
/// border still get closed boundaries. An empty grid yields an empty set.
pub fn collect_boundary_edges(grid: &impl CellClassifier) -> EdgeSet {
  let mut edges = EdgeSet::new();

  for y in 0..grid.height() {
    for x in 0..grid.width() {
      if !grid.is_solid(x, y) {
        continue;
      }

      // top
      if !grid.is_solid(x, y - 1) {
        edges.insert(Corner::new(x, y), Corner::new(x + 1, y));
      }
      // bottom
      if !grid.is_solid(x, y + 1) {
        edges.insert(Corner::new(x, y + 1), Corner::new(x + 1, y + 1));
      }
      // left
      if !grid.is_solid(x - 1, y) {
        edges.insert(Corner::new(x, y), Corner::new(x, y + 1));
      }
      // right
      if !grid.is_solid(x + 1, y) {
        edges.insert(Corner::new(x + 1, y), Corner::new(x + 1, y + 1));
      }
    }
  }

  edges
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grid::SolidGrid;

  #[test]
  fn edge_is_canonical() {
    let p = Corner::new(2, 1);
    let q = Corner::new(1, 1);
    assert_eq!(BoundaryEdge::new(p, q), BoundaryEdge::new(q, p));
    assert_eq!(BoundaryEdge::new(p, q).a(), q);
  }

  #[test]
  fn duplicate_insert_collapses() {
    let mut set = EdgeSet::new();
    assert!(set.insert(Corner::new(0, 0), Corner::new(1, 0)));
    assert!(!set.insert(Corner::new(1, 0), Corner::new(0, 0)));
    assert_eq!(set.len(), 1);
  }

  #[test]
  fn single_cell_has_four_edges() {
    let grid = SolidGrid::from_rows(&["...", ".#.", "..."]);
    let edges = collect_boundary_edges(&grid);
    assert_eq!(edges.len(), 4);
    assert!(edges.contains(Corner::new(1, 1), Corner::new(2, 1)));
    assert!(edges.contains(Corner::new(1, 2), Corner::new(2, 2)));
    assert!(edges.contains(Corner::new(1, 1), Corner::new(1, 2)));
    assert!(edges.contains(Corner::new(2, 1), Corner::new(2, 2)));
  }

  #[test]
  fn shared_sides_are_not_boundaries() {
    let grid = SolidGrid::from_rows(&["##"]);
    let edges = collect_boundary_edges(&grid);
    // 2 top + 2 bottom + left + right; the shared middle side is interior.
    assert_eq!(edges.len(), 6);
    assert!(!edges.contains(Corner::new(1, 0), Corner::new(1, 1)));
  }

  #[test]
  fn border_cells_emit_outer_edges() {
    let grid = SolidGrid::from_rows(&["#"]);
    assert_eq!(collect_boundary_edges(&grid).len(), 4);
  }

  #[test]
  fn empty_grid_has_no_edges() {
    assert!(collect_boundary_edges(&SolidGrid::new(0, 0)).is_empty());
    assert!(collect_boundary_edges(&SolidGrid::new(8, 8)).is_empty());
  }

  #[test]
  fn first_is_smallest_edge() {
    let mut set = EdgeSet::new();
    set.insert(Corner::new(3, 3), Corner::new(3, 4));
    set.insert(Corner::new(0, 1), Corner::new(1, 1));
    assert_eq!(
      set.first(),
      Some(BoundaryEdge::new(Corner::new(0, 1), Corner::new(1, 1)))
    );
  }
}
