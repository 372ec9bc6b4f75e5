//! Coordinate types for tile grids.
//!
//! Two lattices share the same integer space:
//! - cells, addressed by `(x, y)` with `0 <= x < width`, `0 <= y < height`
//! - [`Corner`]s, the lattice points at cell corners; cell `(x, y)` spans
//!   corners `(x, y)` to `(x + 1, y + 1)`
//!
//! Grid space is Y-down (row 0 is the top row of the level). World space is
//! Y-up, as everywhere else in Bevy; [`LevelGeometry`] converts between them.

use bevy::math::{IVec2, Vec2};

/// A lattice point at a cell corner.
///
/// Ordering is lexicographic on `(x, y)`, which is what makes
/// [`BoundaryEdge`](crate::collision::BoundaryEdge) canonical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Corner {
  pub x: i32,
  pub y: i32,
}

impl Corner {
  pub const fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }

  /// Returns the corner as a float vector in grid space.
  pub fn as_vec2(self) -> Vec2 {
    Vec2::new(self.x as f32, self.y as f32)
  }

  /// Returns the integer step from `self` to `other`.
  pub fn step_to(self, other: Corner) -> IVec2 {
    IVec2::new(other.x - self.x, other.y - self.y)
  }

  /// Returns true if `other` is one axis-aligned grid step away.
  pub fn is_unit_neighbor(self, other: Corner) -> bool {
    let step = self.step_to(other);
    step.x.abs() + step.y.abs() == 1
  }
}

impl From<Corner> for IVec2 {
  fn from(corner: Corner) -> Self {
    IVec2::new(corner.x, corner.y)
  }
}

impl From<IVec2> for Corner {
  fn from(v: IVec2) -> Self {
    Corner::new(v.x, v.y)
  }
}

/// Maps grid corners and cells to world units.
///
/// A grid unit is `cell_size` level pixels, and a level pixel is `scale`
/// world units, so one cell spans `cell_size * scale` world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelGeometry {
  pub cell_size: f32,
  pub scale: f32,
}

impl LevelGeometry {
  pub fn new(cell_size: f32, scale: f32) -> Self {
    Self { cell_size, scale }
  }

  /// World units covered by one cell edge.
  pub fn cell_span(&self) -> f32 {
    self.cell_size * self.scale
  }

  /// Converts a corner to world space (Y-up).
  pub fn corner_to_world(&self, corner: Corner) -> Vec2 {
    let span = self.cell_span();
    Vec2::new(corner.x as f32 * span, -(corner.y as f32 * span))
  }

  /// Returns the cell containing a world-space point.
  pub fn world_to_cell(&self, world: Vec2) -> IVec2 {
    let span = self.cell_span();
    IVec2::new(
      (world.x / span).floor() as i32,
      (-world.y / span).floor() as i32,
    )
  }

  /// Returns the world-space center of a cell.
  pub fn cell_center(&self, cell: IVec2) -> Vec2 {
    let span = self.cell_span();
    Vec2::new(
      (cell.x as f32 + 0.5) * span,
      -((cell.y as f32 + 0.5) * span),
    )
  }
}
