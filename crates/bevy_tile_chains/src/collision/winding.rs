//! Loop winding correction.
//!
//! One-sided chain colliders only collide from one side, so every loop must
//! be ordered with solid material on the right of travel (grid space, Y-down).
//! A traced grid boundary is consistently wound along its whole length, so
//! probing beside a single edge is enough to decide the direction.

use bevy::math::Vec2;

use crate::coords::Corner;
use crate::grid::CellClassifier;

/// Fraction of a cell the sample point is offset from the sampled edge.
const SAMPLE_OFFSET: f32 = 0.25;

/// Outcome of [`correct_winding`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindingFix {
  /// Solid was already on the right.
  Kept,
  /// The loop was reversed.
  Reversed,
  /// Every edge has zero length; the loop was left untouched.
  Degenerate,
}

/// Samples the cell just right of the first non-degenerate edge.
///
/// Returns `None` if every edge of the loop has zero length. Coordinates are
/// taken through pixel space (`corner * cell_size * scale`) so the sample
/// point is placed exactly where the consumer will put the chain. A span that
/// is not positive and finite would collapse or mirror the sample point, so it
/// falls back to plain grid units.
pub fn solid_on_right(
  points: &[Corner],
  grid: &impl CellClassifier,
  cell_size: f32,
  scale: f32,
) -> Option<bool> {
  let span = sample_span(cell_size, scale);
  let n = points.len();

  for i in 0..n {
    let a = points[i].as_vec2() * span;
    let b = points[(i + 1) % n].as_vec2() * span;

    let Some(dir) = (b - a).try_normalize() else {
      continue;
    };

    // Right-hand normal in Y-down space.
    let right = Vec2::new(-dir.y, dir.x);
    let sample = (a + b) * 0.5 + right * (SAMPLE_OFFSET * span);

    let gx = (sample.x / span).floor() as i32;
    let gy = (sample.y / span).floor() as i32;
    return Some(grid.is_solid(gx, gy));
  }

  None
}

fn sample_span(cell_size: f32, scale: f32) -> f32 {
  let span = cell_size * scale;
  if span.is_finite() && span > 0.0 { span } else { 1.0 }
}

/// Reverses `points` in place if solid lies on the left of travel.
pub fn correct_winding(
  points: &mut [Corner],
  grid: &impl CellClassifier,
  cell_size: f32,
  scale: f32,
) -> WindingFix {
  match solid_on_right(points, grid, cell_size, scale) {
    Some(true) => WindingFix::Kept,
    Some(false) => {
      points.reverse();
      WindingFix::Reversed
    }
    None => WindingFix::Degenerate,
  }
}
