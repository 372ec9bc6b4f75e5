//! Collinear vertex reduction.
//!
//! Traced loops have a point at every grid corner along a straight wall.
//! Chain colliders only need the points where the wall changes direction.

use bevy::math::IVec2;

use crate::coords::Corner;

/// Exact direction of a lattice step: the step divided by the gcd of its
/// components. Zero for a zero-length step.
fn direction(from: Corner, to: Corner) -> IVec2 {
  let step = from.step_to(to);
  let g = gcd(step.x.unsigned_abs(), step.y.unsigned_abs()) as i32;
  if g == 0 { IVec2::ZERO } else { step / g }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
  while b != 0 {
    (a, b) = (b, a % b);
  }
  a
}

/// Drops repeated consecutive points, including a repeat across the seam.
fn dedup_cyclic(points: &[Corner]) -> Vec<Corner> {
  let mut out: Vec<Corner> = Vec::with_capacity(points.len());
  for &p in points {
    if out.last() != Some(&p) {
      out.push(p);
    }
  }
  while out.len() > 1 && out.first() == out.last() {
    out.pop();
  }
  out
}

/// Removes every point whose incoming and outgoing directions match.
///
/// The loop is implicitly closed, so the point where the sequence starts is
/// examined like any other: a rectangle always reduces to its four corners,
/// wherever the walk happened to begin. Zero-length segments are removed
/// first and never cause a point to be kept. Loops with fewer than 3 distinct
/// points are returned deduplicated but otherwise unchanged.
///
/// Reducing an already reduced loop returns it unchanged.
pub fn reduce_collinear(points: &[Corner]) -> Vec<Corner> {
  keep_turns(&dedup_cyclic(points))
}

/// Keeps the points where the direction changes. A zero-length step has its
/// own direction, so repeats must be gone before this runs.
fn keep_turns(points: &[Corner]) -> Vec<Corner> {
  let n = points.len();
  if n < 3 {
    return points.to_vec();
  }

  (0..n)
    .filter(|&i| {
      let prev = points[(i + n - 1) % n];
      let cur = points[i];
      let next = points[(i + 1) % n];
      direction(prev, cur) != direction(cur, next)
    })
    .map(|i| points[i])
    .collect()
}
