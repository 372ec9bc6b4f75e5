//! Extraction scenarios on small hand-drawn grids.

use std::collections::BTreeSet;

use bevy_tile_chains::collision::{ExtractorConfig, extract_boundary_loops};
use bevy_tile_chains::grid::{CellClassifier, SolidGrid};
use bevy_tile_chains::{Corner, Extraction};

fn extract(rows: &[&str]) -> (SolidGrid, Extraction) {
  let grid = SolidGrid::from_rows(rows);
  let extraction = extract_boundary_loops(&grid, &ExtractorConfig::new(16.0, 4.0));
  (grid, extraction)
}

fn corner_set(points: &[Corner]) -> BTreeSet<(i32, i32)> {
  points.iter().map(|c| (c.x, c.y)).collect()
}

/// Twice the signed area, Y-down grid space.
fn signed_area2(points: &[Corner]) -> i64 {
  let n = points.len();
  (0..n)
    .map(|i| {
      let a = points[i];
      let b = points[(i + 1) % n];
      a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
    })
    .sum()
}

/// Every unit step of every loop has solid on its right and not on its left.
fn assert_solid_on_right(grid: &SolidGrid, loops: &[Vec<Corner>]) {
  for points in loops {
    let n = points.len();
    for i in 0..n {
      let a = points[i];
      let b = points[(i + 1) % n];
      let step = a.step_to(b);
      let len = step.x.abs() + step.y.abs();
      assert!(step.x == 0 || step.y == 0, "diagonal edge {:?} -> {:?}", a, b);
      let dir = step / len;

      for k in 0..len {
        // Cell on each side of the unit sub-edge starting at `p`.
        let p = a.as_vec2() + (dir * k).as_vec2() + dir.as_vec2() * 0.5;
        let right = bevy::math::Vec2::new(-dir.y as f32, dir.x as f32) * 0.25;
        let r = (p + right).floor();
        let l = (p - right).floor();
        assert!(
          grid.is_solid(r.x as i32, r.y as i32),
          "right of {:?} -> {:?} is not solid",
          a,
          b
        );
        assert!(
          !grid.is_solid(l.x as i32, l.y as i32),
          "left of {:?} -> {:?} is solid",
          a,
          b
        );
      }
    }
  }
}

#[test]
fn single_rectangle_reduces_to_four_corners() {
  let (grid, extraction) = extract(&["###", "###", "###"]);

  assert_eq!(extraction.loops.len(), 1);
  assert_eq!(
    corner_set(&extraction.loops[0]),
    BTreeSet::from([(0, 0), (3, 0), (3, 3), (0, 3)])
  );
  assert_eq!(extraction.loops[0].len(), 4);
  assert_solid_on_right(&grid, &extraction.loops);
}

#[test]
fn donut_yields_outer_and_hole_loops() {
  let (grid, extraction) = extract(&["###", "#.#", "###"]);

  assert_eq!(extraction.loops.len(), 2);
  assert!(extraction.loops.iter().all(|l| l.len() == 4));

  let outer = extraction
    .loops
    .iter()
    .find(|l| l.contains(&Corner::new(0, 0)))
    .unwrap();
  let hole = extraction
    .loops
    .iter()
    .find(|l| l.contains(&Corner::new(1, 1)))
    .unwrap();
  assert_eq!(corner_set(hole), BTreeSet::from([(1, 1), (2, 1), (2, 2), (1, 2)]));

  // Solid on the right makes the outline and the hole wind opposite ways.
  assert!(signed_area2(outer).signum() == -signed_area2(hole).signum());
  assert_solid_on_right(&grid, &extraction.loops);
}

#[test]
fn five_by_five_with_empty_center() {
  let (grid, extraction) = extract(&["#####", "#####", "##.##", "#####", "#####"]);

  assert_eq!(extraction.loops.len(), 2);
  assert!(extraction.loops.iter().all(|l| l.len() == 4));

  let outer = extraction
    .loops
    .iter()
    .find(|l| l.contains(&Corner::new(0, 0)))
    .unwrap();
  let hole = extraction
    .loops
    .iter()
    .find(|l| l.contains(&Corner::new(2, 2)))
    .unwrap();
  assert_eq!(corner_set(outer), BTreeSet::from([(0, 0), (5, 0), (5, 5), (0, 5)]));
  assert_eq!(corner_set(hole), BTreeSet::from([(2, 2), (3, 2), (3, 3), (2, 3)]));
  assert!(signed_area2(outer).signum() == -signed_area2(hole).signum());
  // 24 solid cells: the outline encloses 25, the hole takes one back.
  assert_eq!(signed_area2(outer).abs() - signed_area2(hole).abs(), 48);
  assert_solid_on_right(&grid, &extraction.loops);
}

#[test]
fn disjoint_blocks_yield_one_loop_each() {
  let (grid, extraction) = extract(&["##..##", "##..##"]);

  assert_eq!(extraction.loops.len(), 2);
  let mut sets: Vec<_> = extraction.loops.iter().map(|l| corner_set(l)).collect();
  sets.sort();
  assert_eq!(sets[0], BTreeSet::from([(0, 0), (2, 0), (2, 2), (0, 2)]));
  assert_eq!(sets[1], BTreeSet::from([(4, 0), (6, 0), (6, 2), (4, 2)]));
  assert_solid_on_right(&grid, &extraction.loops);
}

#[test]
fn empty_grid_yields_nothing() {
  let (_, extraction) = extract(&["....", "...."]);
  assert!(extraction.is_empty());
  assert_eq!(extraction.stats.edges, 0);

  let zero = SolidGrid::new(0, 0);
  assert!(extract_boundary_loops(&zero, &ExtractorConfig::default()).is_empty());
}

#[test]
fn solid_touching_border_is_closed_along_the_border() {
  let (grid, extraction) = extract(&["####", "##..", "#..."]);

  assert_eq!(extraction.loops.len(), 1);
  let corners = corner_set(&extraction.loops[0]);
  assert!(corners.contains(&(0, 0)));
  assert!(corners.contains(&(4, 0)));
  assert!(corners.contains(&(0, 3)));
  assert_eq!(extraction.stats.open_chains, 0);
  assert_solid_on_right(&grid, &extraction.loops);
}

#[test]
fn diagonal_contact_splits_into_two_loops() {
  let (grid, extraction) = extract(&["#.", ".#"]);

  assert_eq!(extraction.loops.len(), 2);
  assert!(extraction.loops.iter().all(|l| l.len() == 4));
  assert_eq!(extraction.stats.open_chains, 0);
  assert_solid_on_right(&grid, &extraction.loops);
}

#[test]
fn staircase_keeps_every_step() {
  let (grid, extraction) = extract(&["#..", "##.", "###"]);

  assert_eq!(extraction.loops.len(), 1);
  // 3 steps: 2 corners per step plus the two far corners.
  assert_eq!(extraction.loops[0].len(), 8);
  assert_solid_on_right(&grid, &extraction.loops);
}

#[test]
fn extraction_is_deterministic() {
  let rows = ["#.#.#", ".###.", "##.##", ".#.#."];
  let (_, first) = extract(&rows);
  let (_, second) = extract(&rows);
  assert_eq!(first.loops, second.loops);
}
