//! Level layers and category-based cell classification.
//!
//! A level is made of int-grid layers: every cell stores a small integer, and
//! each non-zero integer names a category ("walls", "water", ...). Which
//! categories collide is decided by the caller, not by the layer.

mod format;

use std::collections::HashSet;

use bevy::prelude::*;
pub use format::{LayerDescription, LevelDescription, LevelError};

use crate::coords::LevelGeometry;
use crate::grid::CellClassifier;

/// A named int-grid value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntGridValue {
  pub value: u32,
  pub name: String,
}

/// A rectangular layer of int-grid cells. Value `0` is always empty.
#[derive(Clone, Debug, PartialEq)]
pub struct IntGridLayer {
  pub name: String,
  /// Level pixels per cell.
  pub cell_size: f32,
  pub values: Vec<IntGridValue>,
  width: i32,
  height: i32,
  cells: Vec<u32>,
}

impl IntGridLayer {
  pub fn new(name: impl Into<String>, width: i32, height: i32, cell_size: f32) -> Self {
    let width = width.max(0);
    let height = height.max(0);
    Self {
      name: name.into(),
      cell_size,
      values: Vec::new(),
      width,
      height,
      cells: vec![0; (width as usize) * (height as usize)],
    }
  }

  /// Registers a category name for `value`.
  pub fn with_value(mut self, value: u32, name: impl Into<String>) -> Self {
    self.values.push(IntGridValue {
      value,
      name: name.into(),
    });
    self
  }

  pub fn width(&self) -> i32 {
    self.width
  }

  pub fn height(&self) -> i32 {
    self.height
  }

  /// Sets a cell. Out-of-bounds writes are ignored.
  pub fn set(&mut self, x: i32, y: i32, value: u32) {
    if let Some(idx) = self.index(x, y) {
      self.cells[idx] = value;
    }
  }

  /// Returns the cell value, `0` when out of bounds.
  pub fn get(&self, x: i32, y: i32) -> u32 {
    self.index(x, y).map_or(0, |idx| self.cells[idx])
  }

  /// Returns the category name registered for `value`.
  pub fn value_name(&self, value: u32) -> Option<&str> {
    self
      .values
      .iter()
      .find(|v| v.value == value)
      .map(|v| v.name.as_str())
  }

  /// Returns the category name of the cell at `(x, y)`.
  pub fn category_at(&self, x: i32, y: i32) -> Option<&str> {
    match self.get(x, y) {
      0 => None,
      value => self.value_name(value),
    }
  }

  /// Classifies cells as solid when their category is one of `solid`.
  pub fn classify<S: AsRef<str>>(&self, solid: &[S]) -> CategoryClassifier<'_> {
    let names: HashSet<&str> = solid.iter().map(|s| s.as_ref()).collect();
    let solid_values = self
      .values
      .iter()
      .filter(|v| v.value != 0 && names.contains(v.name.as_str()))
      .map(|v| v.value)
      .collect();
    CategoryClassifier {
      layer: self,
      solid_values,
    }
  }

  /// Grid to world mapping for this layer at the given scale.
  pub fn geometry(&self, scale: f32) -> LevelGeometry {
    LevelGeometry::new(self.cell_size, scale)
  }

  fn index(&self, x: i32, y: i32) -> Option<usize> {
    (x >= 0 && y >= 0 && x < self.width && y < self.height)
      .then(|| (y as usize) * (self.width as usize) + x as usize)
  }
}

/// Solid-by-category view of an [`IntGridLayer`].
#[derive(Clone, Debug)]
pub struct CategoryClassifier<'a> {
  layer: &'a IntGridLayer,
  solid_values: HashSet<u32>,
}

impl CategoryClassifier<'_> {
  /// Returns true if no category of the layer is solid.
  pub fn is_inert(&self) -> bool {
    self.solid_values.is_empty()
  }
}

impl CellClassifier for CategoryClassifier<'_> {
  fn width(&self) -> i32 {
    self.layer.width
  }

  fn height(&self) -> i32 {
    self.layer.height
  }

  fn is_solid(&self, x: i32, y: i32) -> bool {
    match self.layer.get(x, y) {
      0 => false,
      value => self.solid_values.contains(&value),
    }
  }
}

/// A level layer whose collision chains should be built.
///
/// Chains are attached to the same entity as
/// [`LayerChains`](crate::collision::LayerChains) once extracted.
#[derive(Component, Clone, Debug)]
pub struct TileLayer {
  pub grid: IntGridLayer,
}

impl TileLayer {
  pub fn new(grid: IntGridLayer) -> Self {
    Self { grid }
  }
}
