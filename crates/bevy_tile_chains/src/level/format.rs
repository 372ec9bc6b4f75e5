//! TOML level descriptions.
//!
//! ```toml
//! name = "Playground"
//!
//! [[layers]]
//! name = "Collisions"
//! cell_size = 16
//! legend = { "#" = "walls", "~" = "water" }
//! rows = [
//!   "########",
//!   "#......#",
//!   "#..~~..#",
//!   "########",
//! ]
//! ```
//!
//! `.` and space are empty cells. Every other symbol must appear in the
//! layer's legend.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use bevy::{asset::Asset, reflect::TypePath};
use serde::{Deserialize, Serialize};

use super::IntGridLayer;

/// Symbols that always mean "no cell".
const EMPTY_SYMBOLS: [char; 2] = ['.', ' '];

/// A level: a list of int-grid layers.
#[derive(Asset, TypePath, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LevelDescription {
  pub name: String,
  #[serde(default)]
  pub layers: Vec<LayerDescription>,
}

/// One int-grid layer, authored as rows of symbols.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LayerDescription {
  pub name: String,
  /// Level pixels per cell.
  pub cell_size: f32,
  /// Top row first.
  #[serde(default)]
  pub rows: Vec<String>,
  /// Symbol → category name.
  #[serde(default)]
  pub legend: BTreeMap<String, String>,
}

/// Errors raised while reading or validating a level.
#[derive(Debug)]
pub enum LevelError {
  Io(std::io::Error),
  Parse(toml::de::Error),
  DuplicateLayer(String),
  LayerNotFound(String),
  InvalidCellSize { layer: String, cell_size: f32 },
  InvalidLegendKey { layer: String, key: String },
  RaggedRow { layer: String, row: usize, expected: usize, found: usize },
  UnknownSymbol { layer: String, symbol: char, x: usize, y: usize },
}

impl std::fmt::Display for LevelError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io(e) => write!(f, "failed to read level: {}", e),
      Self::Parse(e) => write!(f, "failed to parse level: {}", e),
      Self::DuplicateLayer(name) => write!(f, "duplicate layer name: {}", name),
      Self::LayerNotFound(name) => write!(f, "layer not found: {}", name),
      Self::InvalidCellSize { layer, cell_size } => {
        write!(f, "layer {}: invalid cell size {}", layer, cell_size)
      }
      Self::InvalidLegendKey { layer, key } => {
        write!(f, "layer {}: legend key {:?} must be one character", layer, key)
      }
      Self::RaggedRow {
        layer,
        row,
        expected,
        found,
      } => write!(
        f,
        "layer {}: row {} has {} cells, expected {}",
        layer, row, found, expected
      ),
      Self::UnknownSymbol { layer, symbol, x, y } => {
        write!(f, "layer {}: unknown symbol {:?} at ({}, {})", layer, symbol, x, y)
      }
    }
  }
}

impl std::error::Error for LevelError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io(e) => Some(e),
      Self::Parse(e) => Some(e),
      _ => None,
    }
  }
}

impl From<std::io::Error> for LevelError {
  fn from(e: std::io::Error) -> Self {
    Self::Io(e)
  }
}

impl From<toml::de::Error> for LevelError {
  fn from(e: toml::de::Error) -> Self {
    Self::Parse(e)
  }
}

impl LevelDescription {
  /// Parses and validates a level from TOML.
  pub fn from_toml_str(source: &str) -> Result<Self, LevelError> {
    let level: LevelDescription = toml::from_str(source)?;
    level.validate()?;
    Ok(level)
  }

  /// Reads, parses and validates a level file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
    let source = std::fs::read_to_string(path)?;
    Self::from_toml_str(&source)
  }

  /// Checks every layer and rejects duplicate layer names.
  pub fn validate(&self) -> Result<(), LevelError> {
    let mut seen = HashSet::new();
    for layer in &self.layers {
      if !seen.insert(layer.name.as_str()) {
        return Err(LevelError::DuplicateLayer(layer.name.clone()));
      }
      layer.to_int_grid()?;
    }
    Ok(())
  }

  pub fn layer(&self, name: &str) -> Result<&LayerDescription, LevelError> {
    self
      .layers
      .iter()
      .find(|l| l.name == name)
      .ok_or_else(|| LevelError::LayerNotFound(name.to_string()))
  }

  /// Converts every layer to an int grid, in file order.
  pub fn int_grids(&self) -> Result<Vec<IntGridLayer>, LevelError> {
    self.layers.iter().map(LayerDescription::to_int_grid).collect()
  }
}

impl LayerDescription {
  /// Builds the int grid for this layer.
  ///
  /// Legend entries get values `1..` in symbol order; `0` stays empty.
  pub fn to_int_grid(&self) -> Result<IntGridLayer, LevelError> {
    if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
      return Err(LevelError::InvalidCellSize {
        layer: self.name.clone(),
        cell_size: self.cell_size,
      });
    }

    let mut symbols: BTreeMap<char, u32> = BTreeMap::new();
    let mut grid_values = Vec::with_capacity(self.legend.len());
    for (i, (key, category)) in self.legend.iter().enumerate() {
      let mut chars = key.chars();
      let (Some(symbol), None) = (chars.next(), chars.next()) else {
        return Err(LevelError::InvalidLegendKey {
          layer: self.name.clone(),
          key: key.clone(),
        });
      };
      let value = i as u32 + 1;
      symbols.insert(symbol, value);
      grid_values.push((value, category.clone()));
    }

    let width = self.rows.first().map_or(0, |r| r.chars().count());
    let mut grid = IntGridLayer::new(
      self.name.clone(),
      width as i32,
      self.rows.len() as i32,
      self.cell_size,
    );
    for (value, category) in grid_values {
      grid = grid.with_value(value, category);
    }

    for (y, row) in self.rows.iter().enumerate() {
      let found = row.chars().count();
      if found != width {
        return Err(LevelError::RaggedRow {
          layer: self.name.clone(),
          row: y,
          expected: width,
          found,
        });
      }

      for (x, symbol) in row.chars().enumerate() {
        if let Some(&value) = symbols.get(&symbol) {
          grid.set(x as i32, y as i32, value);
        } else if !EMPTY_SYMBOLS.contains(&symbol) {
          return Err(LevelError::UnknownSymbol {
            layer: self.name.clone(),
            symbol,
            x,
            y,
          });
        }
      }
    }

    Ok(grid)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const LEVEL: &str = r#####"
name = "Playground"

[[layers]]
name = "Collisions"
cell_size = 16
legend = { "#" = "walls", "~" = "water" }
rows = [
  "####",
  "#~.#",
  "####",
]
"#####;

  #[test]
  fn parses_layers_and_legend() {
    let level = LevelDescription::from_toml_str(LEVEL).unwrap();
    let grid = level.layer("Collisions").unwrap().to_int_grid().unwrap();
    assert_eq!(grid.width(), 4);
    assert_eq!(grid.height(), 3);
    assert_eq!(grid.category_at(0, 0), Some("walls"));
    assert_eq!(grid.category_at(1, 1), Some("water"));
    assert_eq!(grid.category_at(2, 1), None);
  }

  #[test]
  fn missing_layer_is_an_error() {
    let level = LevelDescription::from_toml_str(LEVEL).unwrap();
    assert!(matches!(
      level.layer("Background"),
      Err(LevelError::LayerNotFound(_))
    ));
  }

  #[test]
  fn ragged_rows_are_rejected() {
    let source = LEVEL.replace("\"#~.#\"", "\"#~.\"");
    let err = LevelDescription::from_toml_str(&source).unwrap_err();
    assert!(matches!(err, LevelError::RaggedRow { row: 1, .. }), "{err}");
  }

  #[test]
  fn unknown_symbols_are_rejected() {
    let source = LEVEL.replace("\"#~.#\"", "\"#?.#\"");
    let err = LevelDescription::from_toml_str(&source).unwrap_err();
    assert!(matches!(err, LevelError::UnknownSymbol { symbol: '?', x: 1, y: 1, .. }));
  }

  #[test]
  fn bad_cell_size_is_rejected() {
    let source = LEVEL.replace("cell_size = 16", "cell_size = 0");
    assert!(matches!(
      LevelDescription::from_toml_str(&source),
      Err(LevelError::InvalidCellSize { .. })
    ));
  }

  #[test]
  fn multi_char_legend_key_is_rejected() {
    let source = LEVEL.replace("\"~\" = \"water\"", "\"~~\" = \"water\"");
    assert!(matches!(
      LevelDescription::from_toml_str(&source),
      Err(LevelError::InvalidLegendKey { .. })
    ));
  }

  #[test]
  fn duplicate_layers_are_rejected() {
    let source = format!(
      "{}\n[[layers]]\nname = \"Collisions\"\ncell_size = 8\n",
      LEVEL
    );
    assert!(matches!(
      LevelDescription::from_toml_str(&source),
      Err(LevelError::DuplicateLayer(_))
    ));
  }

  #[test]
  fn malformed_toml_is_a_parse_error() {
    assert!(matches!(
      LevelDescription::from_toml_str("name = "),
      Err(LevelError::Parse(_))
    ));
  }
}
