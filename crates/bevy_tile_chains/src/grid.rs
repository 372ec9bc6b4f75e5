//! Cell classification.
//!
//! The extractor never looks at tile data directly. It asks a
//! [`CellClassifier`] whether a cell is solid, which keeps level formats and
//! category rules out of the collision code.

/// Answers "is this cell solid?" for a rectangular grid.
///
/// Implementations must report every out-of-bounds coordinate as not solid.
/// The provided [`in_bounds`](Self::in_bounds) helper makes that easy.
pub trait CellClassifier {
  /// Grid width in cells.
  fn width(&self) -> i32;

  /// Grid height in cells.
  fn height(&self) -> i32;

  /// Returns true if the cell at `(x, y)` is solid.
  fn is_solid(&self, x: i32, y: i32) -> bool;

  fn in_bounds(&self, x: i32, y: i32) -> bool {
    x >= 0 && y >= 0 && x < self.width() && y < self.height()
  }
}

impl<T: CellClassifier + ?Sized> CellClassifier for &T {
  fn width(&self) -> i32 {
    (**self).width()
  }

  fn height(&self) -> i32 {
    (**self).height()
  }

  fn is_solid(&self, x: i32, y: i32) -> bool {
    (**self).is_solid(x, y)
  }
}

/// A plain row-major boolean grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolidGrid {
  width: i32,
  height: i32,
  cells: Vec<bool>,
}

impl SolidGrid {
  /// Creates an all-empty grid. Negative sizes are clamped to zero.
  pub fn new(width: i32, height: i32) -> Self {
    let width = width.max(0);
    let height = height.max(0);
    Self {
      width,
      height,
      cells: vec![false; (width as usize) * (height as usize)],
    }
  }

  /// Builds a grid from ASCII rows, `#` marking a solid cell.
  ///
  /// Rows shorter than the widest row are padded with empty cells.
  pub fn from_rows(rows: &[&str]) -> Self {
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
    let mut grid = Self::new(width, rows.len() as i32);
    for (y, row) in rows.iter().enumerate() {
      for (x, ch) in row.chars().enumerate() {
        if ch == '#' {
          grid.set(x as i32, y as i32, true);
        }
      }
    }
    grid
  }

  /// Sets a cell. Out-of-bounds writes are ignored.
  pub fn set(&mut self, x: i32, y: i32, solid: bool) {
    if let Some(idx) = self.index(x, y) {
      self.cells[idx] = solid;
    }
  }

  /// Fills the rectangle `[x, x + w) x [y, y + h)`, clipped to the grid.
  pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, solid: bool) {
    for cy in y..y + h {
      for cx in x..x + w {
        self.set(cx, cy, solid);
      }
    }
  }

  /// Number of solid cells.
  pub fn solid_count(&self) -> usize {
    self.cells.iter().filter(|&&c| c).count()
  }

  fn index(&self, x: i32, y: i32) -> Option<usize> {
    self
      .in_bounds(x, y)
      .then(|| (y as usize) * (self.width as usize) + x as usize)
  }
}

impl CellClassifier for SolidGrid {
  fn width(&self) -> i32 {
    self.width
  }

  fn height(&self) -> i32 {
    self.height
  }

  fn is_solid(&self, x: i32, y: i32) -> bool {
    self.index(x, y).is_some_and(|idx| self.cells[idx])
  }
}
