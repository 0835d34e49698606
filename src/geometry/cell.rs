use std::fmt;

/// Integer coordinate of a grid cell.
///
/// The derived ordering compares `row` first, then `col`, so the smallest key
/// of a set is its top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub row: u32,
    pub col: u32,
}

impl CellKey {
    /// Creates a key for the cell at `row`, `col`.
    #[must_use]
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl From<(u32, u32)> for CellKey {
    fn from((row, col): (u32, u32)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row + 1, self.col + 1)
    }
}

/// A possibly fractional position in cell units, e.g. `(0.5, 0.5)` for the
/// centre of the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub row: f64,
    pub col: f64,
}

impl GridPoint {
    #[must_use]
    pub fn new(row: f64, col: f64) -> Self {
        Self { row, col }
    }
}

impl From<CellKey> for GridPoint {
    fn from(key: CellKey) -> Self {
        Self {
            row: f64::from(key.row),
            col: f64::from(key.col),
        }
    }
}
