use crate::geometry::{CellKey, GridPoint};

use super::color::Rgb;

/// Per-cell data supplied by the puzzle author.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellData {
    /// Pencil marks printed in the cell as part of the puzzle.
    pub given_marks: Vec<String>,
}

/// An auxiliary cell group with an optional label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cage {
    pub cells: Vec<CellKey>,
    pub label: Option<String>,
}

impl Cage {
    /// The cell with the smallest row, then the smallest column.
    #[must_use]
    pub fn top_left(&self) -> Option<CellKey> {
        self.cells.iter().min().copied()
    }

    /// The label, if it contains anything besides whitespace.
    #[must_use]
    pub fn visible_label(&self) -> Option<&str> {
        self.label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}

/// A polyline drawn through cell-unit waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub waypoints: Vec<GridPoint>,
    pub color: Rgb,
    /// Nominal stroke width, multiplied by the scene's scale factor.
    pub thickness: f64,
}

/// A line with a head at its last waypoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub line: Line,
    /// Head size in cells.
    pub head_length: f64,
}

/// A rectangle, rounded rectangle or ellipse centred on a grid point, drawn
/// under (underlay) or over (overlay) the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayShape {
    pub center: GridPoint,
    /// Width in cells.
    pub width: f64,
    /// Height in cells.
    pub height: f64,
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub background: Option<Rgb>,
    pub border: Option<Rgb>,
    pub rounded: bool,
}

impl OverlayShape {
    /// A plain shape with no text or colours.
    #[must_use]
    pub fn new(center: GridPoint, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
            text: None,
            font_size: None,
            background: None,
            border: None,
            rounded: false,
        }
    }
}

/// The static puzzle definition the scene is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleModel {
    /// Nominal cell size in pixels.
    pub cell_size: f64,
    /// Rows of cells.
    pub cells: Vec<Vec<CellData>>,
    pub regions: Vec<Vec<CellKey>>,
    pub cages: Vec<Cage>,
    pub lines: Vec<Line>,
    pub arrows: Vec<Arrow>,
    pub underlays: Vec<OverlayShape>,
    pub overlays: Vec<OverlayShape>,
}

impl PuzzleModel {
    /// An empty `rows` x `cols` grid with no regions or decorations.
    #[must_use]
    pub fn new(rows: u32, cols: u32, cell_size: f64) -> Self {
        Self {
            cell_size,
            cells: (0..rows)
                .map(|_| (0..cols).map(|_| CellData::default()).collect())
                .collect(),
            regions: Vec::new(),
            cages: Vec::new(),
            lines: Vec::new(),
            arrows: Vec::new(),
            underlays: Vec::new(),
            overlays: Vec::new(),
        }
    }

    /// A `size` x `size` grid split into `box_rows` x `box_cols` regions.
    #[must_use]
    pub fn with_boxes(size: u32, box_rows: u32, box_cols: u32, cell_size: f64) -> Self {
        let mut model = Self::new(size, size, cell_size);
        for br in (0..size).step_by(box_rows.max(1) as usize) {
            for bc in (0..size).step_by(box_cols.max(1) as usize) {
                let region = (br..(br + box_rows).min(size))
                    .flat_map(|r| (bc..(bc + box_cols).min(size)).map(move |c| CellKey::new(r, c)))
                    .collect();
                model.regions.push(region);
            }
        }
        model
    }

    /// Iterates over every cell key with its data, row by row.
    pub fn cell_keys(&self) -> impl Iterator<Item = (CellKey, &CellData)> {
        self.cells.iter().zip(0u32..).flat_map(|(row, r)| {
            row.iter()
                .zip(0u32..)
                .map(move |(data, c)| (CellKey::new(r, c), data))
        })
    }

    /// Returns the author data for `key`, if the cell exists.
    #[must_use]
    pub fn cell(&self, key: CellKey) -> Option<&CellData> {
        self.cells
            .get(key.row as usize)
            .and_then(|row| row.get(key.col as usize))
    }

    /// Returns `true` if `key` is the top-left cell of a cage with a visible label.
    #[must_use]
    pub fn has_cage_label_at(&self, key: CellKey) -> bool {
        self.cages
            .iter()
            .any(|cage| cage.visible_label().is_some() && cage.top_left() == Some(key))
    }
}
