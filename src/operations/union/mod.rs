mod trace;

use std::collections::BTreeSet;

use crate::geometry::{CellKey, Outline, Ring};
use crate::math::polygon_2d::{contains_point, rotate_to_canonical_start};
use crate::math::Point2;

use trace::{trace_loops, LatticeEdge, LatticePoint};

/// Merges a set of unit grid cells into outline polygons.
///
/// Every cell `(row, col)` is the unit square with corners `(col, row)` and
/// `(col + 1, row + 1)`. Interior edges shared by two cells cancel out; the
/// remaining boundary is traced into one [`Outline`] per connected component.
/// Outer rings have positive signed area, holes negative.
///
/// The result is deterministic for a given cell set: outlines are ordered by
/// their top-left vertex and every ring starts at its top-left vertex.
#[derive(Debug, Clone)]
pub struct UnionCells {
    cells: BTreeSet<CellKey>,
}

impl UnionCells {
    /// Creates a new union operation. Duplicate cells are ignored.
    #[must_use]
    pub fn new<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = CellKey>,
    {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    /// Executes the union in grid units. An empty cell set yields no outlines.
    #[must_use]
    pub fn execute(&self) -> Vec<Outline> {
        let edges = self.boundary_edges();
        let loops = trace_loops(&edges);

        let mut outers: Vec<Outline> = Vec::new();
        let mut holes: Vec<Ring> = Vec::new();
        for lattice in loops {
            let ring = to_ring(&lattice);
            if ring.signed_area() > 0.0 {
                outers.push(Outline {
                    outer: ring,
                    holes: Vec::new(),
                });
            } else {
                holes.push(ring);
            }
        }

        for hole in holes {
            let sample = hole_sample_point(&hole);
            let owner = outers
                .iter_mut()
                .filter(|o| contains_point(&o.outer.points, &sample))
                .min_by(|a, b| a.outer.signed_area().total_cmp(&b.outer.signed_area()));
            if let Some(owner) = owner {
                owner.holes.push(hole);
            }
        }

        outers
    }

    /// Executes the union and scales every vertex by `cell_size`.
    #[must_use]
    pub fn execute_scaled(&self, cell_size: f64) -> Vec<Outline> {
        self.execute()
            .into_iter()
            .map(|o| o.scaled(cell_size))
            .collect()
    }

    /// Collects the directed unit edges that are not shared by two cells.
    fn boundary_edges(&self) -> BTreeSet<LatticeEdge> {
        let mut all: BTreeSet<LatticeEdge> = BTreeSet::new();
        for cell in &self.cells {
            let x = i64::from(cell.col);
            let y = i64::from(cell.row);
            let corners: [LatticePoint; 4] = [(x, y), (x + 1, y), (x + 1, y + 1), (x, y + 1)];
            for i in 0..4 {
                all.insert((corners[i], corners[(i + 1) % 4]));
            }
        }
        all.iter()
            .filter(|(a, b)| !all.contains(&(*b, *a)))
            .copied()
            .collect()
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_ring(lattice: &[LatticePoint]) -> Ring {
    let points: Vec<Point2> = lattice
        .iter()
        .map(|&(x, y)| Point2::new(x as f64, y as f64))
        .collect();
    Ring::new(rotate_to_canonical_start(&points))
}

/// Returns the centre of the empty cell just right of the hole's first edge.
/// Hole rings keep the filled area on their left, so this cell lies inside
/// the hole and never on a boundary.
fn hole_sample_point(hole: &Ring) -> Point2 {
    let a = hole.points[0];
    let b = hole.points[1 % hole.points.len()];
    let dir = (b - a).normalize();
    let mid = a + (dir * 0.5);
    Point2::new(mid.x + dir.y * 0.5, mid.y - dir.x * 0.5)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn cells(list: &[(u32, u32)]) -> Vec<CellKey> {
        list.iter().map(|&c| CellKey::from(c)).collect()
    }

    #[test]
    fn single_cell_is_unit_square() {
        let result = UnionCells::new(cells(&[(0, 0)])).execute();
        assert_eq!(result.len(), 1);
        assert_eq!(
            result[0].outer.points,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ]
        );
        assert!(result[0].holes.is_empty());
    }

    #[test]
    fn scaled_single_cell() {
        let result = UnionCells::new(cells(&[(0, 0)])).execute_scaled(43.2);
        let p = result[0].outer.points[2];
        assert_relative_eq!(p.x, 43.2);
        assert_relative_eq!(p.y, 43.2);
    }

    #[test]
    fn empty_set_yields_nothing() {
        assert!(UnionCells::new(Vec::new()).execute().is_empty());
    }

    #[test]
    fn l_shape_has_six_vertices() {
        let result = UnionCells::new(cells(&[(0, 0), (1, 0), (1, 1)])).execute();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].outer.len(), 6);
    }

    #[test]
    fn diagonal_cells_stay_separate() {
        let result = UnionCells::new(cells(&[(0, 0), (1, 1)])).execute();
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|o| o.outer.len() == 4));
    }

    #[test]
    fn ring_of_cells_has_a_hole() {
        let mut ring = Vec::new();
        for r in 0..3 {
            for c in 0..3 {
                if (r, c) != (1, 1) {
                    ring.push(CellKey::new(r, c));
                }
            }
        }
        let result = UnionCells::new(ring).execute();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].outer.len(), 4);
        assert_eq!(result[0].holes.len(), 1);
        let hole = &result[0].holes[0];
        assert_eq!(hole.len(), 4);
        assert!(hole.signed_area() < 0.0);
        assert_relative_eq!(hole.signed_area(), -1.0);
    }

    #[test]
    fn duplicates_are_ignored() {
        let a = UnionCells::new(cells(&[(2, 3), (2, 3), (2, 4)])).execute();
        let b = UnionCells::new(cells(&[(2, 4), (2, 3)])).execute();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn solid_rectangle_has_four_vertices(
            row in 0u32..20,
            col in 0u32..20,
            h in 1u32..8,
            w in 1u32..8,
        ) {
            let mut list = Vec::new();
            for r in row..row + h {
                for c in col..col + w {
                    list.push(CellKey::new(r, c));
                }
            }
            let result = UnionCells::new(list).execute();
            prop_assert_eq!(result.len(), 1);
            prop_assert_eq!(result[0].outer.len(), 4);
            prop_assert!(result[0].holes.is_empty());
            prop_assert!((result[0].outer.signed_area() - f64::from(w * h)).abs() < 1e-9);
        }

        #[test]
        fn disjoint_groups_yield_one_outline_each(
            groups in 1usize..5,
            h in 1u32..4,
            w in 1u32..4,
        ) {
            let mut list = Vec::new();
            for g in 0..groups {
                let col0 = u32::try_from(g).unwrap() * (w + 1);
                for r in 0..h {
                    for c in col0..col0 + w {
                        list.push(CellKey::new(r, c));
                    }
                }
            }
            let result = UnionCells::new(list.clone()).execute();
            prop_assert_eq!(result.len(), groups);
            prop_assert_eq!(UnionCells::new(list).execute(), result);
        }
    }
}
