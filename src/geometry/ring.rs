use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Point2, TOLERANCE};

/// An open cyclic sequence of points; the last point connects back to the
/// first and is never repeated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ring {
    pub points: Vec<Point2>,
}

impl Ring {
    /// Creates a ring, dropping a trailing point that repeats the first.
    #[must_use]
    pub fn new(mut points: Vec<Point2>) -> Self {
        if points.len() > 1 {
            let first = points[0];
            let last = points[points.len() - 1];
            if (first - last).norm() < TOLERANCE {
                points.pop();
            }
        }
        Self { points }
    }

    /// Number of vertices (equal to the number of edges).
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the edges as `(start, end)` pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Signed shoelace area. Outer rings are positive, hole rings negative.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    /// Returns a copy with every coordinate multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| Point2::new(p.x * factor, p.y * factor))
                .collect(),
        }
    }

    /// Returns a copy whose vertex list starts at index `start`.
    #[must_use]
    pub fn rotated(&self, start: usize) -> Self {
        let mut points = self.points.clone();
        let len = points.len();
        if len > 0 {
            points.rotate_left(start % len);
        }
        Self { points }
    }

    /// Checks that the ring has at least three vertices and no zero-length edge.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegeneratePolygon` otherwise.
    pub fn validate(&self) -> Result<()> {
        if self.points.len() < 3 {
            return Err(GeometryError::DegeneratePolygon(format!(
                "ring has {} vertices, at least 3 required",
                self.points.len()
            ))
            .into());
        }
        if let Some((a, _)) = self.edges().find(|(a, b)| (b - a).norm() < TOLERANCE) {
            return Err(GeometryError::DegeneratePolygon(format!(
                "zero-length edge at ({}, {})",
                a.x, a.y
            ))
            .into());
        }
        Ok(())
    }
}

/// One connected component of a unioned cell set: an outer boundary plus any
/// enclosed holes, wound opposite to the outer ring.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outline {
    pub outer: Ring,
    pub holes: Vec<Ring>,
}

impl Outline {
    /// Iterates over the outer ring followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }

    /// Returns a copy with every ring scaled by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            outer: self.outer.scaled(factor),
            holes: self.holes.iter().map(|h| h.scaled(factor)).collect(),
        }
    }
}
