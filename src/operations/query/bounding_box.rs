use crate::math::{Point2, Vector2};

/// An axis-aligned bounding box in scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner (top-left on screen).
    pub min: Point2,
    /// Maximum corner (bottom-right on screen).
    pub max: Point2,
}

impl Aabb {
    /// Creates a box from an origin and a size.
    #[must_use]
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: Point2::new(x, y),
            max: Point2::new(x + width, y + height),
        }
    }

    /// Returns the tightest box around `points`, or `None` if there are none.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let mut bb = BoundingBox::new();
        for p in points {
            bb.include_point(*p);
        }
        bb.finish()
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns the smallest box containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Grows the box by `margin` on every side.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        let m = Vector2::new(margin, margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    /// Returns `true` if `p` lies inside or on the border of the box.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Grows the box outward to the nearest half unit on every side, so
    /// strokes land on sharp pixel boundaries.
    #[must_use]
    pub fn snapped_to_half(&self) -> Self {
        let down = |v: f64| (v * 2.0).floor() / 2.0;
        let up = |v: f64| (v * 2.0).ceil() / 2.0;
        Self {
            min: Point2::new(down(self.min.x), down(self.min.y)),
            max: Point2::new(up(self.max.x), up(self.max.y)),
        }
    }
}

/// Incrementally accumulates a bounding box.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundingBox {
    current: Option<Aabb>,
}

impl BoundingBox {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extends the box to include `p`.
    pub fn include_point(&mut self, p: Point2) {
        let point_box = Aabb { min: p, max: p };
        self.include(&point_box);
    }

    /// Extends the box to include `other`.
    pub fn include(&mut self, other: &Aabb) {
        self.current = Some(match self.current {
            Some(bb) => bb.union(other),
            None => *other,
        });
    }

    /// Returns the accumulated box, or `None` if nothing was included.
    #[must_use]
    pub fn finish(&self) -> Option<Aabb> {
        self.current
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_points_tight() {
        let bb = Aabb::from_points(&[
            Point2::new(1.0, 5.0),
            Point2::new(-2.0, 3.0),
            Point2::new(4.0, -1.0),
        ])
        .unwrap();
        assert_relative_eq!(bb.min.x, -2.0);
        assert_relative_eq!(bb.min.y, -1.0);
        assert_relative_eq!(bb.width(), 6.0);
        assert_relative_eq!(bb.height(), 6.0);
    }

    #[test]
    fn empty_accumulator_yields_none() {
        assert!(BoundingBox::new().finish().is_none());
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn snap_rounds_outward() {
        let bb = Aabb::from_origin_size(-1.75, 0.25, 100.25, 49.875);
        let s = bb.snapped_to_half();
        assert_relative_eq!(s.min.x, -2.0);
        assert_relative_eq!(s.min.y, 0.0);
        assert_relative_eq!(s.max.x, 98.5);
        assert_relative_eq!(s.max.y, 50.5);
        assert_relative_eq!(s.width(), 100.5);
    }

    #[test]
    fn snap_is_idempotent_on_aligned_boxes() {
        let bb = Aabb::from_origin_size(-0.5, 0.0, 100.0, 50.0);
        assert_eq!(bb.snapped_to_half(), bb);
    }

    #[test]
    fn contains_and_expand() {
        let bb = Aabb::from_origin_size(0.0, 0.0, 10.0, 10.0).expanded(1.0);
        assert!(bb.contains(&Point2::new(-1.0, 11.0)));
        assert!(!bb.contains(&Point2::new(-1.5, 5.0)));
    }
}
