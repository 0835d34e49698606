use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Path, PathSink};

/// Builds the two barbs of an arrow head at the last point of a polyline.
///
/// Each barb starts at the tip and ends `length` back along the final segment
/// and `length` to one side, giving a right-angled head.
#[derive(Debug)]
pub struct ArrowHead<'a> {
    points: &'a [Point2],
    length: f64,
}

impl<'a> ArrowHead<'a> {
    #[must_use]
    pub fn new(points: &'a [Point2], length: f64) -> Self {
        Self { points, length }
    }

    /// Returns the head as a path, or `None` when the polyline has fewer than
    /// two points or ends in a zero-length segment.
    #[must_use]
    pub fn execute(&self) -> Option<Path> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }
        let tip = self.points[n - 1];
        let d = tip - self.points[n - 2];
        let len = d.norm();
        if len < TOLERANCE {
            return None;
        }
        let dir = d / len;
        let f = self.length;

        let base = tip - dir * f;
        let side = Vector2::new(-dir.y, dir.x) * f;

        let mut path = Path::new();
        path.move_to(tip);
        path.line_to(base + side);
        path.move_to(tip);
        path.line_to(base - side);
        Some(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tessellation::PathCommand::{LineTo, MoveTo};

    #[test]
    fn head_points_back_along_last_segment() {
        let pts = [Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)];
        let path = ArrowHead::new(&pts, 2.0).execute().unwrap();
        assert_eq!(path.commands[0], MoveTo(Point2::new(10.0, 0.0)));
        assert_eq!(path.commands[1], LineTo(Point2::new(8.0, 2.0)));
        assert_eq!(path.commands[3], LineTo(Point2::new(8.0, -2.0)));
    }

    #[test]
    fn short_lines_have_no_head() {
        let single = [Point2::new(0.0, 0.0)];
        assert!(ArrowHead::new(&single, 2.0).execute().is_none());
        let same = [Point2::new(1.0, 1.0), Point2::new(1.0, 1.0)];
        assert!(ArrowHead::new(&same, 2.0).execute().is_none());
    }
}
