use crate::math::{Point2, TOLERANCE};

/// Pulls both ends of an open polyline inward along its first and last
/// segments, compensating for round caps that overhang the end points.
#[derive(Debug)]
pub struct ShortenLine<'a> {
    points: &'a [Point2],
    amount: f64,
}

impl<'a> ShortenLine<'a> {
    #[must_use]
    pub fn new(points: &'a [Point2], amount: f64) -> Self {
        Self { points, amount }
    }

    /// Returns the shortened polyline. Lines with fewer than two points, and
    /// ends whose segment has zero length, are returned unchanged.
    #[must_use]
    pub fn execute(&self) -> Vec<Point2> {
        let mut result = self.points.to_vec();
        let n = result.len();
        if n < 2 {
            return result;
        }

        let first = self.points[0];
        let second = self.points[1];
        result[0] = pull_toward(first, second, self.amount);

        let last = self.points[n - 1];
        let before_last = self.points[n - 2];
        result[n - 1] = pull_toward(last, before_last, self.amount);

        result
    }
}

fn pull_toward(from: Point2, toward: Point2, amount: f64) -> Point2 {
    let d = toward - from;
    let len = d.norm();
    if len < TOLERANCE {
        return from;
    }
    from + d / len * amount
}
