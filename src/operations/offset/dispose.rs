use crate::error::Result;
use crate::geometry::Ring;
use crate::math::polygon_2d::{left_normal, segment_direction};
use crate::math::{approx_eq, Point2, TOLERANCE};

/// Identifies the reference edge that displaced an edge of the input ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeMatch {
    /// Index into the reference ring list.
    pub reference: usize,
    /// Edge index within that reference ring.
    pub edge: usize,
}

/// Result of [`DisposePolygon`]: the adjusted ring plus, per input edge, the
/// reference edge that caused the displacement (if any).
#[derive(Debug, Clone, PartialEq)]
pub struct Disposal {
    pub ring: Ring,
    pub matches: Vec<Option<EdgeMatch>>,
}

/// Pushes the edges of a ring that lie on a reference edge further inside the
/// ring by `distance`, so the two borders are never drawn on top of each other.
///
/// Edges are compared as axis-aligned segments. An edge coincides with a
/// reference edge when both lie on the same vertical (or horizontal) line and
/// at least one endpoint of the edge falls within the reference edge's span.
/// References are searched in the given order and the first hit wins.
#[derive(Debug)]
pub struct DisposePolygon<'a> {
    ring: &'a Ring,
    references: &'a [Ring],
    distance: f64,
}

impl<'a> DisposePolygon<'a> {
    /// Creates a new disposal operation.
    #[must_use]
    pub fn new(ring: &'a Ring, references: &'a [Ring], distance: f64) -> Self {
        Self {
            ring,
            references,
            distance,
        }
    }

    /// Executes the disposal. The vertex count is preserved.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegeneratePolygon` if the ring has fewer than
    /// 3 vertices or a zero-length edge.
    pub fn execute(&self) -> Result<Disposal> {
        self.ring.validate()?;

        let points = &self.ring.points;
        let n = points.len();
        let mut result = points.clone();
        let mut matches = Vec::with_capacity(n);

        for i in 0..n {
            let p1 = points[i];
            let p2 = points[(i + 1) % n];
            let found = self.first_match(p1, p2);

            if found.is_some() {
                let push = left_normal(segment_direction(&p1, &p2)?) * self.distance;
                let j = (i + 1) % n;
                if approx_eq(p1.x, p2.x) {
                    result[i].x = p1.x + push.x;
                    result[j].x = p2.x + push.x;
                } else {
                    result[i].y = p1.y + push.y;
                    result[j].y = p2.y + push.y;
                }
            }
            matches.push(found);
        }

        Ok(Disposal {
            ring: Ring { points: result },
            matches,
        })
    }

    /// Returns the first reference edge, in caller order, that the edge
    /// `p1 -> p2` lies on.
    fn first_match(&self, p1: Point2, p2: Point2) -> Option<EdgeMatch> {
        for (reference, other) in self.references.iter().enumerate() {
            for (edge, (o1, o2)) in other.edges().enumerate() {
                if coincides(p1, p2, o1, o2) {
                    return Some(EdgeMatch { reference, edge });
                }
            }
        }
        None
    }
}

fn coincides(p1: Point2, p2: Point2, o1: Point2, o2: Point2) -> bool {
    let (min_x, max_x) = (o1.x.min(o2.x), o1.x.max(o2.x));
    let (min_y, max_y) = (o1.y.min(o2.y), o1.y.max(o2.y));
    let within = |v: f64, lo: f64, hi: f64| v >= lo - TOLERANCE && v <= hi + TOLERANCE;

    let vertical = approx_eq(min_x, max_x) && approx_eq(p1.x, min_x) && approx_eq(p2.x, max_x);
    if vertical && (within(p1.y, min_y, max_y) || within(p2.y, min_y, max_y)) {
        return true;
    }

    let horizontal = approx_eq(min_y, max_y) && approx_eq(p1.y, min_y) && approx_eq(p2.y, max_y);
    horizontal && (within(p1.x, min_x, max_x) || within(p2.x, min_x, max_x))
}
