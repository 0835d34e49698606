use crate::error::Result;
use crate::geometry::Ring;
use crate::math::polygon_2d::{left_normal, segment_direction};
use crate::math::Point2;

/// Moves every vertex of a closed ring inward by a fixed distance.
///
/// Each vertex travels along the sum of the unit left normals of its two
/// incident edges. On a right-angle corner that is exactly the miter offset,
/// so axis-aligned edges end up `distance` away from where they started.
/// Reflex corners use the same construction: their normal sum points away
/// from the corner's exterior wedge, so inset notches keep their shape
/// instead of pinching.
///
/// # Sign Convention
///
/// - Positive distance: inward for rings with positive signed area
/// - Negative distance: outward
#[derive(Debug)]
pub struct ShrinkPolygon<'a> {
    ring: &'a Ring,
    distance: f64,
}

impl<'a> ShrinkPolygon<'a> {
    /// Creates a new shrink operation.
    #[must_use]
    pub fn new(ring: &'a Ring, distance: f64) -> Self {
        Self { ring, distance }
    }

    /// Executes the shrink, producing a ring with the same vertex count.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegeneratePolygon` if the ring has fewer than
    /// 3 vertices or a zero-length edge.
    pub fn execute(&self) -> Result<Ring> {
        self.ring.validate()?;

        let points = &self.ring.points;
        let n = points.len();
        let mut result = Vec::with_capacity(n);

        for i in 0..n {
            let prev = points[(i + n - 1) % n];
            let cur = points[i];
            let next = points[(i + 1) % n];

            let incoming = left_normal(segment_direction(&prev, &cur)?);
            let outgoing = left_normal(segment_direction(&cur, &next)?);
            let normal = incoming + outgoing;

            result.push(Point2::from(cur.coords + normal * self.distance));
        }

        Ok(Ring { points: result })
    }
}
