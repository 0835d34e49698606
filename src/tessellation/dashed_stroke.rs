use crate::error::Result;
use crate::geometry::Ring;
use crate::math::polygon_2d::segment_direction;
use crate::math::{Point2, TOLERANCE};

use super::{DashPattern, PathSink};

/// Where the walk currently is within the dash pattern.
#[derive(Debug, Clone, Copy)]
enum Phase {
    /// Drawing; `dash_left` units remain before the next gap.
    Dash { dash_left: f64 },
    /// Skipping; `gap_left` units remain before the next dash.
    Gap { gap_left: f64 },
}

/// Walks a closed ring and emits a dashed outline into a [`PathSink`].
///
/// The unfinished part of a dash or gap carries over to the next edge, so the
/// pattern runs continuously around corners. A dash that turns a corner stays
/// one connected sub-path. The pattern starts with a full dash at the first
/// vertex.
#[derive(Debug)]
pub struct DashedStroke<'a> {
    ring: &'a Ring,
    pattern: DashPattern,
}

impl<'a> DashedStroke<'a> {
    /// Creates a new dashed stroke operation.
    #[must_use]
    pub fn new(ring: &'a Ring, pattern: DashPattern) -> Self {
        Self { ring, pattern }
    }

    /// Emits the dashes of the whole ring into `sink`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegeneratePolygon` if the ring has fewer than
    /// 3 vertices or a zero-length edge. Nothing is emitted in that case.
    pub fn execute<S: PathSink>(&self, sink: &mut S) -> Result<()> {
        self.ring.validate()?;

        let mut phase = Phase::Dash {
            dash_left: self.pattern.dash(),
        };
        let mut pen: Option<Point2> = None;

        for (p1, p2) in self.ring.edges() {
            let dir = segment_direction(&p1, &p2)?;
            let len = (p2 - p1).norm();
            let mut progress = 0.0;

            while len - progress > TOLERANCE {
                match phase {
                    Phase::Dash { dash_left } => {
                        let step = dash_left.min(len - progress);
                        let start = p1 + dir * progress;
                        if pen.map_or(true, |p| (p - start).norm() > TOLERANCE) {
                            sink.move_to(start);
                        }
                        progress += step;
                        let end = p1 + dir * progress;
                        sink.line_to(end);
                        pen = Some(end);

                        let dash_left = dash_left - step;
                        phase = if dash_left > TOLERANCE {
                            Phase::Dash { dash_left }
                        } else {
                            Phase::Gap {
                                gap_left: self.pattern.gap(),
                            }
                        };
                    }
                    Phase::Gap { gap_left } => {
                        let step = gap_left.min(len - progress);
                        progress += step;
                        pen = None;

                        let gap_left = gap_left - step;
                        phase = if gap_left > TOLERANCE {
                            Phase::Gap { gap_left }
                        } else {
                            Phase::Dash {
                                dash_left: self.pattern.dash(),
                            }
                        };
                    }
                }
            }
        }

        Ok(())
    }
}
