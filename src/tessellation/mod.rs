mod arrow_head;
mod dashed_stroke;
mod shorten_line;
mod stroke_style;

pub use arrow_head::ArrowHead;
pub use dashed_stroke::DashedStroke;
pub use shorten_line::ShortenLine;
pub use stroke_style::{DashPattern, LineCap, StrokeStyle};

use crate::math::Point2;

/// Receives pen movements from the stroke generators.
pub trait PathSink {
    /// Lifts the pen and moves it to `p`.
    fn move_to(&mut self, p: Point2);

    /// Draws a straight segment from the current pen position to `p`.
    fn line_to(&mut self, p: Point2);
}

/// A single recorded pen command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point2),
    LineTo(Point2),
}

/// A recorded sequence of pen commands; the default [`PathSink`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub commands: Vec<PathCommand>,
}

impl Path {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an open polyline path through `points`.
    #[must_use]
    pub fn polyline(points: &[Point2]) -> Self {
        let mut path = Self::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
        }
        path
    }

    /// Sum of the lengths of all drawn segments.
    #[must_use]
    pub fn drawn_length(&self) -> f64 {
        let mut pen: Option<Point2> = None;
        let mut total = 0.0;
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => pen = Some(p),
                PathCommand::LineTo(p) => {
                    if let Some(from) = pen {
                        total += (p - from).norm();
                    }
                    pen = Some(p);
                }
            }
        }
        total
    }

    /// Every point the pen visits.
    pub fn points(&self) -> impl Iterator<Item = Point2> + '_ {
        self.commands.iter().map(|cmd| match *cmd {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl PathSink for Path {
    fn move_to(&mut self, p: Point2) {
        self.commands.push(PathCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point2) {
        self.commands.push(PathCommand::LineTo(p));
    }
}
