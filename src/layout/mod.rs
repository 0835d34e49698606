mod corner_marks;
mod text;

pub use corner_marks::{CornerMarkLayout, MarkSlot, MAX_CORNER_MARKS};
pub use text::{ApproximateMetrics, TextMeasure, TextSize};
