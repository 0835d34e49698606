/// Width and height of a rendered string in scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

/// Measures text for layout. Hosts with a real font engine supply their own.
pub trait TextMeasure {
    /// Measures `text` drawn at `font_size`, before any scaling.
    fn measure(&self, text: &str, font_size: f64) -> TextSize;
}

/// Fixed-ratio estimate of a sans-serif face.
#[derive(Debug, Clone, Copy)]
pub struct ApproximateMetrics {
    /// Average advance per character as a fraction of the font size.
    pub advance: f64,
    /// Line height as a fraction of the font size.
    pub line_height: f64,
}

impl Default for ApproximateMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMeasure for ApproximateMetrics {
    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, text: &str, font_size: f64) -> TextSize {
        TextSize {
            width: text.chars().count() as f64 * font_size * self.advance,
            height: font_size * self.line_height,
        }
    }
}
