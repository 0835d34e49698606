use crate::error::{GeometryError, Result};

/// How the ends of an open stroke are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    /// Round caps (and joins); they overhang the end points by half the width.
    Round,
}

/// Style parameters for a stroked path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    width: f64,
    cap: LineCap,
}

impl StrokeStyle {
    /// Creates a new stroke style with butt caps.
    ///
    /// # Errors
    ///
    /// Returns an error if `width` is not positive.
    pub fn new(width: f64) -> Result<Self> {
        if width <= 0.0 || !width.is_finite() {
            return Err(GeometryError::InvalidParameters(format!(
                "stroke width must be positive, got {width}"
            ))
            .into());
        }
        Ok(Self {
            width,
            cap: LineCap::Butt,
        })
    }

    /// Returns a copy using the given cap.
    #[must_use]
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Returns the stroke width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns half the stroke width.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width * 0.5
    }

    #[must_use]
    pub fn cap(&self) -> LineCap {
        self.cap
    }
}

/// Alternating draw/skip lengths of a dashed stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    dash: f64,
    gap: f64,
}

impl DashPattern {
    /// Creates a new dash pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if either length is not positive.
    pub fn new(dash: f64, gap: f64) -> Result<Self> {
        if dash <= 0.0 || gap <= 0.0 || !dash.is_finite() || !gap.is_finite() {
            return Err(GeometryError::InvalidParameters(format!(
                "dash and gap must be positive, got {dash}/{gap}"
            ))
            .into());
        }
        Ok(Self { dash, gap })
    }

    #[must_use]
    pub fn dash(&self) -> f64 {
        self.dash
    }

    #[must_use]
    pub fn gap(&self) -> f64 {
        self.gap
    }
}
