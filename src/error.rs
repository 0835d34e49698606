use thiserror::Error;

use crate::geometry::CellKey;

/// Top-level error type for the grid renderer.
#[derive(Debug, Error)]
pub enum GridError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Errors related to outline computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate polygon: {0}")]
    DegeneratePolygon(String),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Errors raised by the scene synchronizer.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("no drawables registered for cell {0}")]
    RegistryLookupMiss(CellKey),

    #[error("invalid viewport: content {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("drawable not found: {0}")]
    DrawableNotFound(&'static str),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("scene has not been built")]
    NotBuilt,
}

impl GridError {
    /// Returns `true` for a zero-length edge or a polygon with too few vertices.
    #[must_use]
    pub fn is_degenerate_polygon(&self) -> bool {
        matches!(self, Self::Geometry(GeometryError::DegeneratePolygon(_)))
    }

    /// Returns `true` when an update pass referenced an unknown cell.
    #[must_use]
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, Self::Scene(SceneError::RegistryLookupMiss(_)))
    }

    /// Returns `true` when a resize was rejected.
    #[must_use]
    pub fn is_invalid_viewport(&self) -> bool {
        matches!(self, Self::Scene(SceneError::InvalidViewport { .. }))
    }
}

/// Convenience type alias for results using [`GridError`].
pub type Result<T> = std::result::Result<T, GridError>;
