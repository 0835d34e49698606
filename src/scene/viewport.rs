use tracing::debug;

use crate::error::SceneError;
use crate::math::{Point2, Vector2};
use crate::operations::query::Aabb;

/// Primary layout direction of the host page. The extra margin that keeps the
/// grid centred is added across the primary direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Controls stacked below the grid; the grid is centred horizontally.
    Portrait,
    /// Controls beside the grid; the grid is centred vertically.
    #[default]
    Landscape,
}

/// Available display area for the rendered content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeRequest {
    pub max_width: f64,
    pub max_height: f64,
    pub orientation: Orientation,
}

impl ResizeRequest {
    #[must_use]
    pub fn new(max_width: f64, max_height: f64, orientation: Orientation) -> Self {
        Self {
            max_width,
            max_height,
            orientation,
        }
    }

    /// A request that never scales the content down.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::new(f64::INFINITY, f64::INFINITY, Orientation::default())
    }
}

/// Extra output margins, already scaled, that mirror the content's chrome on
/// the opposite side of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// The root transform and output surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Uniform scale, never above 1.
    pub scale: f64,
    /// Content bounds in scene units, snapped outward to half units.
    pub content: Aabb,
    pub output_width: f64,
    pub output_height: f64,
    /// Maps scene points to output points after scaling.
    pub translation: Vector2,
    pub margins: Margins,
}

impl Viewport {
    /// Maps a scene point to the output surface.
    #[must_use]
    pub fn to_output(&self, p: Point2) -> Point2 {
        p * self.scale + self.translation
    }

    /// Maps an output point back to the scene.
    #[must_use]
    pub fn to_scene(&self, p: Point2) -> Point2 {
        (p - self.translation) / self.scale
    }
}

/// Fits `content` into the requested area.
///
/// The chrome around the grid (content outside `grid`) is measured on both
/// sides of the axis across the primary direction; the difference is added to
/// the short side so the grid itself stays centred.
///
/// # Errors
///
/// Returns `SceneError::InvalidViewport` when the available area or the
/// content has a non-positive width or height.
pub fn fit_viewport(
    grid: &Aabb,
    content: &Aabb,
    request: &ResizeRequest,
) -> Result<Viewport, SceneError> {
    if !(request.max_width > 0.0 && request.max_height > 0.0) {
        return Err(SceneError::InvalidViewport {
            width: request.max_width,
            height: request.max_height,
        });
    }
    let content = content.snapped_to_half();
    let (w, h) = (content.width(), content.height());
    if !(w > 0.0 && h > 0.0) {
        return Err(SceneError::InvalidViewport {
            width: w,
            height: h,
        });
    }

    let top = grid.min.y - content.min.y;
    let bottom = content.max.y - grid.max.y;
    let left = grid.min.x - content.min.x;
    let right = content.max.x - grid.max.x;
    let (extra_x, extra_y) = match request.orientation {
        Orientation::Portrait => ((left - right).abs(), 0.0),
        Orientation::Landscape => (0.0, (top - bottom).abs()),
    };

    let scale = (request.max_width / (w + extra_x))
        .min(request.max_height / (h + extra_y))
        .min(1.0);

    let mut margins = Margins::default();
    if top > bottom {
        margins.bottom = extra_y * scale;
    } else {
        margins.top = extra_y * scale;
    }
    if left > right {
        margins.right = extra_x * scale;
    } else {
        margins.left = extra_x * scale;
    }

    let viewport = Viewport {
        scale,
        content,
        output_width: w * scale,
        output_height: h * scale,
        translation: -content.min.coords * scale,
        margins,
    };
    debug!(
        scale,
        width = viewport.output_width,
        height = viewport.output_height,
        "viewport fitted"
    );
    Ok(viewport)
}
