use super::color::Rgb;

/// Rendering parameters for the scene. All lengths are in scene units
/// (pixels before the viewport scale is applied).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneParams {
    /// Multiplies the puzzle's nominal cell size.
    pub scale_factor: f64,
    pub cell_stroke: f64,
    pub region_stroke: f64,
    pub cage_stroke: f64,
    /// Distance a cage outline is drawn inside its cells.
    pub cage_inset: f64,
    /// Extra inset for cage edges lying on a region border.
    pub cage_dispose: f64,
    pub cage_dash: f64,
    pub cage_gap: f64,
    pub overlay_stroke: f64,
    pub digit_font: f64,
    pub corner_mark_font: f64,
    pub centre_mark_font: f64,
    pub cage_label_font: f64,
    /// Overlay font size when the descriptor has none.
    pub overlay_font: f64,
    /// Marks and cage labels are laid out at a larger size and drawn scaled
    /// down by these factors for crisper text.
    pub mark_scale: f64,
    pub cage_label_scale: f64,
    pub overlay_text_scale: f64,
    /// How far round-capped lines are pulled back at each end.
    pub line_shorten: f64,
    /// Arrow-head size per unit of `head_length * cell_size`.
    pub arrow_head_factor: f64,
    pub selection_color: Rgb,
    pub selection_alpha: f64,
    pub error_color: Rgb,
    pub error_alpha: f64,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            scale_factor: 1.2,
            cell_stroke: 1.0,
            region_stroke: 3.0,
            cage_stroke: 1.0,
            cage_inset: 3.0,
            cage_dispose: 1.0,
            cage_dash: 3.0,
            cage_gap: 2.0,
            overlay_stroke: 2.0,
            digit_font: 40.0,
            corner_mark_font: 28.0,
            centre_mark_font: 29.0,
            cage_label_font: 26.0,
            overlay_font: 20.0,
            mark_scale: 0.5,
            cage_label_scale: 0.5,
            overlay_text_scale: 0.75,
            line_shorten: 3.0,
            arrow_head_factor: 0.7,
            selection_color: Rgb(0x00ff_de2a),
            selection_alpha: 0.5,
            error_color: Rgb(0x00b3_3a3a),
            error_alpha: 0.5,
        }
    }
}

impl SceneParams {
    /// Default parameters with mark font sizes tuned for the display density.
    #[must_use]
    pub fn for_device_pixel_ratio(dpr: f64) -> Self {
        let mut params = Self::default();
        if dpr >= 2.0 {
            params.corner_mark_font = 27.0;
            params.centre_mark_font = 28.0;
        }
        params
    }
}

/// Backing-store resolution for a display with the given pixel ratio.
#[must_use]
pub fn render_resolution(dpr: f64) -> f64 {
    #[allow(clippy::float_cmp)]
    let cap = if dpr == 2.0 { 3.0 } else { 2.5 };
    dpr.min(cap)
}
