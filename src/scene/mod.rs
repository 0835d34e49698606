pub mod build;
pub mod color;
pub mod drawable;
pub mod frame;
pub mod model;
pub mod params;
pub mod state;
pub mod store;
pub mod theme;
mod update;
pub mod viewport;

use std::fmt;

use tracing::{debug, error, warn};

use crate::error::{Result, SceneError};
use crate::geometry::CellKey;
use crate::layout::{ApproximateMetrics, TextMeasure};
use crate::math::Point2;
use crate::operations::query::Aabb;

pub use build::{BuildScene, BuiltScene, CellHandles};
pub use color::Rgb;
pub use drawable::{
    Drawable, DrawableId, Fill, Owner, Primitive, Shape, Stroke, Text, TextAnchor, ZOrder,
};
pub use frame::Frame;
pub use hit_test::{CellTransform, PointerHit};
pub use model::{Arrow, Cage, CellData, Line, OverlayShape, PuzzleModel};
pub use params::{render_resolution, SceneParams};
pub use state::{Digit, InteractionState, UpdatePasses};
pub use store::DrawableStore;
pub use theme::Theme;
pub use viewport::{fit_viewport, Margins, Orientation, ResizeRequest, Viewport};

/// Counters for the passes a scene has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub builds: usize,
    pub frames: usize,
    pub fits: usize,
}

/// Turns a puzzle model into a persistent set of drawables and keeps it in
/// step with the interaction state.
///
/// A model change runs the build pass, which replaces every drawable. State
/// changes run only the update passes whose category changed and mutate the
/// existing drawables in place. A resize only refits the root transform.
pub struct Scene {
    params: SceneParams,
    theme: Theme,
    measure: Box<dyn TextMeasure>,
    built: Option<BuiltScene>,
    applied: InteractionState,
    viewport: Option<Viewport>,
    /// Most recent resize, kept to refit after a rebuild.
    last_request: Option<ResizeRequest>,
    /// Resize waiting for the next frame; later requests replace it.
    pending_request: Option<ResizeRequest>,
    stats: SceneStats,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("params", &self.params)
            .field("built", &self.built.is_some())
            .field("viewport", &self.viewport)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneParams::default())
    }
}

impl Scene {
    /// Creates an empty scene that measures text with [`ApproximateMetrics`].
    #[must_use]
    pub fn new(params: SceneParams) -> Self {
        Self {
            params,
            theme: Theme::default(),
            measure: Box::new(ApproximateMetrics::default()),
            built: None,
            applied: InteractionState::default(),
            viewport: None,
            last_request: None,
            pending_request: None,
            stats: SceneStats::default(),
        }
    }

    /// Replaces the text measurer used by later builds.
    #[must_use]
    pub fn with_text_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    /// Runs the build pass for a new model version or theme.
    ///
    /// The new scene replaces the old one only when the whole build succeeds.
    /// Afterwards no state is applied; call [`Scene::sync`] to restore it.
    ///
    /// # Errors
    ///
    /// Returns the build error; the previous scene stays in place.
    pub fn build(&mut self, model: &PuzzleModel, theme: &Theme) -> Result<()> {
        let built = BuildScene::new(model, theme, &self.params, self.measure.as_ref())
            .execute()
            .inspect_err(|err| error!(%err, "build failed, keeping the previous scene"))?;
        self.built = Some(built);
        self.theme = theme.clone();
        self.applied = InteractionState::default();
        self.viewport = None;
        self.pending_request = self.last_request;
        self.stats.builds += 1;
        Ok(())
    }

    /// Brings the drawables in line with `state`, running only the passes
    /// whose category changed since the last successful sync.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::NotBuilt` before the first build and
    /// `SceneError::RegistryLookupMiss` when `state` names an unknown cell.
    /// Nothing is changed on error.
    pub fn sync(&mut self, state: &InteractionState) -> Result<UpdatePasses> {
        let built = self.built.as_mut().ok_or(SceneError::NotBuilt)?;
        let passes = UpdatePasses::between(&self.applied, state);
        built.validate_state(state, passes)?;

        if passes.selection {
            built.update_selection(&state.selection)?;
        }
        if passes.marks {
            built.update_marks(state, &self.theme)?;
        }
        if passes.colors {
            built.update_colors(&state.colors, &self.theme)?;
        }
        if passes.errors {
            built.update_errors(&state.errors)?;
        }
        debug!(?passes, "state synced");
        self.applied = state.clone();
        Ok(passes)
    }

    /// Hides every selection swatch, as after a click on the background.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::NotBuilt` before the first build.
    pub fn clear_selection(&mut self) -> Result<()> {
        let built = self.built.as_mut().ok_or(SceneError::NotBuilt)?;
        self.applied.selection.clear();
        built.update_selection(&self.applied.selection)?;
        Ok(())
    }

    /// Replaces the colour palette and reruns the colour pass.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::NotBuilt` before the first build.
    pub fn set_palette(&mut self, palette: Vec<Rgb>) -> Result<()> {
        let built = self.built.as_mut().ok_or(SceneError::NotBuilt)?;
        self.theme.palette = palette;
        built.update_colors(&self.applied.colors, &self.theme)?;
        Ok(())
    }

    /// Records a resize. Only the latest request before the next
    /// [`Scene::render`] is applied.
    pub fn request_resize(&mut self, request: ResizeRequest) {
        self.pending_request = Some(request);
        self.last_request = Some(request);
    }

    /// Applies a resize immediately.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::NotBuilt` before the first build and
    /// `SceneError::InvalidViewport` for an empty area or empty content; the
    /// previous viewport is kept.
    pub fn fit(&mut self, request: ResizeRequest) -> Result<Viewport> {
        let built = self.built.as_ref().ok_or(SceneError::NotBuilt)?;
        let viewport = fit_viewport(&built.grid_bounds, &built.content_bounds, &request)?;
        self.viewport = Some(viewport);
        self.last_request = Some(request);
        self.pending_request = None;
        self.stats.fits += 1;
        Ok(viewport)
    }

    /// Applies any pending resize and presents a frame.
    ///
    /// An invalid pending resize is skipped with a warning and the previous
    /// viewport is kept.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::NotBuilt` before the first build and
    /// `SceneError::InvalidViewport` when no viewport can be fitted at all.
    pub fn render(&mut self) -> Result<Frame> {
        let built = self.built.as_ref().ok_or(SceneError::NotBuilt)?;
        if let Some(request) = self.pending_request.take() {
            match fit_viewport(&built.grid_bounds, &built.content_bounds, &request) {
                Ok(viewport) => {
                    self.viewport = Some(viewport);
                    self.stats.fits += 1;
                }
                Err(err) => warn!(%err, "resize skipped, keeping the previous viewport"),
            }
        }
        let viewport = match self.viewport {
            Some(viewport) => viewport,
            None => {
                let viewport = fit_viewport(
                    &built.grid_bounds,
                    &built.content_bounds,
                    &ResizeRequest::unbounded(),
                )?;
                self.viewport = Some(viewport);
                self.stats.fits += 1;
                viewport
            }
        };
        self.stats.frames += 1;
        Ok(Frame::capture(&built.store, &viewport))
    }

    /// Maps a point on the output surface to what lies under it.
    #[must_use]
    pub fn hit_test(&self, output_point: Point2) -> PointerHit {
        let (Some(built), Some(viewport)) = (&self.built, &self.viewport) else {
            return PointerHit::Outside;
        };
        let p = viewport.to_scene(output_point);
        if let Some(key) = built.cell_transform().cell_at(p) {
            if built.cells.contains_key(&key) {
                return PointerHit::Cell(key);
            }
        }
        if built.content_bounds.contains(&p) {
            PointerHit::Background
        } else {
            PointerHit::Outside
        }
    }

    /// Cell transform in output coordinates, for host-side pointer handling.
    #[must_use]
    pub fn cell_transform(&self) -> Option<CellTransform> {
        let built = self.built.as_ref()?;
        let viewport = self.viewport.as_ref()?;
        Some(CellTransform::new(built.cell_size * viewport.scale, viewport.translation))
    }

    #[must_use]
    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    #[must_use]
    pub fn content_bounds(&self) -> Option<Aabb> {
        self.built.as_ref().map(|b| b.content_bounds)
    }

    #[must_use]
    pub fn grid_bounds(&self) -> Option<Aabb> {
        self.built.as_ref().map(|b| b.grid_bounds)
    }

    /// Registry entry of one cell.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::NotBuilt` before the first build and
    /// `SceneError::RegistryLookupMiss` for an unknown cell.
    pub fn cell_handles(&self, key: CellKey) -> Result<&CellHandles> {
        let built = self.built.as_ref().ok_or(SceneError::NotBuilt)?;
        Ok(built
            .cells
            .get(&key)
            .ok_or(SceneError::RegistryLookupMiss(key))?)
    }

    /// Looks up a drawable of the current build.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::NotBuilt` before the first build and
    /// `SceneError::DrawableNotFound` for an id from another build.
    pub fn drawable(&self, id: DrawableId) -> Result<&Drawable> {
        let built = self.built.as_ref().ok_or(SceneError::NotBuilt)?;
        Ok(built.store.get(id)?)
    }

    /// The state applied by the last successful sync.
    #[must_use]
    pub fn applied_state(&self) -> &InteractionState {
        &self.applied
    }

    #[must_use]
    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    #[must_use]
    pub fn stats(&self) -> SceneStats {
        self.stats
    }
}
