use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, error, warn};

use crate::error::SceneError;
use crate::geometry::CellKey;
use crate::layout::{CornerMarkLayout, MAX_CORNER_MARKS};

use super::build::{BuiltScene, CellHandles};
use super::color::Rgb;
use super::drawable::{DrawableId, Fill};
use super::state::{Digit, InteractionState, UpdatePasses};
use super::theme::Theme;

impl BuiltScene {
    /// Checks that every key has a registry entry.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::RegistryLookupMiss` for the first unknown key.
    pub fn validate_keys<'k>(
        &self,
        keys: impl IntoIterator<Item = &'k CellKey>,
    ) -> Result<(), SceneError> {
        match keys.into_iter().find(|key| !self.cells.contains_key(*key)) {
            Some(key) => {
                error!(cell = %key, "update references a cell that was never built");
                Err(SceneError::RegistryLookupMiss(*key))
            }
            None => Ok(()),
        }
    }

    /// Checks every key the given passes will read from `state`.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::RegistryLookupMiss` for the first unknown key.
    pub fn validate_state(
        &self,
        state: &InteractionState,
        passes: UpdatePasses,
    ) -> Result<(), SceneError> {
        if passes.selection {
            self.validate_keys(&state.selection)?;
        }
        if passes.marks {
            self.validate_keys(state.digits.keys())?;
            self.validate_keys(state.corner_marks.keys())?;
            self.validate_keys(state.centre_marks.keys())?;
        }
        if passes.colors {
            self.validate_keys(state.colors.keys())?;
        }
        if passes.errors {
            self.validate_keys(&state.errors)?;
        }
        Ok(())
    }

    /// Shows the selection swatch of selected cells and hides the rest.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::RegistryLookupMiss` if a selected cell is unknown;
    /// nothing is changed in that case.
    pub fn update_selection(&mut self, selection: &BTreeSet<CellKey>) -> Result<(), SceneError> {
        self.validate_keys(selection)?;
        debug!(selected = selection.len(), "selection pass");
        self.toggle_swatches(selection, |h| h.selection)
    }

    /// Shows the error swatch of the given cells and hides the rest.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::RegistryLookupMiss` if a cell is unknown; nothing
    /// is changed in that case.
    pub fn update_errors(&mut self, errors: &BTreeSet<CellKey>) -> Result<(), SceneError> {
        self.validate_keys(errors)?;
        debug!(errors = errors.len(), "error pass");
        self.toggle_swatches(errors, |h| h.error)
    }

    /// Refreshes digits, corner marks and centre marks. A digit hides the
    /// marks of its cell.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::RegistryLookupMiss` if any referenced cell is
    /// unknown; nothing is changed in that case.
    pub fn update_marks(
        &mut self,
        state: &InteractionState,
        theme: &Theme,
    ) -> Result<(), SceneError> {
        self.validate_state(
            state,
            UpdatePasses {
                marks: true,
                ..UpdatePasses::default()
            },
        )?;
        debug!(
            digits = state.digits.len(),
            corner = state.corner_marks.len(),
            centre = state.centre_marks.len(),
            "marks pass"
        );

        let Self { store, cells, .. } = self;
        for (key, handles) in cells.iter() {
            for &id in &handles.corner_marks {
                store.set_alpha(id, 0.0)?;
            }
            store.set_alpha(handles.centre_mark, 0.0)?;

            if let Some(digit) = state.digits.get(key) {
                let color = digit_color(*digit, theme);
                store.show_text(handles.digit, &digit.value.to_string(), color)?;
                continue;
            }
            store.set_alpha(handles.digit, 0.0)?;

            if let Some(marks) = state.corner_marks.get(key) {
                for (i, mark) in marks.iter().enumerate() {
                    let slot = CornerMarkLayout::slot_for_mark(i, marks.len());
                    if slot >= MAX_CORNER_MARKS {
                        debug!(cell = %key, mark = %mark, "no slot left for corner mark");
                        continue;
                    }
                    store.show_text(handles.corner_marks[slot], &mark.to_string(), theme.digit)?;
                }
            }
            if let Some(marks) = state.centre_marks.get(key).filter(|m| !m.is_empty()) {
                let text: String = marks.iter().collect();
                store.show_text(handles.centre_mark, &text, theme.digit)?;
            }
        }
        Ok(())
    }

    /// Fills the colour swatch of each coloured cell from the palette.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::RegistryLookupMiss` if a coloured cell is unknown;
    /// nothing is changed in that case.
    pub fn update_colors(
        &mut self,
        colors: &BTreeMap<CellKey, usize>,
        theme: &Theme,
    ) -> Result<(), SceneError> {
        self.validate_keys(colors.keys())?;
        debug!(colored = colors.len(), "colour pass");

        let Self { store, cells, .. } = self;
        for (key, handles) in cells.iter() {
            let resolved = colors.get(key).and_then(|&index| {
                if index == 0 || index > theme.palette.len() {
                    warn!(cell = %key, index, "colour index outside the palette");
                }
                theme.palette_color(index)
            });
            match resolved {
                Some(color) => {
                    store.set_fill(handles.color, Fill { color, alpha: 1.0 })?;
                    let alpha = if color == Rgb::WHITE { 1.0 } else { 0.5 };
                    store.set_alpha(handles.color, alpha)?;
                }
                None => store.set_alpha(handles.color, 0.0)?,
            }
        }
        Ok(())
    }

    fn toggle_swatches(
        &mut self,
        shown: &BTreeSet<CellKey>,
        pick: impl Fn(&CellHandles) -> DrawableId,
    ) -> Result<(), SceneError> {
        let Self { store, cells, .. } = self;
        for (key, handles) in cells.iter() {
            let alpha = if shown.contains(key) { 1.0 } else { 0.0 };
            store.set_alpha(pick(handles), alpha)?;
        }
        Ok(())
    }
}

fn digit_color(digit: Digit, theme: &Theme) -> Rgb {
    if digit.given {
        theme.foreground
    } else {
        theme.digit
    }
}
