use std::collections::{BTreeMap, BTreeSet};

use crate::geometry::CellKey;

/// A definitive value in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digit {
    pub value: char,
    /// Part of the puzzle definition rather than entered by the solver.
    pub given: bool,
}

/// Solver-facing state the scene reflects. Owned by the host; the scene only
/// keeps the last applied copy to diff against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    pub selection: BTreeSet<CellKey>,
    pub digits: BTreeMap<CellKey, Digit>,
    pub corner_marks: BTreeMap<CellKey, BTreeSet<char>>,
    pub centre_marks: BTreeMap<CellKey, BTreeSet<char>>,
    /// 1-based palette index per cell.
    pub colors: BTreeMap<CellKey, usize>,
    pub errors: BTreeSet<CellKey>,
}

/// Which incremental update passes ran (or need to run).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdatePasses {
    pub selection: bool,
    /// Digits, corner marks and centre marks together.
    pub marks: bool,
    pub colors: bool,
    pub errors: bool,
}

impl UpdatePasses {
    /// Passes needed to go from `old` to `new`.
    #[must_use]
    pub fn between(old: &InteractionState, new: &InteractionState) -> Self {
        Self {
            selection: old.selection != new.selection,
            marks: old.digits != new.digits
                || old.corner_marks != new.corner_marks
                || old.centre_marks != new.centre_marks,
            colors: old.colors != new.colors,
            errors: old.errors != new.errors,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.selection || self.marks || self.colors || self.errors)
    }
}
