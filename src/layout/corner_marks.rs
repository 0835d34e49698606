use crate::math::{Point2, Vector2};

/// Number of corner-mark slots in a cell.
pub const MAX_CORNER_MARKS: usize = 10;

/// Horizontal slot spacing as a fraction of the cell size (`cell / 3.2`).
const SPREAD_X: f64 = 3.2;

/// Vertical slot spacing as a fraction of the cell size (`cell / 3.4`).
const SPREAD_Y: f64 = 3.4;

/// Slot offsets in units of the horizontal and vertical spacing.
///
/// 0 top-left, 1 top-right, 2 bottom-left, 3 bottom-right, 4 top-centre,
/// 5 bottom-centre, 6 middle-left, 7 middle-right, 8 and 9 the bottom thirds.
const SLOTS: [(f64, f64); MAX_CORNER_MARKS] = [
    (-1.0, -1.0),
    (1.0, -1.0),
    (-1.0, 1.0),
    (1.0, 1.0),
    (0.0, -1.0),
    (0.0, 1.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0 / 3.0, 1.0),
    (1.0 / 3.0, 1.0),
];

/// Slots 0 and 4 when the top-left corner is taken by a cage label.
const ROOMY_SLOTS: [(usize, (f64, f64)); 2] = [(0, (-1.0 / 3.0, -1.0)), (4, (1.0 / 3.0, -1.0))];

/// A resolved position for one corner mark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkSlot {
    /// Centre of the glyph in scene units.
    pub position: Point2,
    pub font_size: f64,
}

/// Fixed placement of small candidate digits inside a cell.
#[derive(Debug, Clone, Copy)]
pub struct CornerMarkLayout {
    anchor: Point2,
    cell_size: f64,
    font_size: f64,
    leave_room: bool,
}

impl CornerMarkLayout {
    /// Creates a layout for the cell whose top-left corner is at `anchor`.
    ///
    /// With `leave_room` set, the two top-row slots shift right to clear the
    /// cage label in the top-left corner.
    #[must_use]
    pub fn new(anchor: Point2, cell_size: f64, font_size: f64, leave_room: bool) -> Self {
        Self {
            anchor,
            cell_size,
            font_size,
            leave_room,
        }
    }

    /// Returns the slot at table index `slot`, or `None` past
    /// [`MAX_CORNER_MARKS`].
    #[must_use]
    pub fn slot(&self, slot: usize) -> Option<MarkSlot> {
        SLOTS.get(slot).map(|&offset| self.place(slot, offset))
    }

    /// Returns every slot in table order.
    #[must_use]
    pub fn all_slots(&self) -> [MarkSlot; MAX_CORNER_MARKS] {
        std::array::from_fn(|i| self.place(i, SLOTS[i]))
    }

    /// Returns the first `count` slots in table order, capped at
    /// [`MAX_CORNER_MARKS`].
    #[must_use]
    pub fn slots(&self, count: usize) -> Vec<MarkSlot> {
        self.all_slots().into_iter().take(count).collect()
    }

    /// Maps the `index`-th mark of a sorted collection of `count` marks to a
    /// table slot. Above eight marks, indices past 4 skip the bottom-centre
    /// slot so the bottom row uses the thirds instead.
    #[must_use]
    pub fn slot_for_mark(index: usize, count: usize) -> usize {
        if count > 8 && index > 4 {
            index + 1
        } else {
            index
        }
    }

    fn place(&self, slot: usize, offset: (f64, f64)) -> MarkSlot {
        let (fx, fy) = if self.leave_room {
            ROOMY_SLOTS
                .iter()
                .find(|(i, _)| *i == slot)
                .map_or(offset, |(_, o)| *o)
        } else {
            offset
        };
        let spread = Vector2::new(self.cell_size / SPREAD_X, self.cell_size / SPREAD_Y);
        let centre = self.centre();
        MarkSlot {
            position: Point2::new(centre.x + fx * spread.x, centre.y + fy * spread.y),
            font_size: self.font_size,
        }
    }

    /// Centre of the cell, nudged up half a unit for text baseline balance.
    fn centre(&self) -> Point2 {
        Point2::new(
            self.anchor.x + self.cell_size / 2.0,
            self.anchor.y + self.cell_size / 2.0 - 0.5,
        )
    }
}
