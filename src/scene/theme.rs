use super::color::Rgb;

/// Concrete colours resolved by the host application.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Rgb,
    /// Borders, given digits and given marks.
    pub foreground: Rgb,
    /// Digits and marks entered by the solver.
    pub digit: Rgb,
    /// Cell colour palette; cell colours index it from 1.
    pub palette: Vec<Rgb>,
}

impl Theme {
    /// Resolves a 1-based palette index. Indices outside the palette fall back
    /// to the second entry; `None` when the palette is too short for that.
    #[must_use]
    pub fn palette_color(&self, index: usize) -> Option<Rgb> {
        index
            .checked_sub(1)
            .and_then(|i| self.palette.get(i))
            .or_else(|| self.palette.get(1))
            .copied()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgb::WHITE,
            foreground: Rgb::BLACK,
            digit: Rgb(0x001d_6ae5),
            palette: vec![
                Rgb(0x00b0_b0b0),
                Rgb(0x0050_5050),
                Rgb::WHITE,
                Rgb(0x00ff_a0a0),
                Rgb(0x00ff_df61),
                Rgb(0x00b0_ffb0),
                Rgb(0x0060_d060),
                Rgb(0x00c0_c0ff),
                Rgb(0x00ff_b0ff),
            ],
        }
    }
}
