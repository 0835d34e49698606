use std::fmt;
use std::str::FromStr;

use crate::error::{GridError, Result, SceneError};

/// A 24-bit RGB colour, stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Self = Self(0x00ff_ffff);
    pub const BLACK: Self = Self(0);

    #[must_use]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self((u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b))
    }

    #[must_use]
    pub fn r(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    #[must_use]
    pub fn g(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    #[must_use]
    pub fn b(self) -> u8 {
        self.0.to_be_bytes()[3]
    }

    /// Returns `true` when all three channels are equal.
    #[must_use]
    pub fn is_grey(self) -> bool {
        self.r() == self.g() && self.g() == self.b()
    }

    /// Parses `#rgb` or `#rrggbb` (the `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns `SceneError::InvalidColor` for anything else.
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s.trim().trim_start_matches('#');
        let invalid = || GridError::from(SceneError::InvalidColor(s.to_owned()));
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_owned(),
            _ => return Err(invalid()),
        };
        u32::from_str_radix(&expanded, 16)
            .map(Self)
            .map_err(|_| invalid())
    }
}

impl FromStr for Rgb {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0x00ff_ffff)
    }
}
