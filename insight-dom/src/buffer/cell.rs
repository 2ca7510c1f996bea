use crate::types::{Rgb, TextStyle};

pub const DEFAULT_FG: Rgb = Rgb::new(220, 220, 220);
pub const DEFAULT_BG: Rgb = Rgb::new(16, 16, 20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
    /// Second column of a wide glyph; the terminal skips it when flushing.
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: DEFAULT_FG,
            bg: DEFAULT_BG,
            style: TextStyle::new(),
            wide_continuation: false,
        }
    }
}

impl Cell {
    pub fn new(char: char) -> Self {
        Self {
            char,
            ..Default::default()
        }
    }
}
