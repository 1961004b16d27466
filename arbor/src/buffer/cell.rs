use crate::types::Rgb;

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgb,
    pub bg: Rgb,
    /// Rendered with reduced intensity; set on text of disabled rows.
    pub dim: bool,
    /// Set on the trailing cell of a double-width character.
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(' ')
    }
}

impl Cell {
    pub const fn new(char: char) -> Self {
        Self {
            char,
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            dim: false,
            wide_continuation: false,
        }
    }

    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    pub const fn with_dim(mut self, dim: bool) -> Self {
        self.dim = dim;
        self
    }
}
