/// Requested size along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
    /// Exactly this many cells, capped by the container.
    Fixed(u16),
    /// Grow to fill whatever the container offers.
    #[default]
    Fill,
}

impl Size {
    /// Cells granted out of `available`.
    pub const fn resolve(self, available: u16) -> u16 {
        match self {
            Self::Fixed(cells) if cells < available => cells,
            Self::Fixed(_) | Self::Fill => available,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Border {
    #[default]
    None,
    Single,
    Rounded,
    Thick,
}

impl Border {
    /// Picks the glyph set for a stroked rectangle of the given width/radius.
    pub const fn for_stroke(width: u16, radius: u16) -> Self {
        match (width, radius) {
            (0, _) => Self::None,
            (1, 0) => Self::Single,
            (1, _) => Self::Rounded,
            _ => Self::Thick,
        }
    }

    /// `(top_left, top_right, bottom_left, bottom_right, horizontal, vertical)`
    pub const fn glyphs(self) -> Option<(char, char, char, char, char, char)> {
        match self {
            Self::None => None,
            Self::Single => Some(('┌', '┐', '└', '┘', '─', '│')),
            Self::Rounded => Some(('╭', '╮', '╰', '╯', '─', '│')),
            Self::Thick => Some(('┏', '┓', '┗', '┛', '━', '┃')),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_resolves_against_available_space() {
        assert_eq!(Size::Fill.resolve(30), 30);
        assert_eq!(Size::Fixed(10).resolve(30), 10);
        assert_eq!(Size::Fixed(40).resolve(30), 30);
    }

    #[test]
    fn stroke_picks_border_glyphs() {
        assert_eq!(Border::for_stroke(0, 3), Border::None);
        assert_eq!(Border::for_stroke(1, 0), Border::Single);
        assert_eq!(Border::for_stroke(1, 2), Border::Rounded);
        assert_eq!(Border::for_stroke(2, 0), Border::Thick);
        assert!(Border::None.glyphs().is_none());
    }
}
