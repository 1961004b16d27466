use crate::types::Color;

/// Colors and metrics a widget pulls from its surroundings.
///
/// Metrics are in cells: a `border_width` of 0 hides the border, any
/// non-zero `border_radius` rounds the corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub tree_background_color: Color,
    pub tree_selected_color: Color,
    pub border_color: Color,
    pub border_width: u16,
    pub border_radius: u16,
    pub text_color: Color,
    pub disabled_text_color: Color,
}

impl Theme {
    pub const fn new() -> Self {
        Self {
            tree_background_color: Color::oklch(0.2, 0.0, 0.0),
            tree_selected_color: Color::oklch(0.45, 0.12, 250.0),
            border_color: Color::oklch(0.5, 0.0, 0.0),
            border_width: 1,
            border_radius: 1,
            text_color: Color::oklch(0.95, 0.0, 0.0),
            disabled_text_color: Color::oklch(0.55, 0.0, 0.0),
        }
    }

    pub fn border_width(mut self, width: u16) -> Self {
        self.border_width = width;
        self
    }

    pub fn border_radius(mut self, radius: u16) -> Self {
        self.border_radius = radius;
        self
    }

    pub fn tree_background_color(mut self, color: Color) -> Self {
        self.tree_background_color = color;
        self
    }

    pub fn tree_selected_color(mut self, color: Color) -> Self {
        self.tree_selected_color = color;
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}
