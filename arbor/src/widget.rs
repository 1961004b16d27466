//! The boundary every widget sits behind: frame geometry, enabled state,
//! preferred size, and a per-frame `draw`.

use crate::host::Host;
use crate::layout::Rect;
use crate::types::{Size, Theme};

/// Whether the caller has to schedule another frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawResult {
    #[default]
    None,
    Redraw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreferredSize {
    pub width: Size,
    pub height: Size,
}

impl PreferredSize {
    pub const fn new(width: Size, height: Size) -> Self {
        Self { width, height }
    }

    pub const fn fill() -> Self {
        Self::new(Size::Fill, Size::Fill)
    }
}

/// Everything a widget may read while drawing one frame.
#[derive(Debug, Clone, Copy)]
pub struct DrawContext<'a> {
    pub theme: &'a Theme,
    /// Absolute position of the host window origin; subtract it from frame
    /// coordinates to get cursor coordinates.
    pub ui_offset_x: u16,
    pub ui_offset_y: u16,
}

impl<'a> DrawContext<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            ui_offset_x: 0,
            ui_offset_y: 0,
        }
    }

    pub fn with_ui_offset(mut self, x: u16, y: u16) -> Self {
        self.ui_offset_x = x;
        self.ui_offset_y = y;
        self
    }
}

/// State shared by all widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetBase {
    pub frame: Rect,
    pub enabled: bool,
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self {
            frame: Rect::default(),
            enabled: true,
        }
    }
}

pub trait Widget {
    fn frame(&self) -> Rect;

    fn set_frame(&self, frame: Rect);

    fn is_enabled(&self) -> bool;

    fn set_enabled(&self, enabled: bool);

    fn calc_preferred_size(&self, theme: &Theme) -> PreferredSize;

    fn draw(&self, cx: &DrawContext<'_>, host: &mut dyn Host) -> DrawResult;
}
