//! Immediate-mode drawing primitives a widget renders through.
//!
//! Widgets never touch a [`Buffer`](crate::Buffer) directly. They describe a
//! frame through [`Host`], which decides how rows look and which of them were
//! clicked since the last frame.

mod buffer_host;

pub use buffer_host::{BufferHost, DrawnRow};

use crate::layout::Rect;
use crate::types::Color;

/// Separates the visible part of a row label from its hidden identity.
pub const LABEL_ID_SEPARATOR: &str = "##";

/// Splits `visible##hidden` into `(visible, hidden)`.
///
/// The last separator wins so visible text may itself contain `##`. A label
/// without a separator is its own identity.
pub fn split_label(label: &str) -> (&str, &str) {
    match label.rfind(LABEL_ID_SEPARATOR) {
        Some(pos) => (&label[..pos], &label[pos + LABEL_ID_SEPARATOR.len()..]),
        None => (label, label),
    }
}

/// What a tree row reported back to the widget that emitted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowResponse {
    /// The row is expanded; the caller must emit its children and then
    /// call [`Host::tree_pop`].
    pub open: bool,
    /// A click landed anywhere on the row this frame.
    pub clicked: bool,
}

/// Drawing and interaction primitives consumed by widgets.
///
/// Rectangles are in absolute buffer coordinates. The cursor is relative to
/// the host's window origin; `DrawContext` carries that origin as the ui
/// offset.
pub trait Host {
    fn fill_rect(&mut self, rect: Rect, color: &Color, radius: u16);

    fn stroke_rect(&mut self, rect: Rect, color: &Color, radius: u16, width: u16);

    /// Emits one tree row at the cursor and advances the cursor to the next
    /// line. `label` may carry a hidden `##id` suffix that identifies the row
    /// but is never drawn.
    fn tree_row(&mut self, label: &str, is_leaf: bool) -> RowResponse;

    /// Closes the innermost open row.
    fn tree_pop(&mut self);

    fn cursor_y(&self) -> u16;

    fn set_cursor_x(&mut self, x: u16);

    fn set_cursor_y(&mut self, y: u16);

    /// Nested enable/disable state. A row drawn while any pushed state is
    /// disabled renders dimmed and never reports a click.
    fn push_enabled(&mut self, enabled: bool);

    fn pop_enabled(&mut self);

    /// Restricts drawing and hit-testing to `rect` until the matching pop.
    fn push_clip_rect(&mut self, rect: Rect);

    fn pop_clip_rect(&mut self);

    fn text_line_height(&self) -> u16;
}
