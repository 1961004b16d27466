use crate::buffer::{Buffer, Cell};
use crate::host::{split_label, Host, RowResponse};
use crate::layout::Rect;
use crate::text::{char_width, display_width, truncate_to_width};
use crate::types::{Border, Color, Rgb, Theme};

const BRANCH_GLYPH: char = '▾';
const LEAF_GLYPH: char = ' ';
const DEFAULT_INDENT: u16 = 2;

/// A row emitted during the current frame, kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnRow {
    /// Hidden identity taken from the label suffix.
    pub key: String,
    /// Visible label text.
    pub text: String,
    /// Clickable area (absolute coordinates).
    pub rect: Rect,
    pub leaf: bool,
    pub depth: usize,
}

/// [`Host`] that draws into a terminal cell [`Buffer`].
///
/// Clicks are queued with [`click`](Self::click) between frames and consumed
/// by the first row that contains them during the next frame. Every row
/// reports itself open; collapsed state is never stored.
#[derive(Debug)]
pub struct BufferHost {
    buffer: Buffer,
    origin: (u16, u16),
    cursor_x: u16,
    cursor_y: u16,
    indent: u16,
    indent_stack: Vec<u16>,
    clip_stack: Vec<Rect>,
    enabled_stack: Vec<bool>,
    clicks: Vec<(u16, u16)>,
    text_color: Rgb,
    disabled_text_color: Rgb,
    rows: Vec<DrawnRow>,
}

impl BufferHost {
    pub fn new(width: u16, height: u16) -> Self {
        let theme = Theme::default();
        Self {
            buffer: Buffer::new(width, height),
            origin: (0, 0),
            cursor_x: 0,
            cursor_y: 0,
            indent: DEFAULT_INDENT,
            indent_stack: Vec::new(),
            clip_stack: Vec::new(),
            enabled_stack: Vec::new(),
            clicks: Vec::new(),
            text_color: theme.text_color.to_rgb(),
            disabled_text_color: theme.disabled_text_color.to_rgb(),
            rows: Vec::new(),
        }
    }

    /// Places the window origin the cursor is relative to.
    pub fn with_origin(mut self, x: u16, y: u16) -> Self {
        self.origin = (x, y);
        self
    }

    /// Columns each nesting level is shifted by.
    pub fn with_indent(mut self, indent: u16) -> Self {
        self.indent = indent;
        self
    }

    pub fn apply_theme(&mut self, theme: &Theme) {
        self.text_color = theme.text_color.to_rgb();
        self.disabled_text_color = theme.disabled_text_color.to_rgb();
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Rows emitted since the last [`begin_frame`](Self::begin_frame).
    pub fn rows(&self) -> &[DrawnRow] {
        &self.rows
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.buffer.resize(width, height);
    }

    /// Queues a click for the next frame.
    pub fn click(&mut self, x: u16, y: u16) {
        self.clicks.push((x, y));
    }

    pub fn begin_frame(&mut self) {
        self.buffer.clear();
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.indent_stack.clear();
        self.clip_stack.clear();
        self.enabled_stack.clear();
        self.rows.clear();
    }

    /// Drops clicks no row claimed.
    pub fn end_frame(&mut self) {
        if !self.indent_stack.is_empty()
            || !self.clip_stack.is_empty()
            || !self.enabled_stack.is_empty()
        {
            log::warn!(
                "[host] unbalanced frame: {} rows, {} clips, {} enabled states still pushed",
                self.indent_stack.len(),
                self.clip_stack.len(),
                self.enabled_stack.len()
            );
        }
        if !self.clicks.is_empty() {
            log::trace!("[host] discarding {} unclaimed clicks", self.clicks.len());
        }
        self.clicks.clear();
    }

    /// Writes `text` starting at `(x, y)` within the current clip, keeping
    /// the existing background. Returns the columns written.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgb) -> u16 {
        self.put_text(x, y, text, fg, false)
    }

    fn put_text(&mut self, x: u16, y: u16, text: &str, fg: Rgb, dim: bool) -> u16 {
        let clip = self.clip();
        let mut col = x;
        for ch in text.chars() {
            let width = char_width(ch) as u16;
            if width == 0 {
                continue;
            }
            let last = col.saturating_add(width - 1);
            if !clip.contains(col, y) || !clip.contains(last, y) {
                break;
            }
            let bg = self.buffer.get(col, y).map(|c| c.bg).unwrap_or_default();
            let cell = Cell::new(ch).with_fg(fg).with_bg(bg).with_dim(dim);
            self.buffer.set(col, y, cell);
            if width > 1 {
                if let Some(cell) = self.buffer.get_mut(last, y) {
                    cell.wide_continuation = true;
                    cell.bg = bg;
                }
            }
            col = col.saturating_add(width);
        }
        col - x
    }

    fn clip(&self) -> Rect {
        let full = Rect::from_size(self.buffer.width(), self.buffer.height());
        self.clip_stack.last().copied().unwrap_or(full)
    }

    fn is_enabled(&self) -> bool {
        self.enabled_stack.last().copied().unwrap_or(true)
    }

    fn take_click(&mut self, area: &Rect) -> bool {
        match self.clicks.iter().position(|&(x, y)| area.contains(x, y)) {
            Some(idx) => {
                self.clicks.remove(idx);
                true
            }
            None => false,
        }
    }

    fn set_border_char(&mut self, x: u16, y: u16, ch: char, fg: Rgb) {
        if !self.clip().contains(x, y) {
            return;
        }
        if let Some(cell) = self.buffer.get_mut(x, y) {
            cell.char = ch;
            cell.fg = fg;
        }
    }
}

impl Host for BufferHost {
    // Cells cannot show rounded fills; the radius only shapes strokes.
    fn fill_rect(&mut self, rect: Rect, color: &Color, _radius: u16) {
        let area = rect.intersect(&self.clip());
        let bg = color.to_rgb();
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(cell) = self.buffer.get_mut(x, y) {
                    cell.bg = bg;
                }
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: &Color, radius: u16, width: u16) {
        let Some((tl, tr, bl, br, h, v)) = Border::for_stroke(width, radius).glyphs() else {
            return;
        };
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let fg = color.to_rgb();
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);

        self.set_border_char(rect.x, rect.y, tl, fg);
        self.set_border_char(right, rect.y, tr, fg);
        self.set_border_char(rect.x, bottom, bl, fg);
        self.set_border_char(right, bottom, br, fg);
        for x in (rect.x + 1)..right {
            self.set_border_char(x, rect.y, h, fg);
            self.set_border_char(x, bottom, h, fg);
        }
        for y in (rect.y + 1)..bottom {
            self.set_border_char(rect.x, y, v, fg);
            self.set_border_char(right, y, v, fg);
        }
    }

    fn tree_row(&mut self, label: &str, is_leaf: bool) -> RowResponse {
        let (visible, key) = split_label(label);
        let x = self.origin.0.saturating_add(self.cursor_x);
        let y = self.origin.1.saturating_add(self.cursor_y);
        let clip = self.clip();
        let row = Rect::from_edges(x, y, clip.right(), y.saturating_add(1)).intersect(&clip);

        let enabled = self.is_enabled();
        let fg = if enabled {
            self.text_color
        } else {
            self.disabled_text_color
        };

        let glyph = if is_leaf { LEAF_GLYPH } else { BRANCH_GLYPH };
        let glyph_cols = self.put_text(x, y, &glyph.to_string(), fg, !enabled) + 1;
        let text_x = x.saturating_add(glyph_cols);
        let room = row.right().saturating_sub(text_x) as usize;
        let shown = if display_width(visible) > room {
            truncate_to_width(visible, room)
        } else {
            visible.to_string()
        };
        self.put_text(text_x, y, &shown, fg, !enabled);

        let clicked = enabled && !row.is_empty() && self.take_click(&row);

        self.rows.push(DrawnRow {
            key: key.to_string(),
            text: visible.to_string(),
            rect: row,
            leaf: is_leaf,
            depth: self.indent_stack.len(),
        });

        self.cursor_y = self.cursor_y.saturating_add(self.text_line_height());
        self.indent_stack.push(self.cursor_x);
        self.cursor_x = self.cursor_x.saturating_add(self.indent);

        RowResponse {
            open: true,
            clicked,
        }
    }

    fn tree_pop(&mut self) {
        match self.indent_stack.pop() {
            Some(x) => self.cursor_x = x,
            None => log::warn!("[host] tree_pop without an open row"),
        }
    }

    fn cursor_y(&self) -> u16 {
        self.cursor_y
    }

    fn set_cursor_x(&mut self, x: u16) {
        self.cursor_x = x;
    }

    fn set_cursor_y(&mut self, y: u16) {
        self.cursor_y = y;
    }

    fn push_enabled(&mut self, enabled: bool) {
        let effective = enabled && self.is_enabled();
        self.enabled_stack.push(effective);
    }

    fn pop_enabled(&mut self) {
        self.enabled_stack.pop();
    }

    fn push_clip_rect(&mut self, rect: Rect) {
        let clipped = rect.intersect(&self.clip());
        self.clip_stack.push(clipped);
    }

    fn pop_clip_rect(&mut self) {
        self.clip_stack.pop();
    }

    fn text_line_height(&self) -> u16 {
        1
    }
}
