//! Tree widget: owns an [`ItemStore`] and a [`Selection`], and renders
//! them once per frame through a [`Host`].

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::host::{Host, LABEL_ID_SEPARATOR};
use crate::layout::Rect;
use crate::types::Theme;
use crate::widget::{DrawContext, DrawResult, PreferredSize, Widget, WidgetBase};

use super::store::ItemRef;
use super::{ItemId, ItemStore, Selection, TreeViewConfig};

/// Callback fired when the user picks a leaf: `(text, id)`.
pub type ValueChangedFn = dyn Fn(&str, ItemId) + Send + Sync;

#[derive(Debug)]
struct TreeInner {
    store: ItemStore,
    selection: Selection,
    base: WidgetBase,
}

/// A leaf clicked during traversal, applied once traversal is over.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingSelection {
    id: ItemId,
    text: String,
}

/// Hierarchical item widget.
///
/// `TreeView` is a handle: clones share the same items, selection, and
/// callback. The value-changed callback is only invoked after a frame has
/// been fully drawn and no internal lock is held, so it may freely capture a
/// clone and add, remove, or reselect items (including the one just picked).
///
/// # Example
///
/// ```
/// use arbor::{BufferHost, DrawContext, Theme, TreeView, Widget, Rect};
///
/// let tree = TreeView::new();
/// let fruit = tree.add_item(tree.root_item(), "Fruit");
/// let apple = tree.add_item(fruit, "Apple");
///
/// let handle = tree.clone();
/// tree.set_on_value_changed(move |text, id| {
///     assert_eq!(text, "Apple");
///     handle.remove_item(id);
/// });
///
/// tree.set_frame(Rect::new(0, 0, 20, 5));
/// let theme = Theme::default();
/// let mut host = BufferHost::new(20, 5);
/// host.click(5, 2);
/// host.begin_frame();
/// tree.draw(&DrawContext::new(&theme), &mut host);
/// host.end_frame();
///
/// assert_eq!(tree.selected_item_id(), apple);
/// assert!(tree.item_text(apple).is_none());
/// ```
#[derive(Clone)]
pub struct TreeView {
    inner: Arc<RwLock<TreeInner>>,
    on_value_changed: Arc<RwLock<Option<Arc<ValueChangedFn>>>>,
}

impl TreeView {
    pub fn new() -> Self {
        Self::with_config(TreeViewConfig::default())
    }

    pub fn with_config(config: TreeViewConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(TreeInner {
                store: ItemStore::new(config.id_scope),
                selection: Selection::new(),
                base: WidgetBase::default(),
            })),
            on_value_changed: Arc::new(RwLock::new(None)),
        }
    }

    // -------------------------------------------------------------------------
    // Items
    // -------------------------------------------------------------------------

    pub fn root_item(&self) -> ItemId {
        self.read(|inner| inner.store.root_id()).unwrap_or(ItemId::from_raw(0))
    }

    /// Appends an item under `parent`; unknown parents attach under the root.
    ///
    /// If the widget state is poisoned nothing is added and the returned id
    /// names no item.
    pub fn add_item(&self, parent: ItemId, text: impl Into<String>) -> ItemId {
        let text = text.into();
        match self.inner.write() {
            Ok(mut guard) => guard.store.add_item(parent, text),
            Err(_) => {
                log::error!("[tree] state poisoned, dropping add_item({parent})");
                ItemId::from_raw(u64::MAX)
            }
        }
    }

    /// Removes `id` with its whole subtree; unknown ids are ignored.
    pub fn remove_item(&self, id: ItemId) {
        match self.inner.write() {
            Ok(mut guard) => guard.store.remove_item(id),
            Err(_) => log::error!("[tree] state poisoned, dropping remove_item({id})"),
        }
    }

    /// Children of `id` in insertion order; empty for unknown ids.
    pub fn item_children(&self, id: ItemId) -> Vec<ItemId> {
        self.read(|inner| inner.store.children(id)).unwrap_or_default()
    }

    pub fn item_text(&self, id: ItemId) -> Option<String> {
        self.read(|inner| inner.store.text(id).map(str::to_string)).flatten()
    }

    pub fn item_parent(&self, id: ItemId) -> Option<ItemId> {
        self.read(|inner| inner.store.parent(id)).flatten()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.read(|inner| inner.store.contains(id)).unwrap_or(false)
    }

    /// Live items, root included.
    pub fn len(&self) -> usize {
        self.read(|inner| inner.store.len()).unwrap_or(0)
    }

    /// True when only the root is left.
    pub fn is_empty(&self) -> bool {
        self.read(|inner| inner.store.is_empty()).unwrap_or(true)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// The selected id, or the root id if nothing was selected yet.
    pub fn selected_item_id(&self) -> ItemId {
        self.read(|inner| inner.selection.get(inner.store.root_id()))
            .unwrap_or(ItemId::from_raw(0))
    }

    /// Stores `id` as the selection without checking that it exists.
    pub fn set_selected_item_id(&self, id: ItemId) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selection.set(id);
        }
    }

    pub fn clear_selection(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selection.clear();
        }
    }

    pub fn set_on_value_changed<F>(&self, callback: F)
    where
        F: Fn(&str, ItemId) + Send + Sync + 'static,
    {
        if let Ok(mut guard) = self.on_value_changed.write() {
            *guard = Some(Arc::new(callback));
        }
    }

    fn read<R>(&self, f: impl FnOnce(&TreeInner) -> R) -> Option<R> {
        self.inner.read().ok().map(|guard| f(&guard))
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Applies a pending pick: commit the selection, then run the callback
    /// with every lock released.
    fn dispatch(&self, pending: PendingSelection) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selection.set(pending.id);
        }

        let callback = self
            .on_value_changed
            .read()
            .ok()
            .and_then(|guard| guard.clone());

        log::debug!("[tree] selected item {}", pending.id);
        if let Some(callback) = callback {
            callback(&pending.text, pending.id);
        }
    }
}

impl TreeInner {
    /// Draws the whole frame and returns the leaf clicked during it, if any.
    fn render(&self, cx: &DrawContext<'_>, host: &mut dyn Host) -> Option<PendingSelection> {
        let theme = cx.theme;
        let frame = self.base.frame;

        host.fill_rect(frame, &theme.tree_background_color, theme.border_radius);
        host.stroke_rect(
            frame,
            &theme.border_color,
            theme.border_radius,
            theme.border_width,
        );

        let content = frame.inset(theme.border_width.min(1));
        let x = content.x.saturating_sub(cx.ui_offset_x);

        host.push_enabled(self.base.enabled);
        host.push_clip_rect(content);
        host.set_cursor_y(content.y.saturating_sub(cx.ui_offset_y));

        let mut pending = None;
        let mut rows = 0usize;
        if let Some(root) = self.store.get(self.store.root_id()) {
            // One iterator per open row; the bottom one walks the top level.
            let mut levels = vec![root.children()];
            while let Some(level) = levels.last_mut() {
                let Some(item) = level.next() else {
                    levels.pop();
                    if !levels.is_empty() {
                        host.tree_pop();
                    }
                    continue;
                };
                if levels.len() == 1 {
                    // Nested rows position themselves relative to their parent.
                    host.set_cursor_x(x);
                }

                rows += 1;
                if self.draw_row(item, cx, content, host, &mut pending) {
                    levels.push(item.children());
                }
            }
        }

        host.pop_clip_rect();
        host.pop_enabled();

        log::trace!("[tree] emitted {rows} rows");
        pending
    }

    /// Emits the row for `item` and returns whether the host opened it.
    fn draw_row(
        &self,
        item: ItemRef<'_>,
        cx: &DrawContext<'_>,
        content: Rect,
        host: &mut dyn Host,
        pending: &mut Option<PendingSelection>,
    ) -> bool {
        let is_leaf = !item.has_children();

        // The host has no notion of selection, so paint it under the row.
        if self.selection.is_selected(item.id()) {
            let y = host.cursor_y().saturating_add(cx.ui_offset_y);
            let highlight = Rect::new(content.x, y, content.width, host.text_line_height());
            host.fill_rect(highlight, &cx.theme.tree_selected_color, 0);
        }

        // The host tells rows apart by label, so append the unique id.
        let label = format!("{}{LABEL_ID_SEPARATOR}{}", item.text(), item.id());
        let row = host.tree_row(&label, is_leaf);

        if row.clicked && is_leaf && self.base.enabled {
            *pending = Some(PendingSelection {
                id: item.id(),
                text: item.text().to_string(),
            });
        }
        row.open
    }
}

impl Widget for TreeView {
    fn frame(&self) -> Rect {
        self.read(|inner| inner.base.frame).unwrap_or_default()
    }

    fn set_frame(&self, frame: Rect) {
        if let Ok(mut guard) = self.inner.write() {
            guard.base.frame = frame;
        }
    }

    fn is_enabled(&self) -> bool {
        self.read(|inner| inner.base.enabled).unwrap_or(false)
    }

    fn set_enabled(&self, enabled: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.base.enabled = enabled;
        }
    }

    /// Always grows to fill its container.
    fn calc_preferred_size(&self, _theme: &Theme) -> PreferredSize {
        PreferredSize::fill()
    }

    fn draw(&self, cx: &DrawContext<'_>, host: &mut dyn Host) -> DrawResult {
        let pending = match self.inner.read() {
            Ok(guard) => guard.render(cx, host),
            Err(_) => {
                log::error!("[tree] state poisoned, skipping frame");
                return DrawResult::None;
            }
        };

        match pending {
            Some(pending) => {
                self.dispatch(pending);
                DrawResult::Redraw
            }
            None => DrawResult::None,
        }
    }
}

impl Default for TreeView {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TreeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let has_callback = self
            .on_value_changed
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false);
        f.debug_struct("TreeView")
            .field("inner", &self.inner)
            .field("has_callback", &has_callback)
            .finish()
    }
}
