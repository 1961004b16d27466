use std::sync::{Arc, Mutex};

use arbor::{
    BufferHost, Color, DrawContext, DrawResult, ItemId, Rect, Theme, TreeView, TreeViewConfig,
    Widget,
};

const WIDTH: u16 = 24;
const HEIGHT: u16 = 8;

type Calls = Arc<Mutex<Vec<(String, ItemId)>>>;

fn tree() -> TreeView {
    let tree = TreeView::with_config(TreeViewConfig::new().per_instance_ids());
    tree.set_frame(Rect::new(0, 0, WIDTH, HEIGHT));
    tree
}

fn record_calls(tree: &TreeView) -> Calls {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    tree.set_on_value_changed(move |text, id| {
        sink.lock().unwrap().push((text.to_string(), id));
    });
    calls
}

/// Draws one frame with the given clicks queued.
fn draw(tree: &TreeView, host: &mut BufferHost, clicks: &[(u16, u16)]) -> DrawResult {
    let theme = Theme::default();
    for &(x, y) in clicks {
        host.click(x, y);
    }
    host.begin_frame();
    let result = tree.draw(&DrawContext::new(&theme), host);
    host.end_frame();
    result
}

/// Visible row texts, in draw order.
fn row_texts(host: &BufferHost) -> Vec<String> {
    host.rows().iter().map(|row| row.text.clone()).collect()
}

/// Screen position of the row for `id`: first column of its label.
fn label_pos(host: &BufferHost, id: ItemId) -> (u16, u16) {
    let row = host
        .rows()
        .iter()
        .find(|row| row.key == id.to_string())
        .expect("row was drawn");
    (row.rect.x + 2, row.rect.y)
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_rows_render_in_tree_order() {
    let tree = tree();
    let root = tree.root_item();
    let fruit = tree.add_item(root, "Fruit");
    tree.add_item(fruit, "Apple");
    tree.add_item(fruit, "Banana");
    tree.add_item(root, "Nuts");

    let mut host = BufferHost::new(WIDTH, HEIGHT);
    assert_eq!(draw(&tree, &mut host, &[]), DrawResult::None);

    assert_eq!(row_texts(&host), vec!["Fruit", "Apple", "Banana", "Nuts"]);
    let depths: Vec<_> = host.rows().iter().map(|row| row.depth).collect();
    assert_eq!(depths, vec![0, 1, 1, 0]);
    assert!(host.buffer().row_text(1).starts_with("│▾ Fruit"));
    assert!(host.buffer().row_text(2).starts_with("│    Apple"));
}

#[test]
fn test_duplicate_labels_stay_distinct_and_hidden() {
    let tree = tree();
    let root = tree.root_item();
    let first = tree.add_item(root, "Same");
    let second = tree.add_item(root, "Same");

    let mut host = BufferHost::new(WIDTH, HEIGHT);
    draw(&tree, &mut host, &[]);

    let keys: Vec<_> = host.rows().iter().map(|row| row.key.clone()).collect();
    assert_eq!(keys, vec![first.to_string(), second.to_string()]);
    for y in 0..HEIGHT {
        assert!(!host.buffer().row_text(y).contains("##"));
    }

    let calls = record_calls(&tree);
    let pos = label_pos(&host, second);
    draw(&tree, &mut host, &[pos]);
    assert_eq!(*calls.lock().unwrap(), vec![("Same".to_string(), second)]);
}

#[test]
fn test_frame_background_and_border() {
    let tree = tree();
    tree.add_item(tree.root_item(), "leaf");

    let theme = Theme::default()
        .tree_background_color(Color::rgb(10, 20, 30))
        .border_color(Color::rgb(200, 0, 0))
        .border_radius(0);
    let mut host = BufferHost::new(WIDTH, HEIGHT);
    host.begin_frame();
    tree.draw(&DrawContext::new(&theme), &mut host);
    host.end_frame();

    let corner = host.buffer().get(0, 0).unwrap();
    assert_eq!(corner.char, '┌');
    assert_eq!(corner.fg, Color::rgb(200, 0, 0).to_rgb());
    let inside = host.buffer().get(10, 5).unwrap();
    assert_eq!(inside.bg, Color::rgb(10, 20, 30).to_rgb());
}

#[test]
fn test_selected_branch_is_highlighted() {
    let tree = tree();
    let branch = tree.add_item(tree.root_item(), "branch");
    tree.add_item(branch, "leaf");
    tree.set_selected_item_id(branch);

    let theme = Theme::default().tree_selected_color(Color::rgb(0, 90, 0));
    let mut host = BufferHost::new(WIDTH, HEIGHT);
    host.begin_frame();
    tree.draw(&DrawContext::new(&theme), &mut host);
    host.end_frame();

    let highlight = Color::rgb(0, 90, 0).to_rgb();
    assert_eq!(host.buffer().get(1, 1).unwrap().bg, highlight);
    assert_eq!(host.buffer().get(WIDTH - 2, 1).unwrap().bg, highlight);
    assert_ne!(host.buffer().get(1, 2).unwrap().bg, highlight);
    assert_ne!(host.buffer().get(0, 1).unwrap().bg, highlight);
}

#[test]
fn test_ui_offset_shifts_cursor_space() {
    let tree = tree();
    tree.set_frame(Rect::new(4, 2, 12, 4));
    let leaf = tree.add_item(tree.root_item(), "leaf");

    let theme = Theme::default();
    let mut host = BufferHost::new(20, 8).with_origin(4, 2);
    host.click(7, 3);
    host.begin_frame();
    let result = tree.draw(&DrawContext::new(&theme).with_ui_offset(4, 2), &mut host);
    host.end_frame();

    assert_eq!(result, DrawResult::Redraw);
    assert_eq!(tree.selected_item_id(), leaf);
    assert_eq!(host.rows()[0].rect, Rect::new(5, 3, 10, 1));
}

// ============================================================================
// Interaction
// ============================================================================

#[test]
fn test_leaf_click_selects_and_notifies_once() {
    let tree = tree();
    let root = tree.root_item();
    let leaf = tree.add_item(root, "Leaf");
    let calls = record_calls(&tree);

    let mut host = BufferHost::new(WIDTH, HEIGHT);
    draw(&tree, &mut host, &[]);
    let pos = label_pos(&host, leaf);

    assert_eq!(draw(&tree, &mut host, &[pos]), DrawResult::Redraw);
    assert_eq!(tree.selected_item_id(), leaf);
    assert_eq!(*calls.lock().unwrap(), vec![("Leaf".to_string(), leaf)]);

    // Nothing queued: no further notifications.
    assert_eq!(draw(&tree, &mut host, &[]), DrawResult::None);
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[test]
fn test_click_outside_rows_changes_nothing() {
    let tree = tree();
    tree.add_item(tree.root_item(), "Leaf");
    let calls = record_calls(&tree);

    let mut host = BufferHost::new(WIDTH, HEIGHT);
    assert_eq!(draw(&tree, &mut host, &[(5, 6)]), DrawResult::None);
    assert_eq!(draw(&tree, &mut host, &[(0, 1)]), DrawResult::None);

    assert_eq!(tree.selected_item_id(), tree.root_item());
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_branch_click_keeps_selection() {
    let tree = tree();
    let root = tree.root_item();
    let branch = tree.add_item(root, "Branch");
    let child = tree.add_item(branch, "Child");
    let calls = record_calls(&tree);

    let mut host = BufferHost::new(WIDTH, HEIGHT);
    draw(&tree, &mut host, &[]);
    let (label_x, y) = label_pos(&host, branch);
    let arrow = (label_x - 2, y);

    assert_eq!(draw(&tree, &mut host, &[arrow]), DrawResult::None);
    assert_eq!(draw(&tree, &mut host, &[(label_x, y)]), DrawResult::None);

    assert_eq!(tree.selected_item_id(), root);
    assert!(calls.lock().unwrap().is_empty());
    // Still expanded on the next frame.
    assert_eq!(row_texts(&host), vec!["Branch", "Child"]);
    assert!(tree.contains(child));
}

#[test]
fn test_disabled_tree_ignores_clicks() {
    let tree = tree();
    let leaf = tree.add_item(tree.root_item(), "Leaf");
    tree.set_enabled(false);
    let calls = record_calls(&tree);

    let mut host = BufferHost::new(WIDTH, HEIGHT);
    draw(&tree, &mut host, &[]);
    let pos = label_pos(&host, leaf);

    assert_eq!(draw(&tree, &mut host, &[pos]), DrawResult::None);
    assert!(calls.lock().unwrap().is_empty());
    assert!(!tree.is_enabled());

    tree.set_enabled(true);
    assert_eq!(draw(&tree, &mut host, &[pos]), DrawResult::Redraw);
}

#[test]
fn test_callback_removing_sibling_is_safe() {
    let tree = tree();
    let root = tree.root_item();
    let l1 = tree.add_item(root, "L1");
    let l2 = tree.add_item(root, "L2");

    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let handle = tree.clone();
    tree.set_on_value_changed(move |text, id| {
        sink.lock().unwrap().push((text.to_string(), id));
        handle.remove_item(l2);
    });

    let mut host = BufferHost::new(WIDTH, HEIGHT);
    draw(&tree, &mut host, &[]);
    let pos = label_pos(&host, l1);

    assert_eq!(draw(&tree, &mut host, &[pos]), DrawResult::Redraw);
    assert_eq!(*calls.lock().unwrap(), vec![("L1".to_string(), l1)]);
    assert!(!tree.contains(l2));

    assert_eq!(draw(&tree, &mut host, &[]), DrawResult::None);
    assert_eq!(row_texts(&host), vec!["L1"]);
    assert_eq!(tree.item_children(root), vec![l1]);
}

#[test]
fn test_callback_removing_clicked_item_is_safe() {
    let tree = tree();
    let root = tree.root_item();
    let branch = tree.add_item(root, "Branch");
    let doomed = tree.add_item(branch, "Doomed");
    let other = tree.add_item(branch, "Other");

    let handle = tree.clone();
    tree.set_on_value_changed(move |_, id| handle.remove_item(id));

    let mut host = BufferHost::new(WIDTH, HEIGHT);
    draw(&tree, &mut host, &[]);
    let pos = label_pos(&host, doomed);
    assert_eq!(draw(&tree, &mut host, &[pos]), DrawResult::Redraw);

    assert!(!tree.contains(doomed));
    // The selection keeps the removed id until something replaces it.
    assert_eq!(tree.selected_item_id(), doomed);

    draw(&tree, &mut host, &[]);
    assert_eq!(row_texts(&host), vec!["Branch", "Other"]);
    assert_eq!(tree.item_children(branch), vec![other]);
}

#[test]
fn test_callback_can_rebuild_tree_and_replace_itself() {
    let tree = tree();
    let root = tree.root_item();
    let old = tree.add_item(root, "Old");
    let fired = Arc::new(Mutex::new(0));

    let handle = tree.clone();
    let counter = Arc::clone(&fired);
    tree.set_on_value_changed(move |_, _| {
        *counter.lock().unwrap() += 1;
        for child in handle.item_children(handle.root_item()) {
            handle.remove_item(child);
        }
        let fresh = handle.add_item(handle.root_item(), "Fresh");
        handle.set_selected_item_id(fresh);
        handle.set_on_value_changed(|_, _| {});
    });

    let mut host = BufferHost::new(WIDTH, HEIGHT);
    draw(&tree, &mut host, &[]);
    let pos = label_pos(&host, old);
    assert_eq!(draw(&tree, &mut host, &[pos]), DrawResult::Redraw);
    assert_eq!(*fired.lock().unwrap(), 1);

    draw(&tree, &mut host, &[]);
    assert_eq!(row_texts(&host), vec!["Fresh"]);
    let fresh = tree.item_children(root)[0];
    assert_eq!(tree.selected_item_id(), fresh);

    // The replacement callback is in effect.
    let pos = label_pos(&host, fresh);
    draw(&tree, &mut host, &[pos]);
    assert_eq!(*fired.lock().unwrap(), 1);
}
