use std::fs::File;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use arbor::{
    BufferHost, Color, DrawContext, DrawResult, Event, ItemId, Key, Rect, Result, Terminal,
    Theme, TreeView, Widget,
};
use simplelog::{Config, LevelFilter, WriteLogger};

const LOG_FILE: &str = "arbor-demo.log";
const LOG_ENV: &str = "ARBOR_LOG";

const HELP: &str = "click a leaf to select · a: add under selection · d: delete selection · q: quit";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    init_logging()?;

    let tree = TreeView::new();
    populate(&tree);

    let status = Arc::new(RwLock::new(String::from("nothing selected")));
    {
        let status = Arc::clone(&status);
        let handle = tree.clone();
        tree.set_on_value_changed(move |text, id| {
            log::info!("picked {text:?} ({id})");
            // Picking the self-destructing leaf removes it mid-frame.
            if text == "Remove me" {
                handle.remove_item(id);
            }
            if let Ok(mut status) = status.write() {
                *status = format!("selected {text} ({id})");
            }
        });
    }

    let theme = Theme::default().tree_selected_color(Color::oklch(0.45, 0.12, 150.0));
    let mut term = Terminal::new()?;
    let (width, height) = term.size()?;
    let mut host = BufferHost::new(width, height);
    host.apply_theme(&theme);
    let mut added = 0usize;

    loop {
        let (width, height) = term.size()?;
        if host.buffer().width() != width || host.buffer().height() != height {
            host.resize(width, height);
        }
        // One column of margin around the tree, plus the status line.
        let preferred = tree.calc_preferred_size(&theme);
        tree.set_frame(Rect::new(
            1,
            1,
            preferred.width.resolve(width.saturating_sub(2)),
            preferred.height.resolve(height.saturating_sub(3)),
        ));

        host.begin_frame();
        let result = tree.draw(&DrawContext::new(&theme), &mut host);
        let line = status.read().map(|s| s.clone()).unwrap_or_default();
        let status_y = height.saturating_sub(1);
        let fg = theme.text_color.to_rgb();
        let written = host.draw_text(1, status_y, &line, fg);
        host.draw_text(written + 3, status_y, HELP, theme.disabled_text_color.to_rgb());
        host.end_frame();
        term.present(host.buffer())?;

        // A pick may have changed the tree; show it before blocking again.
        let timeout = match result {
            DrawResult::Redraw => Some(Duration::ZERO),
            DrawResult::None => Some(Duration::from_millis(250)),
        };

        for event in term.poll(timeout)? {
            match event {
                Event::Key {
                    key: Key::Char('q') | Key::Escape,
                    ..
                } => return Ok(()),
                Event::Key {
                    key: Key::Char('a'),
                    ..
                } => {
                    added += 1;
                    let parent = tree.selected_item_id();
                    let parent = tree.item_parent(parent).unwrap_or(parent);
                    tree.add_item(parent, format!("New item {added}"));
                }
                Event::Key {
                    key: Key::Char('d') | Key::Delete,
                    ..
                } => delete_selected(&tree, &status),
                Event::Click { x, y, .. } => host.click(x, y),
                Event::Resize { width, height } => host.resize(width, height),
                Event::Key { .. } => {}
            }
        }
    }
}

fn init_logging() -> Result<()> {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    let log_file = File::create(LOG_FILE)?;
    WriteLogger::init(level, Config::default(), log_file)
        .map_err(|e| arbor::Error::Logger(e.to_string()))
}

fn populate(tree: &TreeView) {
    let root = tree.root_item();

    let fruit = tree.add_item(root, "Fruit");
    for name in ["Apple", "Banana", "Cherry"] {
        tree.add_item(fruit, name);
    }

    let vegetables = tree.add_item(root, "Vegetables");
    tree.add_item(vegetables, "Carrot");
    let greens = tree.add_item(vegetables, "Leafy greens");
    tree.add_item(greens, "Kale");
    tree.add_item(greens, "Spinach");

    tree.add_item(root, "Remove me");
    tree.add_item(root, "Remove me");
}

fn delete_selected(tree: &TreeView, status: &RwLock<String>) {
    let selected: ItemId = tree.selected_item_id();
    if selected == tree.root_item() || !tree.contains(selected) {
        return;
    }
    let text = tree.item_text(selected).unwrap_or_default();
    tree.remove_item(selected);
    tree.clear_selection();
    if let Ok(mut status) = status.write() {
        *status = format!("deleted {text}");
    }
}
