//! Tree widget with stable item ids, drawn through an immediate-mode host
//! into a terminal cell buffer.

pub mod buffer;
pub mod error;
pub mod event;
pub mod host;
pub mod layout;
pub mod terminal;
pub mod text;
pub mod tree;
pub mod types;
pub mod widget;

pub use buffer::{Buffer, Cell};
pub use error::{Error, Result};
pub use event::{Event, Key, Modifiers, MouseButton};
pub use host::{BufferHost, DrawnRow, Host, RowResponse};
pub use layout::Rect;
pub use terminal::Terminal;
pub use tree::{IdScope, ItemId, ItemStore, Selection, TreeView, TreeViewConfig};
pub use types::*;
pub use widget::{DrawContext, DrawResult, PreferredSize, Widget, WidgetBase};
