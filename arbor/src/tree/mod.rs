//! Tree widget with stable item ids.

mod config;
mod id;
mod selection;
mod store;
mod view;

pub use config::TreeViewConfig;
pub use id::{IdScope, ItemId};
pub use selection::Selection;
pub use store::{Children, ItemRef, ItemStore};
pub use view::TreeView;
