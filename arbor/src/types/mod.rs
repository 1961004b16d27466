mod color;
mod enums;
mod theme;

pub use color::{Color, Rgb};
pub use enums::{Border, Size};
pub use theme::Theme;
