pub mod render;
pub mod theme;

pub use render::{cell_position, render_screen, StatusBar};
pub use theme::{Theme, ThemeVariant};
