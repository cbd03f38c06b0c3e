pub mod catalog;
pub mod content;
pub mod info_screen;
pub mod menu_screen;
pub mod names;
pub mod player_screen;

pub use catalog::{mode_screens, register_all, ModeScreens};
pub use content::{ContentSource, LibraryContent, StaticContent};
pub use info_screen::InfoScreen;
pub use menu_screen::MenuScreen;
pub use player_screen::PlayerScreen;
