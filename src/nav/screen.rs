use crate::nav::listeners::{Listener, ListenerKey};
use crate::nav::state::StateObject;
use crate::nav::widgets::{Focus, GridLayout, PagedMenu};

/// Capabilities a screen declares once, at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Accepts state through `set_current`
    pub currentable: bool,
    /// One of the mutually exclusive "now playing" surfaces
    pub player_screen: bool,
    /// Has a paginated menu and reacts to page turns
    pub paginated: bool,
}

impl Capabilities {
    pub fn menu() -> Self {
        Self { currentable: true, player_screen: false, paginated: true }
    }

    pub fn player() -> Self {
        Self { currentable: true, player_screen: true, paginated: false }
    }

    pub fn fixed() -> Self {
        Self { currentable: false, player_screen: false, paginated: false }
    }
}

/// User input after key/touch mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    /// Release of the highlighted element
    Select,
    /// Touch on a page-relative grid cell
    Touch(usize),
    /// Move the highlight between menu and navigator bar
    FocusNext,
    Back,
    Home,
    Player,
    PageUp,
    PageDown,
    PlayPause,
    Mute,
    VolumeUp,
    VolumeDown,
    Shutdown,
}

/// One rendered cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub label: String,
    pub selected: bool,
    pub enabled: bool,
}

/// One rendered navigator button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: String,
    pub selected: bool,
}

/// Renderer-independent snapshot of a screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScreenView {
    pub title: String,
    pub rows: usize,
    pub cols: usize,
    pub layout: GridLayout,
    pub cells: Vec<CellView>,
    pub navigator: Vec<ButtonView>,
    pub status: Option<String>,
}

impl ScreenView {
    /// Snapshot of a paged menu
    pub fn from_menu(title: impl Into<String>, menu: &PagedMenu, status: Option<String>) -> Self {
        let grid = menu.grid();
        let focus = menu.focus();
        let cells = grid
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| CellView {
                label: item.label.clone(),
                selected: focus == Focus::Grid(i),
                enabled: item.enabled,
            })
            .collect();
        let navigator = menu
            .navigator()
            .buttons()
            .iter()
            .map(|b| ButtonView {
                label: b.label.clone(),
                selected: focus == Focus::Navigator(b.key),
            })
            .collect();

        Self {
            title: title.into(),
            rows: grid.rows(),
            cols: grid.cols(),
            layout: grid.layout(),
            cells,
            navigator,
            status,
        }
    }
}

/// Contract every screen in the registry implements
pub trait Screen {
    fn name(&self) -> &str;

    fn capabilities(&self) -> Capabilities;

    /// Fields of the incoming state this screen looks at
    fn reads(&self) -> &'static [&'static str] {
        &[]
    }

    /// Refresh to reflect `state`. Deciding whether `state` changes anything
    /// is up to the screen.
    fn set_current(&mut self, state: Option<StateObject>);

    /// Become visible again without consuming new state
    fn restore(&mut self) {}

    /// Called before the screen loses visibility. Must be idempotent and cheap.
    fn exit_screen(&mut self) {}

    /// Returns true when the input was consumed
    fn handle_input(&mut self, _event: InputEvent) -> bool {
        false
    }

    /// Page turn for paginated screens. Returns true when the page changed.
    fn turn_page(&mut self, _delta: i32) -> bool {
        false
    }

    fn view(&self) -> ScreenView;

    /// Rebind one listener, used to cross-wire collaborator screens
    fn bind(&mut self, _key: ListenerKey, _listener: Listener) {}

    /// Player screens only: promote to or demote from authoritative player
    fn enable_player_screen(&mut self, _enabled: bool) {}

    fn player_screen_enabled(&self) -> bool {
        false
    }

    /// Player screens only: stop the position-polling task
    fn stop_timer(&mut self) {}
}

impl<'a> std::fmt::Debug for dyn Screen + 'a {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("name", &self.name())
            .field("capabilities", &self.capabilities())
            .finish()
    }
}
