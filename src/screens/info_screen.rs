use crate::nav::listeners::{Listener, ListenerKey, ListenerMap};
use crate::nav::screen::{ButtonView, Capabilities, CellView, InputEvent, Screen, ScreenView};
use crate::nav::state::StateObject;
use crate::nav::widgets::{GridLayout, Navigator};

/// Wakes the appliance from the sleep screen
pub const WAKE_UP: ListenerKey = ListenerKey::Custom("wake_up");

/// Static text screen (about, sleep). Takes no state.
pub struct InfoScreen {
    name: String,
    title: String,
    lines: Vec<String>,
    navigator: Navigator,
    listeners: ListenerMap,
    /// Listener pressed by Select when no button is highlighted
    on_select: Option<ListenerKey>,
}

impl InfoScreen {
    pub fn new(name: impl Into<String>, title: impl Into<String>, lines: Vec<String>, listeners: ListenerMap) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            lines,
            navigator: Navigator::basic(),
            listeners,
            on_select: None,
        }
    }

    pub fn with_navigator(mut self, navigator: Navigator) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn on_select(mut self, key: ListenerKey) -> Self {
        self.on_select = Some(key);
        self
    }
}

impl Screen for InfoScreen {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::fixed()
    }

    fn set_current(&mut self, _state: Option<StateObject>) {}

    fn exit_screen(&mut self) {
        self.navigator.clear_selection();
    }

    fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Left => self.navigator.move_selection(-1),
            InputEvent::Right => self.navigator.move_selection(1),
            InputEvent::FocusNext => {
                self.navigator.select_default();
                true
            }
            InputEvent::Select | InputEvent::Touch(_) => {
                if self.navigator.selected().is_some() {
                    self.navigator.activate(&self.listeners)
                } else if let Some(key) = self.on_select {
                    self.listeners.invoke(key, None)
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn view(&self) -> ScreenView {
        let cells: Vec<CellView> = self
            .lines
            .iter()
            .map(|line| CellView {
                label: line.clone(),
                selected: false,
                enabled: false,
            })
            .collect();
        let selected = self.navigator.selected();

        ScreenView {
            title: self.title.clone(),
            rows: cells.len().max(1),
            cols: 1,
            layout: GridLayout::Vertical,
            cells,
            navigator: self
                .navigator
                .buttons()
                .iter()
                .enumerate()
                .map(|(i, b)| ButtonView {
                    label: b.label.clone(),
                    selected: selected == Some(i),
                })
                .collect(),
            status: None,
        }
    }

    fn bind(&mut self, key: ListenerKey, listener: Listener) {
        self.listeners.bind(key, listener);
    }
}
