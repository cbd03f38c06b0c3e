use log::{debug, warn};

use crate::nav::listeners::{Listener, ListenerKey, ListenerMap};
use crate::nav::screen::{Capabilities, InputEvent, Screen, ScreenView};
use crate::nav::state::{self, StateObject};
use crate::nav::widgets::{Direction, GridLayout, Navigator, PagedMenu, RedrawSignal, Reselect, ResumeStrategy};
use crate::screens::content::ContentSource;

/// Paginated browser: a grid of items from a `ContentSource`, the navigator
/// bar, and the listeners its items and buttons invoke.
pub struct MenuScreen {
    name: String,
    title: String,
    menu: PagedMenu,
    listeners: ListenerMap,
    content: Box<dyn ContentSource>,
    reads: &'static [&'static str],
    shown: Option<StateObject>,
    loaded: bool,
    resume: ResumeStrategy,
}

impl MenuScreen {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        (rows, cols, layout): (usize, usize, GridLayout),
        navigator: Navigator,
        signal: RedrawSignal,
        listeners: ListenerMap,
        content: Box<dyn ContentSource>,
    ) -> Self {
        let mut menu = PagedMenu::new(rows, cols, layout, navigator, signal);
        if let Some(select) = listeners.get(ListenerKey::Select) {
            menu.grid_mut().set_default_listener(select.clone());
        }

        Self {
            name: name.into(),
            title: title.into(),
            menu,
            listeners,
            content,
            reads: &[state::GENRE, state::INDEX],
            shown: None,
            loaded: false,
            resume: ResumeStrategy::default(),
        }
    }

    /// Fields of the incoming state that trigger a reload
    pub fn with_reads(mut self, reads: &'static [&'static str]) -> Self {
        self.reads = reads;
        self
    }

    pub fn with_resume(mut self, resume: ResumeStrategy) -> Self {
        self.resume = resume;
        self
    }

    pub fn menu(&self) -> &PagedMenu {
        &self.menu
    }

    pub fn listeners(&self) -> &ListenerMap {
        &self.listeners
    }

    fn reload(&mut self, state: Option<&StateObject>) {
        let items = match self.content.items(state) {
            Ok(items) => items,
            Err(e) => {
                warn!("Failed to load items for {}: {:#}", self.name, e);
                Vec::new()
            }
        };
        debug!("{} loaded {} items", self.name, items.len());

        let remembered = state.and_then(|s| s.get_index());
        let position = remembered.and_then(|index| {
            items
                .iter()
                .position(|item| item.state.get_index() == Some(index))
        });

        self.menu.set_items(items, Reselect::First);
        if let Some(position) = position {
            self.menu.resume(position, self.resume);
        }
        self.loaded = true;
    }

    fn status(&self) -> Option<String> {
        let pages = self.menu.paginator();
        if pages.total_pages() > 1 {
            Some(format!("Page {} of {}", pages.current_page(), pages.total_pages()))
        } else {
            None
        }
    }
}

impl Screen for MenuScreen {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::menu()
    }

    fn reads(&self) -> &'static [&'static str] {
        self.reads
    }

    fn set_current(&mut self, state: Option<StateObject>) {
        if self.loaded && StateObject::is_noop(self.shown.as_ref(), state.as_ref(), self.reads) {
            debug!("{} already shows {:?}, keeping page", self.name, state);
            return;
        }

        self.reload(state.as_ref());
        if let Some(state) = state {
            self.shown = Some(state.project(self.reads));
        }
    }

    fn restore(&mut self) {
        if !self.loaded {
            let shown = self.shown.clone();
            self.reload(shown.as_ref());
        }
    }

    fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Up => self.menu.navigate(Direction::Up),
            InputEvent::Down => self.menu.navigate(Direction::Down),
            InputEvent::Left => self.menu.navigate(Direction::Left),
            InputEvent::Right => self.menu.navigate(Direction::Right),
            InputEvent::FocusNext => self.menu.focus_next(),
            InputEvent::Select => self.menu.activate(&self.listeners),
            InputEvent::Touch(index) => self.menu.touch(index),
            _ => false,
        }
    }

    fn turn_page(&mut self, delta: i32) -> bool {
        self.menu.turn_page(delta)
    }

    fn view(&self) -> ScreenView {
        ScreenView::from_menu(self.title.clone(), &self.menu, self.status())
    }

    fn bind(&mut self, key: ListenerKey, listener: Listener) {
        if key == ListenerKey::Select {
            self.menu.grid_mut().set_default_listener(listener.clone());
        }
        self.listeners.bind(key, listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::command::{Command, CommandQueue};
    use crate::nav::widgets::{Focus, GridItem};
    use crate::screens::content::StaticContent;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counting {
        inner: StaticContent,
        loads: Rc<Cell<usize>>,
    }

    impl ContentSource for Counting {
        fn items(&self, state: Option<&StateObject>) -> anyhow::Result<Vec<GridItem>> {
            self.loads.set(self.loads.get() + 1);
            self.inner.items(state)
        }
    }

    fn screen(count: usize) -> (MenuScreen, CommandQueue, Rc<Cell<usize>>) {
        let queue = CommandQueue::new();
        let mut listeners = ListenerMap::standard(&queue);
        listeners.bind_command(ListenerKey::Select, &queue, |state| {
            Command::Navigate { name: "player".into(), state }
        });
        let items = (0..count)
            .map(|i| GridItem::new(format!("item {}", i), StateObject::new().with(state::INDEX, i)))
            .collect();
        let loads = Rc::new(Cell::new(0));
        let content = Counting { inner: StaticContent::new(items), loads: loads.clone() };
        let screen = MenuScreen::new(
            "browser",
            "Browser",
            (2, 2, GridLayout::Horizontal),
            Navigator::paginated(),
            RedrawSignal::new(),
            listeners,
            Box::new(content),
        );
        (screen, queue, loads)
    }

    #[test]
    fn test_same_state_is_a_noop() {
        let (mut screen, _, loads) = screen(6);
        screen.set_current(None);
        assert_eq!(loads.get(), 1);

        let genre = StateObject::new().with(state::GENRE, "jazz").with(state::NAME, "ignored");
        screen.set_current(Some(genre.clone()));
        assert_eq!(loads.get(), 2);

        // only unread fields differ
        screen.set_current(Some(genre.with(state::NAME, "other")));
        screen.set_current(None);
        assert_eq!(loads.get(), 2);
    }

    #[test]
    fn test_index_resumes_page() {
        let (mut screen, _, _) = screen(6);
        screen.set_current(Some(StateObject::new().with(state::INDEX, 5usize)));
        assert_eq!(screen.menu().paginator().current_page(), 2);
        assert_eq!(screen.menu().focus(), Focus::Grid(1));
        assert_eq!(screen.view().status.as_deref(), Some("Page 2 of 2"));
    }

    #[test]
    fn test_select_and_navigator_queue_commands() {
        let (mut screen, queue, _) = screen(3);
        screen.set_current(None);

        assert!(screen.handle_input(InputEvent::Select));
        assert!(screen.handle_input(InputEvent::FocusNext));
        assert!(screen.handle_input(InputEvent::Select));

        assert_eq!(
            queue.drain(),
            vec![
                Command::navigate_with("player", StateObject::new().with(state::INDEX, 0usize)),
                Command::GoToPlayer,
            ]
        );
    }

    #[test]
    fn test_rebinding_select() {
        let (mut screen, queue, _) = screen(1);
        screen.set_current(None);
        let rebound = queue.clone();
        screen.bind(
            ListenerKey::Select,
            std::sync::Arc::new(move |_state: Option<StateObject>| rebound.push(Command::Mute)),
        );
        screen.handle_input(InputEvent::Touch(0));
        assert_eq!(queue.drain(), vec![Command::Mute]);
    }
}
