use crate::nav::listeners::{ListenerKey, ListenerMap};

/// A single button of the navigator bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    pub key: ListenerKey,
    pub label: String,
}

impl NavButton {
    pub fn new(key: ListenerKey, label: impl Into<String>) -> Self {
        Self { key, label: label.into() }
    }
}

/// Fixed control bar (page-left, home, back, player, page-right, extras)
/// attached below a screen's menu
#[derive(Debug, Clone)]
pub struct Navigator {
    buttons: Vec<NavButton>,
    selected: Option<usize>,
}

impl Navigator {
    pub fn new(buttons: Vec<NavButton>) -> Self {
        Self { buttons, selected: None }
    }

    /// Bar used by paginated screens. The page buttons show the counters.
    pub fn paginated() -> Self {
        Self::new(vec![
            NavButton::new(ListenerKey::PageDown, "0"),
            NavButton::new(ListenerKey::Home, "Home"),
            NavButton::new(ListenerKey::Back, "Back"),
            NavButton::new(ListenerKey::Player, "Player"),
            NavButton::new(ListenerKey::PageUp, "0"),
        ])
    }

    /// Bar without page buttons
    pub fn basic() -> Self {
        Self::new(vec![
            NavButton::new(ListenerKey::Home, "Home"),
            NavButton::new(ListenerKey::Back, "Back"),
            NavButton::new(ListenerKey::Player, "Player"),
        ])
    }

    /// Add a screen-specific button, kept before the page-right button
    pub fn with_extra(mut self, key: ListenerKey, label: impl Into<String>) -> Self {
        let button = NavButton::new(key, label);
        match self.buttons.iter().position(|b| b.key == ListenerKey::PageUp) {
            Some(pos) => self.buttons.insert(pos, button),
            None => self.buttons.push(button),
        }
        self
    }

    pub fn buttons(&self) -> &[NavButton] {
        &self.buttons
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_key(&self) -> Option<ListenerKey> {
        self.selected.and_then(|i| self.buttons.get(i)).map(|b| b.key)
    }

    pub fn has_key(&self, key: ListenerKey) -> bool {
        self.buttons.iter().any(|b| b.key == key)
    }

    /// Highlight the button bound to `key`. Returns false if the bar has none.
    pub fn select_key(&mut self, key: ListenerKey) -> bool {
        match self.buttons.iter().position(|b| b.key == key) {
            Some(pos) => {
                self.selected = Some(pos);
                true
            }
            None => false,
        }
    }

    /// Highlight the first button when nothing is highlighted yet
    pub fn select_default(&mut self) {
        if self.selected.is_none() && !self.buttons.is_empty() {
            if !self.select_key(ListenerKey::Player) {
                self.selected = Some(0);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Move left (-1) or right (+1) with wraparound. Returns false when the
    /// highlight did not change.
    pub fn move_selection(&mut self, delta: i32) -> bool {
        let count = self.buttons.len();
        if count < 2 {
            return false;
        }
        let Some(current) = self.selected else {
            self.select_default();
            return self.selected.is_some();
        };
        let next = if delta < 0 {
            (current + count - 1) % count
        } else {
            (current + 1) % count
        };
        self.selected = Some(next);
        true
    }

    /// Update the page-left / page-right labels
    pub fn set_page_counters(&mut self, left: &str, right: &str) {
        for button in self.buttons.iter_mut() {
            match button.key {
                ListenerKey::PageDown => button.label = left.to_string(),
                ListenerKey::PageUp => button.label = right.to_string(),
                _ => {}
            }
        }
    }

    pub fn label_of(&self, key: ListenerKey) -> Option<&str> {
        self.buttons.iter().find(|b| b.key == key).map(|b| b.label.as_str())
    }

    /// Press the highlighted button
    pub fn activate(&self, listeners: &ListenerMap) -> bool {
        match self.selected_key() {
            Some(key) => listeners.invoke(key, None),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::command::{Command, CommandQueue};

    #[test]
    fn test_movement_wraps() {
        let mut nav = Navigator::paginated();
        assert!(nav.select_key(ListenerKey::PageDown));
        nav.move_selection(-1);
        assert_eq!(nav.selected_key(), Some(ListenerKey::PageUp));
        nav.move_selection(1);
        assert_eq!(nav.selected_key(), Some(ListenerKey::PageDown));
    }

    #[test]
    fn test_extras_sit_before_page_right() {
        let nav = Navigator::paginated().with_extra(ListenerKey::Custom("eq"), "EQ");
        let keys: Vec<_> = nav.buttons().iter().map(|b| b.key).collect();
        assert_eq!(keys[keys.len() - 2], ListenerKey::Custom("eq"));
        assert_eq!(keys[keys.len() - 1], ListenerKey::PageUp);
    }

    #[test]
    fn test_counters_land_on_page_buttons() {
        let mut nav = Navigator::paginated();
        nav.set_page_counters("1", "4");
        assert_eq!(nav.label_of(ListenerKey::PageDown), Some("1"));
        assert_eq!(nav.label_of(ListenerKey::PageUp), Some("4"));
        assert_eq!(nav.label_of(ListenerKey::Home), Some("Home"));
    }

    #[test]
    fn test_activate_invokes_bound_listener() {
        let queue = CommandQueue::new();
        let listeners = ListenerMap::standard(&queue);
        let mut nav = Navigator::basic();

        assert!(!nav.activate(&listeners));
        nav.select_key(ListenerKey::Back);
        assert!(nav.activate(&listeners));
        assert_eq!(queue.drain(), vec![Command::GoBack]);
    }
}
