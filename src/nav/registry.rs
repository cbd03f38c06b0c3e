//! Built screens by name, with their visibility

use std::collections::HashMap;

use crate::nav::screen::Screen;

/// Outcome of a registry lookup. A missing screen is an expected state, not
/// an error: many screens are built on first visit or never.
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    Absent,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Absent => None,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Found(v),
            None => Lookup::Absent,
        }
    }
}

/// A registered screen and its visibility
pub struct ScreenEntry {
    pub screen: Box<dyn Screen>,
    pub visible: bool,
}

/// Screens built so far, keyed by name. Only the navigation controller
/// mutates it.
#[derive(Default)]
pub struct ScreenRegistry {
    entries: HashMap<String, ScreenEntry>,
}

impl ScreenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Lookup<&dyn Screen> {
        self.entries.get(name).map(|e| e.screen.as_ref()).into()
    }

    pub fn lookup_mut(&mut self, name: &str) -> Lookup<&mut Box<dyn Screen>> {
        self.entries.get_mut(name).map(|e| &mut e.screen).into()
    }

    pub fn insert(&mut self, name: impl Into<String>, screen: Box<dyn Screen>) {
        let name = name.into();
        if self.entries.contains_key(&name) {
            log::warn!("Replacing registered screen {}", name);
        }
        self.entries.insert(name, ScreenEntry { screen, visible: false });
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.entries.get(name).map(|e| e.visible).unwrap_or(false)
    }

    /// Make `name` the only visible screen
    pub fn show_only(&mut self, name: &str) {
        for (key, entry) in self.entries.iter_mut() {
            entry.visible = key == name;
        }
    }

    pub fn hide(&mut self, name: &str) {
        if let Some(entry) = self.entries.get_mut(name) {
            entry.visible = false;
        }
    }

    pub fn visible_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, e)| e.visible)
            .map(|(k, _)| k.as_str())
            .collect()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(|k| k.as_str()).collect();
        names.sort();
        names
    }

    /// Player-capable screens
    pub fn player_screens_mut(&mut self) -> impl Iterator<Item = (&str, &mut Box<dyn Screen>)> {
        self.entries
            .iter_mut()
            .filter(|(_, e)| e.screen.capabilities().player_screen)
            .map(|(k, e)| (k.as_str(), &mut e.screen))
    }

    /// Drop every screen whose name is not in `keep`. Returns the dropped names.
    pub fn retain(&mut self, keep: &[&str]) -> Vec<String> {
        let dropped: Vec<String> = self
            .entries
            .keys()
            .filter(|k| !keep.contains(&k.as_str()))
            .cloned()
            .collect();
        for name in &dropped {
            if let Some(mut entry) = self.entries.remove(name) {
                entry.screen.exit_screen();
                entry.screen.stop_timer();
            }
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::screen::{Capabilities, ScreenView};
    use crate::nav::state::StateObject;

    struct Blank(&'static str, Capabilities);

    impl Screen for Blank {
        fn name(&self) -> &str {
            self.0
        }
        fn capabilities(&self) -> Capabilities {
            self.1
        }
        fn set_current(&mut self, _state: Option<StateObject>) {}
        fn view(&self) -> ScreenView {
            ScreenView::default()
        }
    }

    #[test]
    fn test_lookup_reports_absence() {
        let mut registry = ScreenRegistry::new();
        assert_eq!(registry.lookup("home").found().map(|s| s.name().to_string()), None);
        registry.insert("home", Box::new(Blank("home", Capabilities::menu())));
        assert!(registry.lookup("home").is_found());
        assert!(!registry.lookup_mut("radio").is_found());
    }

    #[test]
    fn test_show_only_keeps_single_visible() {
        let mut registry = ScreenRegistry::new();
        registry.insert("a", Box::new(Blank("a", Capabilities::menu())));
        registry.insert("b", Box::new(Blank("b", Capabilities::menu())));
        registry.show_only("a");
        registry.show_only("b");
        assert_eq!(registry.visible_names(), vec!["b"]);
    }

    #[test]
    fn test_retain_and_player_filter() {
        let mut registry = ScreenRegistry::new();
        registry.insert("home", Box::new(Blank("home", Capabilities::menu())));
        registry.insert("radio_player", Box::new(Blank("radio_player", Capabilities::player())));
        registry.insert("file_player", Box::new(Blank("file_player", Capabilities::player())));

        assert_eq!(registry.player_screens_mut().count(), 2);

        let mut dropped = registry.retain(&["radio_player"]);
        dropped.sort();
        assert_eq!(dropped, vec!["file_player".to_string(), "home".to_string()]);
        assert_eq!(registry.names(), vec!["radio_player"]);
    }
}
