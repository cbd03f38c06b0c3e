//! Listener map handed to every screen
//!
//! Screens never talk to the controller directly. They invoke listeners by
//! symbolic key, and the standard listeners turn that into queued commands.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::nav::command::{Command, CommandQueue};
use crate::nav::state::{self, StateObject};
use crate::screens::names;

/// Callable bound to a listener key
pub type Listener = Arc<dyn Fn(Option<StateObject>) + Send + Sync>;

/// Fixed symbolic keys a screen can invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKey {
    Home,
    Back,
    Player,
    PageUp,
    PageDown,
    Shutdown,
    PlayPause,
    SetVolume,
    Mute,
    Info,
    /// Release of a menu item
    Select,
    Language,
    Custom(&'static str),
}

impl ListenerKey {
    /// Keys wired by `ListenerMap::standard`
    pub const STANDARD: [ListenerKey; 11] = [
        ListenerKey::Home,
        ListenerKey::Back,
        ListenerKey::Player,
        ListenerKey::PageUp,
        ListenerKey::PageDown,
        ListenerKey::Shutdown,
        ListenerKey::PlayPause,
        ListenerKey::SetVolume,
        ListenerKey::Mute,
        ListenerKey::Info,
        ListenerKey::Language,
    ];
}

/// Mapping from listener key to callable
#[derive(Clone, Default)]
pub struct ListenerMap {
    listeners: HashMap<ListenerKey, Listener>,
}

impl fmt::Debug for ListenerMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.listeners.keys().map(|k| format!("{:?}", k)).collect();
        keys.sort();
        f.debug_struct("ListenerMap").field("keys", &keys).finish()
    }
}

impl ListenerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed listener set every screen receives
    pub fn standard(queue: &CommandQueue) -> Self {
        let mut map = Self::new();

        map.bind_command(ListenerKey::Home, queue, |_| Command::navigate_to(names::HOME));
        map.bind_command(ListenerKey::Back, queue, |_| Command::GoBack);
        map.bind_command(ListenerKey::Player, queue, |_| Command::GoToPlayer);
        map.bind_command(ListenerKey::PageUp, queue, |_| Command::TurnPage(1));
        map.bind_command(ListenerKey::PageDown, queue, |_| Command::TurnPage(-1));
        map.bind_command(ListenerKey::Shutdown, queue, |_| Command::Shutdown);
        map.bind_command(ListenerKey::PlayPause, queue, |_| Command::PlayPause);
        map.bind_command(ListenerKey::Mute, queue, |_| Command::Mute);
        map.bind_command(ListenerKey::Info, queue, |_| Command::navigate_to(names::ABOUT));

        let volume_queue = queue.clone();
        map.bind(ListenerKey::SetVolume, Arc::new(move |state: Option<StateObject>| {
            let level = state
                .as_ref()
                .and_then(|s| s.get_int(state::VOLUME))
                .map(|v| v.clamp(0, 100) as u8);
            match level {
                Some(level) => volume_queue.push(Command::SetVolume(level)),
                None => log::warn!("SetVolume listener invoked without a volume field"),
            }
        }));

        let language_queue = queue.clone();
        map.bind(ListenerKey::Language, Arc::new(move |state: Option<StateObject>| {
            match state.as_ref().and_then(|s| s.get_str(state::LANGUAGE)) {
                Some(lang) => language_queue.push(Command::ChangeLanguage(lang.to_string())),
                None => language_queue.push(Command::navigate_to(names::LANGUAGE)),
            }
        }));

        map
    }

    pub fn bind(&mut self, key: ListenerKey, listener: Listener) {
        self.listeners.insert(key, listener);
    }

    /// Bind a key to a command built from the invocation state
    pub fn bind_command<F>(&mut self, key: ListenerKey, queue: &CommandQueue, build: F)
    where
        F: Fn(Option<StateObject>) -> Command + Send + Sync + 'static,
    {
        let queue = queue.clone();
        self.bind(key, Arc::new(move |state| queue.push(build(state))));
    }

    pub fn get(&self, key: ListenerKey) -> Option<&Listener> {
        self.listeners.get(&key)
    }

    pub fn contains(&self, key: ListenerKey) -> bool {
        self.listeners.contains_key(&key)
    }

    /// Call the listener bound to `key`. Returns false when nothing is bound,
    /// which callers treat as "control does nothing yet".
    pub fn invoke(&self, key: ListenerKey, state: Option<StateObject>) -> bool {
        match self.listeners.get(&key) {
            Some(listener) => {
                listener(state);
                true
            }
            None => {
                log::debug!("No listener bound for {:?}", key);
                false
            }
        }
    }
}
