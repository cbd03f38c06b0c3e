use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::nav::state::StateObject;

/// Commands represent navigation side effects requested by screens, listeners
/// and background threads. They are queued and executed by the controller on
/// the event-loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Show a screen (construct it first if needed) and hand it `state`
    Navigate { name: String, state: Option<StateObject> },

    /// Restore the previously visible screen
    GoBack,

    /// Restore the authoritative player screen
    GoToPlayer,

    /// Turn the current screen's page forward (+1) or back (-1)
    TurnPage(i32),

    PlayPause,

    SetVolume(u8),

    /// Toggle mute
    Mute,

    /// Switch language, which resets most of the registry
    ChangeLanguage(String),

    /// Timer-driven transition to the sleeping state
    Sleep,

    /// Timer-driven transition back to the running state
    WakeUp,

    /// Stop everything and leave the event loop
    Shutdown,

    /// Execute multiple commands in sequence
    Batch(Vec<Command>),
}

impl Command {
    /// Helper to navigate to a screen
    pub fn navigate_to(name: impl Into<String>) -> Self {
        Command::Navigate { name: name.into(), state: None }
    }

    /// Helper to navigate to a screen with parameters
    pub fn navigate_with(name: impl Into<String>, state: StateObject) -> Self {
        Command::Navigate { name: name.into(), state: Some(state) }
    }

    /// Helper to batch multiple commands
    pub fn batch(commands: Vec<Command>) -> Self {
        Command::Batch(commands)
    }
}

/// FIFO of pending commands shared between listeners, timer threads and the
/// event loop
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    inner: Arc<Mutex<VecDeque<Command>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, command: Command) {
        log::debug!("Queued command {:?}", command);
        self.inner.lock().push_back(command);
    }

    pub fn pop(&self) -> Option<Command> {
        self.inner.lock().pop_front()
    }

    /// Take everything queued so far
    pub fn drain(&self) -> Vec<Command> {
        self.inner.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
