//! Process-wide navigation state behind one re-entrant lock
//!
//! The event loop, factories that re-enter `navigate`, and the sleep timer
//! thread all touch these fields. Every read or write goes through `Session`.

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::cell::RefCell;
use std::sync::Arc;

use crate::config::TimerSettings;

/// Whether the appliance is awake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Running,
    Sleeping,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub current_screen: Option<String>,
    pub previous_screen: Option<String>,
    pub current_player_screen: Option<String>,
    /// Screen shown when the sleep screen took over
    pub resume_screen: Option<String>,
    pub player_state: PlayerState,
    pub timer: TimerSettings,
}

/// Shared handle to the session state
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<ReentrantMutex<RefCell<SessionState>>>,
}

impl Session {
    pub fn new(timer: TimerSettings) -> Self {
        Self {
            inner: Arc::new(ReentrantMutex::new(RefCell::new(SessionState {
                timer,
                ..SessionState::default()
            }))),
        }
    }

    /// Hold the lock across several steps. The same thread may lock again
    /// while the guard is alive.
    pub fn lock(&self) -> ReentrantMutexGuard<'_, RefCell<SessionState>> {
        self.inner.lock()
    }

    /// Run `f` with mutable access. `f` must not call back into `with`.
    pub fn with<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let guard = self.inner.lock();
        let mut state = guard.borrow_mut();
        f(&mut state)
    }

    pub fn snapshot(&self) -> SessionState {
        self.with(|s| s.clone())
    }

    pub fn current_screen(&self) -> Option<String> {
        self.with(|s| s.current_screen.clone())
    }

    pub fn previous_screen(&self) -> Option<String> {
        self.with(|s| s.previous_screen.clone())
    }

    pub fn current_player_screen(&self) -> Option<String> {
        self.with(|s| s.current_player_screen.clone())
    }

    pub fn set_current_player_screen(&self, name: Option<String>) {
        self.with(|s| s.current_player_screen = name);
    }

    pub fn player_state(&self) -> PlayerState {
        self.with(|s| s.player_state)
    }

    pub fn set_player_state(&self, state: PlayerState) {
        self.with(|s| s.player_state = state);
    }

    pub fn timer(&self) -> TimerSettings {
        self.with(|s| s.timer.clone())
    }

    pub fn set_timer(&self, timer: TimerSettings) {
        self.with(|s| s.timer = timer);
    }
}
