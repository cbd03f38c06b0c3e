//! Hand-off between the mutually exclusive "now playing" screens

use log::{debug, info};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::nav::registry::{Lookup, ScreenRegistry};
use crate::nav::session::Session;
use crate::playback::TrackInfo;

/// Track list of whatever is playing, shared by the player screens
#[derive(Debug, Clone, Default)]
pub struct TrackListCache {
    tracks: Arc<Mutex<Vec<TrackInfo>>>,
}

impl TrackListCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, tracks: Vec<TrackInfo>) {
        *self.tracks.lock() = tracks;
    }

    pub fn get(&self) -> Vec<TrackInfo> {
        self.tracks.lock().clone()
    }

    pub fn clear(&self) {
        self.tracks.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.tracks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.lock().is_empty()
    }
}

/// Keeps at most one player screen authoritative and records which one it is
/// in the session
#[derive(Debug, Clone)]
pub struct PlayerLifecycle {
    session: Session,
    tracks: TrackListCache,
}

impl PlayerLifecycle {
    pub fn new(session: Session, tracks: TrackListCache) -> Self {
        Self { session, tracks }
    }

    pub fn tracks(&self) -> &TrackListCache {
        &self.tracks
    }

    pub fn current(&self) -> Option<String> {
        self.session.current_player_screen()
    }

    /// Demote every player screen, run the visible screen's exit hook and,
    /// when `new_name` differs from the current player, tear the old one down
    /// and record `new_name`. Calling it twice with the same name changes
    /// nothing the second time.
    pub fn deactivate(&self, new_name: &str, registry: &mut ScreenRegistry) {
        let _guard = self.session.lock();

        Self::demote_all(registry);

        if let Some(visible) = self.session.current_screen() {
            if let Lookup::Found(screen) = registry.lookup_mut(&visible) {
                screen.exit_screen();
            }
        }

        self.replace(new_name, registry);
    }

    /// Promote `name` after a transition to it. The exit hook already ran as
    /// part of the transition.
    pub fn activate(&self, name: &str, registry: &mut ScreenRegistry) {
        let _guard = self.session.lock();

        Self::demote_all(registry);
        self.replace(name, registry);

        match registry.lookup_mut(name) {
            Lookup::Found(screen) => {
                screen.enable_player_screen(true);
                info!("Player screen {} is now active", name);
            }
            Lookup::Absent => debug!("Player screen {} not registered, nothing to enable", name),
        }
    }

    fn demote_all(registry: &mut ScreenRegistry) {
        for (name, screen) in registry.player_screens_mut() {
            if screen.player_screen_enabled() {
                debug!("Demoting player screen {}", name);
                screen.enable_player_screen(false);
            }
        }
    }

    fn replace(&self, new_name: &str, registry: &mut ScreenRegistry) {
        let current = self.session.current_player_screen();
        if current.as_deref() == Some(new_name) {
            return;
        }

        if let Some(old) = current {
            if let Lookup::Found(screen) = registry.lookup_mut(&old) {
                screen.stop_timer();
            }
        }
        self.tracks.clear();
        self.session.set_current_player_screen(Some(new_name.to_string()));
    }
}
