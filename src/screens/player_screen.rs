use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::nav::listeners::{Listener, ListenerKey, ListenerMap};
use crate::nav::player::TrackListCache;
use crate::nav::polling::{DEFAULT_POLL_INTERVAL, PositionPoller};
use crate::nav::screen::{ButtonView, Capabilities, CellView, InputEvent, Screen, ScreenView};
use crate::nav::state::{self, StateObject};
use crate::nav::widgets::{GridLayout, Navigator, RedrawSignal};
use crate::playback::Playback;

const READS: &[&str] = &[state::URL, state::FILE_NAME, state::NAME];

/// "Now playing" surface of one playback mode. Only the authoritative player
/// polls the backend.
pub struct PlayerScreen {
    name: String,
    title: String,
    navigator: Navigator,
    listeners: ListenerMap,
    playback: Arc<dyn Playback>,
    tracks: TrackListCache,
    signal: RedrawSignal,
    poller: Option<PositionPoller>,
    poll_interval: Duration,
    enabled: bool,
    now_playing: Option<StateObject>,
}

impl PlayerScreen {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        listeners: ListenerMap,
        playback: Arc<dyn Playback>,
        tracks: TrackListCache,
        signal: RedrawSignal,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            navigator: Navigator::basic(),
            listeners,
            playback,
            tracks,
            signal,
            poller: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            enabled: false,
            now_playing: None,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn now_playing(&self) -> Option<&StateObject> {
        self.now_playing.as_ref()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|p| p.is_running())
    }

    fn start_polling(&mut self) {
        if self.poller.is_none() {
            debug!("{} starts polling", self.name);
            self.poller = Some(PositionPoller::start(
                self.playback.clone(),
                self.poll_interval,
                self.signal.clone(),
            ));
        }
    }

    fn stop_polling(&mut self) {
        if let Some(mut poller) = self.poller.take() {
            debug!("{} stops polling", self.name);
            poller.stop();
        }
    }

    fn refresh_tracks(&self) {
        match self.playback.track_list() {
            Ok(tracks) => self.tracks.replace(tracks),
            Err(e) => warn!("Failed to read track list: {:#}", e),
        }
    }

    fn title_line(&self) -> String {
        self.now_playing
            .as_ref()
            .and_then(|s| s.get_str(state::NAME).or_else(|| s.get_str(state::URL)))
            .unwrap_or("Nothing playing")
            .to_string()
    }
}

impl Screen for PlayerScreen {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::player()
    }

    fn reads(&self) -> &'static [&'static str] {
        READS
    }

    fn set_current(&mut self, state: Option<StateObject>) {
        if StateObject::is_noop(self.now_playing.as_ref(), state.as_ref(), READS) {
            debug!("{} keeps playing", self.name);
            return;
        }
        let Some(state) = state else {
            return;
        };

        info!("{} plays {}", self.name, state);
        if let Err(e) = self.playback.play(&state) {
            warn!("{} failed to start playback: {:#}", self.name, e);
        }
        self.refresh_tracks();
        self.now_playing = Some(state);
        self.signal.request();
    }

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
            InputEvent::Select if self.navigator.selected().is_some() => self.navigator.activate(&self.listeners),
            InputEvent::Select => self.listeners.invoke(ListenerKey::PlayPause, None),
            _ => false,
        }
    }

    fn view(&self) -> ScreenView {
        let mut cells = vec![CellView {
            label: self.title_line(),
            selected: false,
            enabled: true,
        }];
        cells.extend(self.tracks.get().into_iter().map(|track| CellView {
            label: track.title,
            selected: false,
            enabled: true,
        }));

        let selected = self.navigator.selected();
        let navigator = self
            .navigator
            .buttons()
            .iter()
            .enumerate()
            .map(|(i, b)| ButtonView {
                label: b.label.clone(),
                selected: selected == Some(i),
            })
            .collect();

        let status = match &self.poller {
            Some(poller) => poller.latest().map(|position| position.display()),
            None => Some("inactive".to_string()),
        };

        ScreenView {
            title: self.title.clone(),
            rows: cells.len(),
            cols: 1,
            layout: GridLayout::Vertical,
            cells,
            navigator,
            status,
        }
    }

    fn bind(&mut self, key: ListenerKey, listener: Listener) {
        self.listeners.bind(key, listener);
    }

    /// Promotion starts polling. Demotion only clears the flag: the poller
    /// keeps running until `stop_timer` tears the player down.
    fn enable_player_screen(&mut self, enabled: bool) {
        self.enabled = enabled;
        if enabled {
            // The hand-off cleared the shared cache
            self.refresh_tracks();
            self.start_polling();
        }
    }

    fn player_screen_enabled(&self) -> bool {
        self.enabled
    }

    fn stop_timer(&mut self) {
        self.stop_polling();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::command::{Command, CommandQueue};
    use crate::playback::SimulatedPlayback;

    fn player() -> (PlayerScreen, Arc<SimulatedPlayback>, TrackListCache, CommandQueue) {
        let playback = Arc::new(SimulatedPlayback::new());
        let tracks = TrackListCache::new();
        let queue = CommandQueue::new();
        let screen = PlayerScreen::new(
            "radio_player",
            "Radio",
            ListenerMap::standard(&queue),
            playback.clone(),
            tracks.clone(),
            RedrawSignal::new(),
        )
        .with_poll_interval(Duration::from_millis(5));
        (screen, playback, tracks, queue)
    }

    #[test]
    fn test_new_station_starts_playback_once() {
        let (mut screen, playback, tracks, _) = player();
        let station = StateObject::new().with(state::NAME, "Jazz FM").with(state::URL, "http://jazz.example");

        screen.set_current(Some(station.clone()));
        assert_eq!(playback.source().as_deref(), Some("http://jazz.example"));
        assert_eq!(tracks.len(), 1);

        playback.stop().unwrap();
        // same station again does not restart it
        screen.set_current(Some(station.with(state::INDEX, 3usize)));
        assert_eq!(playback.source(), None);
        assert_eq!(screen.view().cells[0].label, "Jazz FM");
    }

    #[test]
    fn test_enable_controls_polling() {
        let (mut screen, _, _, _) = player();
        assert_eq!(screen.view().status.as_deref(), Some("inactive"));

        screen.enable_player_screen(true);
        assert!(screen.player_screen_enabled());
        assert!(screen.is_polling());

        screen.stop_timer();
        assert!(!screen.is_polling());
        assert_eq!(screen.view().status.as_deref(), Some("inactive"));
    }

    #[test]
    fn test_demotion_keeps_polling() {
        let (mut screen, _, _, _) = player();
        screen.enable_player_screen(true);

        screen.enable_player_screen(false);
        assert!(!screen.player_screen_enabled());
        assert!(screen.is_polling());
        assert_ne!(screen.view().status.as_deref(), Some("inactive"));

        // promoting again reuses the running poller
        screen.enable_player_screen(true);
        assert!(screen.is_polling());
        screen.stop_timer();
    }

    #[test]
    fn test_select_without_navigator_focus_toggles_playback() {
        let (mut screen, _, _, queue) = player();
        assert!(screen.handle_input(InputEvent::Select));
        assert!(screen.handle_input(InputEvent::FocusNext));
        assert!(screen.handle_input(InputEvent::Left));
        assert!(screen.handle_input(InputEvent::Select));
        assert_eq!(queue.drain(), vec![Command::PlayPause, Command::GoBack]);
    }
}
