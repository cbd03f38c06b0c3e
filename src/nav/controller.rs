//! Screen registry owner and the single entry point for screen transitions

use anyhow::Result;
use log::{debug, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::NavContext;
use crate::nav::command::{Command, CommandQueue};
use crate::nav::error::NavError;
use crate::nav::factory::FactoryRegistry;
use crate::nav::listeners::ListenerMap;
use crate::nav::player::{PlayerLifecycle, TrackListCache};
use crate::nav::registry::{Lookup, ScreenRegistry};
use crate::nav::screen::{InputEvent, Screen, ScreenView};
use crate::nav::session::{PlayerState, Session};
use crate::nav::state::StateObject;
use crate::nav::timer::{self, SleepTimer};
use crate::nav::widgets::RedrawSignal;
use crate::playback::Playback;
use crate::screens::names;

const VOLUME_STEP: u8 = 5;

pub struct NavigationController {
    registry: ScreenRegistry,
    factories: FactoryRegistry,
    session: Session,
    player: PlayerLifecycle,
    queue: CommandQueue,
    listeners: ListenerMap,
    context: NavContext,
    playback: Arc<dyn Playback>,
    redraw: RedrawSignal,
    running: Arc<AtomicBool>,
    volume: u8,
    muted: bool,
    timer: Option<SleepTimer>,
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("screens", &self.registry.names())
            .field("factories", &self.factories)
            .field("session", &self.session.snapshot())
            .field("volume", &self.volume)
            .field("muted", &self.muted)
            .finish()
    }
}

impl NavigationController {
    pub fn new(context: NavContext, factories: FactoryRegistry, playback: Arc<dyn Playback>) -> Self {
        let session = Session::new(context.timer.clone());
        let queue = CommandQueue::new();
        let player = PlayerLifecycle::new(session.clone(), TrackListCache::new());

        if let Err(e) = playback.set_volume(context.volume) {
            warn!("Failed to apply initial volume: {:#}", e);
        }
        if let Err(e) = playback.mute(context.mute) {
            warn!("Failed to apply initial mute: {:#}", e);
        }

        Self {
            registry: ScreenRegistry::new(),
            listeners: ListenerMap::standard(&queue),
            volume: context.volume,
            muted: context.mute,
            factories,
            session,
            player,
            queue,
            context,
            playback,
            redraw: RedrawSignal::new(),
            running: Arc::new(AtomicBool::new(true)),
            timer: None,
        }
    }

    // Accessors handed to factories and the event loop

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn queue(&self) -> &CommandQueue {
        &self.queue
    }

    /// A fresh copy of the standard listener map for a new screen
    pub fn standard_listeners(&self) -> ListenerMap {
        self.listeners.clone()
    }

    pub fn playback(&self) -> Arc<dyn Playback> {
        self.playback.clone()
    }

    pub fn context(&self) -> &NavContext {
        &self.context
    }

    pub fn track_cache(&self) -> TrackListCache {
        self.player.tracks().clone()
    }

    pub fn redraw_signal(&self) -> RedrawSignal {
        self.redraw.clone()
    }

    pub fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    pub fn factories(&self) -> &FactoryRegistry {
        &self.factories
    }

    pub fn lookup(&self, name: &str) -> Lookup<&dyn Screen> {
        self.registry.lookup(name)
    }

    pub fn lookup_mut(&mut self, name: &str) -> Lookup<&mut Box<dyn Screen>> {
        self.registry.lookup_mut(name)
    }

    pub fn current_screen(&self) -> Option<String> {
        self.session.current_screen()
    }

    pub fn previous_screen(&self) -> Option<String> {
        self.session.previous_screen()
    }

    pub fn current_player_screen(&self) -> Option<String> {
        self.session.current_player_screen()
    }

    pub fn player_state(&self) -> PlayerState {
        self.session.player_state()
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// True when anything visible changed since the last call
    pub fn take_redraw(&self) -> bool {
        self.redraw.take()
    }

    /// Show `name`, building it on first visit.
    ///
    /// Steps, in order: exit hook of the visible screen, construction when
    /// absent, history update, visibility flip, `restore` or `set_current`,
    /// player hand-off. On error the previous screen stays current.
    pub fn navigate(&mut self, name: &str, state: Option<StateObject>, go_back: bool) -> Result<()> {
        let session = self.session.clone();
        let _guard = session.lock();

        info!(
            "Navigate to {} (go_back={}, state={})",
            name,
            go_back,
            state.as_ref().map(|s| s.to_string()).unwrap_or_else(|| "none".to_string())
        );

        let leaving = session.current_screen();
        if let Some(current) = &leaving {
            if let Lookup::Found(screen) = self.registry.lookup_mut(current) {
                screen.exit_screen();
            }
        }

        if !self.registry.contains(name) {
            if let Err(e) = self.construct(name) {
                self.revive(leaving.as_deref());
                return Err(e);
            }
        }

        // Construction may have navigated elsewhere
        let current = session.current_screen();
        if current != leaving {
            if let Some(other) = current.as_deref().filter(|c| *c != name) {
                if let Lookup::Found(screen) = self.registry.lookup_mut(other) {
                    screen.exit_screen();
                }
            }
        }
        if current.as_deref() != Some(name) {
            session.with(|s| {
                s.previous_screen = current;
                s.current_screen = Some(name.to_string());
            });
        }

        self.registry.show_only(name);

        let is_player = match self.registry.lookup_mut(name) {
            Lookup::Found(screen) => {
                let caps = screen.capabilities();
                if go_back || !caps.currentable {
                    screen.restore();
                } else {
                    screen.set_current(state);
                }
                caps.player_screen
            }
            Lookup::Absent => false,
        };

        if is_player {
            self.player.activate(name, &mut self.registry);
        }

        self.redraw.request();
        Ok(())
    }

    fn construct(&mut self, name: &str) -> Result<()> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| NavError::misconfigured(name, "no screen factory registered"))?;

        debug!("Constructing screen {}", name);
        let screen = factory
            .create(self)
            .map_err(|e| NavError::misconfigured(name, format!("{:#}", e)))?;
        self.registry.insert(name, screen);
        Ok(())
    }

    /// Undo the exit hook after an abandoned transition
    fn revive(&mut self, name: Option<&str>) {
        if let Some(name) = name {
            if let Lookup::Found(screen) = self.registry.lookup_mut(name) {
                screen.restore();
            }
        }
    }

    /// Navigate only when `name` is already registered
    pub fn get_if_exists(&mut self, name: &str, state: Option<StateObject>) -> Result<Lookup<()>> {
        if self.registry.contains(name) {
            self.navigate(name, state, false)?;
            Ok(Lookup::Found(()))
        } else {
            debug!("Screen {} not registered, skipping", name);
            Ok(Lookup::Absent)
        }
    }

    /// Single-level back. Does nothing without a previous screen.
    pub fn go_back(&mut self) -> Result<()> {
        match self.session.previous_screen() {
            Some(previous) => self.navigate(&previous, None, true),
            None => {
                debug!("No previous screen, ignoring back");
                Ok(())
            }
        }
    }

    pub fn go_player(&mut self) -> Result<()> {
        match self.session.current_player_screen() {
            Some(player) => self.navigate(&player, None, true),
            None => {
                debug!("No player screen yet, ignoring");
                Ok(())
            }
        }
    }

    /// Public hand-off entry point, including the visible screen's exit hook
    pub fn deactivate(&mut self, new_name: &str) {
        self.player.deactivate(new_name, &mut self.registry);
    }

    /// Drop every screen not named in `keep`. Returns the dropped names.
    pub fn reset_registry(&mut self, keep: &[&str]) -> Vec<String> {
        let _guard = self.session.lock();
        let dropped = self.registry.retain(keep);
        info!("Registry reset, dropped {} screens", dropped.len());

        let current = self.session.current_screen();
        if current.as_deref().is_some_and(|c| !keep.contains(&c)) {
            self.session.with(|s| s.current_screen = None);
        }
        dropped
    }

    /// Rebuild the UI in `language`. Keeps the active player and the
    /// configured always-kept screens, clears history, shows home.
    pub fn change_language(&mut self, language: &str) -> Result<()> {
        let session = self.session.clone();
        let _guard = session.lock();

        info!("Changing language from {} to {}", self.context.language, language);
        self.context.language = language.to_string();

        if let Some(current) = session.current_screen() {
            if let Lookup::Found(screen) = self.registry.lookup_mut(&current) {
                screen.exit_screen();
            }
        }

        let mut keep: Vec<String> = self.context.always_keep.clone();
        keep.extend(session.current_player_screen());
        let keep: Vec<&str> = keep.iter().map(String::as_str).collect();
        self.reset_registry(&keep);

        session.with(|s| {
            s.current_screen = None;
            s.previous_screen = None;
        });
        self.navigate(names::HOME, None, false)
    }

    pub fn turn_page(&mut self, delta: i32) -> Result<()> {
        let Some(current) = self.session.current_screen() else {
            return Ok(());
        };
        if let Lookup::Found(screen) = self.registry.lookup_mut(&current) {
            if screen.capabilities().paginated && screen.turn_page(delta) {
                self.redraw.request();
            }
        }
        Ok(())
    }

    pub fn play_pause(&mut self) -> Result<()> {
        self.playback.play_pause()
    }

    pub fn set_volume(&mut self, level: u8) -> Result<()> {
        let level = level.min(100);
        self.playback.set_volume(level)?;
        self.volume = level;
        self.redraw.request();
        Ok(())
    }

    pub fn toggle_mute(&mut self) -> Result<()> {
        let muted = !self.muted;
        self.playback.mute(muted)?;
        self.muted = muted;
        self.redraw.request();
        Ok(())
    }

    /// Stop playback and show the sleep screen
    pub fn sleep(&mut self) -> Result<()> {
        let session = self.session.clone();
        let _guard = session.lock();
        if session.player_state() == PlayerState::Sleeping {
            return Ok(());
        }

        info!("Going to sleep");
        let resume = session.current_screen().filter(|c| c != names::SLEEP);
        self.navigate(names::SLEEP, None, false)?;

        if let Err(e) = self.playback.stop() {
            warn!("Failed to stop playback before sleep: {:#}", e);
        }
        session.with(|s| {
            s.player_state = PlayerState::Sleeping;
            s.resume_screen = resume;
        });
        Ok(())
    }

    /// Leave the sleep screen for the screen shown before sleeping, whatever
    /// was visited in between
    pub fn wake_up(&mut self) -> Result<()> {
        let session = self.session.clone();
        let _guard = session.lock();
        if session.player_state() == PlayerState::Running {
            return Ok(());
        }

        let resume = session.with(|s| {
            s.player_state = PlayerState::Running;
            s.resume_screen.take()
        });
        info!("Waking up to {}", resume.as_deref().unwrap_or(names::HOME));
        match resume {
            Some(name) => self.navigate(&name, None, true),
            None => self.navigate(names::HOME, None, false),
        }
    }

    pub fn start_timer(&mut self) {
        if self.timer.is_none() {
            self.timer = Some(SleepTimer::start(self.session.clone(), self.queue.clone(), timer::TICK));
        }
    }

    /// Stop background work and playback, then clear the run flag
    pub fn shutdown(&mut self) -> Result<()> {
        info!("Shutting down");

        if let Some(mut timer) = self.timer.take() {
            timer.stop();
        }
        for (name, screen) in self.registry.player_screens_mut() {
            debug!("Stopping poller of {}", name);
            screen.stop_timer();
        }
        if let Err(e) = self.playback.stop() {
            warn!("Failed to stop playback: {:#}", e);
        }

        self.running.store(false, Ordering::SeqCst);
        if self.context.shutdown_grace_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.context.shutdown_grace_ms));
        }
        Ok(())
    }

    pub fn execute(&mut self, command: Command) -> Result<()> {
        debug!("Executing {:?}", command);
        match command {
            Command::Navigate { name, state } => self.navigate(&name, state, false),
            Command::GoBack => self.go_back(),
            Command::GoToPlayer => self.go_player(),
            Command::TurnPage(delta) => self.turn_page(delta),
            Command::PlayPause => self.play_pause(),
            Command::SetVolume(level) => self.set_volume(level),
            Command::Mute => self.toggle_mute(),
            Command::ChangeLanguage(language) => self.change_language(&language),
            Command::Sleep => self.sleep(),
            Command::WakeUp => self.wake_up(),
            Command::Shutdown => self.shutdown(),
            Command::Batch(commands) => {
                for command in commands {
                    self.execute(command)?;
                }
                Ok(())
            }
        }
    }

    /// Run every queued command, including ones queued while running. Failures
    /// are logged and skipped. Returns how many commands ran.
    pub fn process_commands(&mut self) -> usize {
        let mut processed = 0;
        while let Some(command) = self.queue.pop() {
            processed += 1;
            if let Err(e) = self.execute(command) {
                warn!("Command failed: {:#}", e);
            }
        }
        processed
    }

    /// Offer `event` to the visible screen, fall back to the global mapping,
    /// then run whatever got queued
    pub fn handle_input(&mut self, event: InputEvent) {
        let consumed = match self.session.current_screen() {
            Some(current) => match self.registry.lookup_mut(&current) {
                Lookup::Found(screen) => screen.handle_input(event),
                Lookup::Absent => false,
            },
            None => false,
        };

        if consumed {
            self.redraw.request();
        } else if let Some(command) = self.global_command(event) {
            self.queue.push(command);
        }

        self.process_commands();
    }

    fn global_command(&self, event: InputEvent) -> Option<Command> {
        let command = match event {
            InputEvent::Back => Command::GoBack,
            InputEvent::Home => Command::navigate_to(names::HOME),
            InputEvent::Player => Command::GoToPlayer,
            InputEvent::PageUp => Command::TurnPage(1),
            InputEvent::PageDown => Command::TurnPage(-1),
            InputEvent::PlayPause => Command::PlayPause,
            InputEvent::Mute => Command::Mute,
            InputEvent::VolumeUp => Command::SetVolume(self.volume.saturating_add(VOLUME_STEP).min(100)),
            InputEvent::VolumeDown => Command::SetVolume(self.volume.saturating_sub(VOLUME_STEP)),
            InputEvent::Shutdown => Command::Shutdown,
            _ => return None,
        };
        Some(command)
    }

    pub fn current_view(&self) -> Option<ScreenView> {
        let current = self.session.current_screen()?;
        self.registry.lookup(&current).found().map(|screen| screen.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::screen::Capabilities;
    use crate::playback::SimulatedPlayback;

    struct Plain(&'static str);

    impl Screen for Plain {
        fn name(&self) -> &str {
            self.0
        }
        fn capabilities(&self) -> Capabilities {
            Capabilities::menu()
        }
        fn set_current(&mut self, _state: Option<StateObject>) {}
        fn view(&self) -> ScreenView {
            ScreenView { title: self.0.to_string(), ..ScreenView::default() }
        }
    }

    fn controller() -> NavigationController {
        let mut factories = FactoryRegistry::new();
        for name in [names::HOME, names::SLEEP, names::ABOUT] {
            factories.register(name, move |_: &mut NavigationController| -> Result<Box<dyn Screen>> {
                Ok(Box::new(Plain(name)))
            });
        }
        let context = NavContext {
            shutdown_grace_ms: 0,
            ..NavContext::default()
        };
        NavigationController::new(context, factories, Arc::new(SimulatedPlayback::new()))
    }

    #[test]
    fn test_global_keys_queue_commands() {
        let mut nav = controller();
        nav.navigate(names::HOME, None, false).unwrap();
        nav.handle_input(InputEvent::Player);
        nav.handle_input(InputEvent::VolumeUp);
        assert_eq!(nav.volume(), NavContext::default().volume + VOLUME_STEP);
        nav.handle_input(InputEvent::Mute);
        assert!(nav.is_muted());
    }

    #[test]
    fn test_sleep_and_wake_round_trip() {
        let mut nav = controller();
        nav.navigate(names::HOME, None, false).unwrap();

        nav.queue().push(Command::Sleep);
        nav.process_commands();
        assert_eq!(nav.player_state(), PlayerState::Sleeping);
        assert_eq!(nav.current_screen().as_deref(), Some(names::SLEEP));

        // repeated sleep keeps the screen to wake up to
        nav.sleep().unwrap();
        nav.wake_up().unwrap();
        assert_eq!(nav.player_state(), PlayerState::Running);
        assert_eq!(nav.current_screen().as_deref(), Some(names::HOME));
        assert_eq!(nav.session().snapshot().resume_screen, None);
    }

    #[test]
    fn test_wake_up_ignores_screens_visited_while_asleep() {
        let mut nav = controller();
        nav.navigate(names::HOME, None, false).unwrap();
        nav.execute(Command::Sleep).unwrap();
        nav.navigate(names::ABOUT, None, false).unwrap();
        assert_eq!(nav.previous_screen().as_deref(), Some(names::SLEEP));

        nav.execute(Command::WakeUp).unwrap();

        assert_eq!(nav.player_state(), PlayerState::Running);
        assert_eq!(nav.current_screen().as_deref(), Some(names::HOME));
    }

    #[test]
    fn test_wake_up_without_prior_screen_goes_home() {
        let mut nav = controller();
        nav.sleep().unwrap();
        nav.wake_up().unwrap();
        assert_eq!(nav.current_screen().as_deref(), Some(names::HOME));
    }

    #[test]
    fn test_shutdown_clears_run_flag() {
        let mut nav = controller();
        nav.start_timer();
        nav.execute(Command::Shutdown).unwrap();
        assert!(!nav.is_running());
    }

    #[test]
    fn test_batch_stops_at_first_failure() {
        let mut nav = controller();
        let result = nav.execute(Command::batch(vec![
            Command::navigate_to(names::HOME),
            Command::navigate_to("nowhere"),
            Command::navigate_to(names::ABOUT),
        ]));
        assert!(result.is_err());
        assert_eq!(nav.current_screen().as_deref(), Some(names::HOME));
    }

    #[test]
    fn test_current_view_follows_navigation() {
        let mut nav = controller();
        assert!(nav.current_view().is_none());
        nav.navigate(names::ABOUT, None, false).unwrap();
        assert_eq!(nav.current_view().map(|v| v.title), Some(names::ABOUT.to_string()));
        assert!(nav.take_redraw());
        assert!(!nav.take_redraw());
    }
}
