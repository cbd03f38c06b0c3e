//! Factories for every built-in screen

use anyhow::Result;
use std::sync::Arc;

use crate::config::{Config, PlaybackMode};
use crate::nav::command::Command;
use crate::nav::controller::NavigationController;
use crate::nav::factory::FactoryRegistry;
use crate::nav::listeners::{Listener, ListenerKey};
use crate::nav::registry::Lookup;
use crate::nav::screen::Screen;
use crate::nav::state::{self, StateObject};
use crate::nav::widgets::{GridItem, GridLayout, Navigator, ResumeStrategy};
use crate::screens::content::{LibraryContent, StaticContent};
use crate::screens::info_screen::{InfoScreen, WAKE_UP};
use crate::screens::menu_screen::MenuScreen;
use crate::screens::names;
use crate::screens::player_screen::PlayerScreen;

/// Screens belonging to one playback mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeScreens {
    pub browser: Option<&'static str>,
    pub player: &'static str,
    pub resume: ResumeStrategy,
}

impl ModeScreens {
    /// Screen opened from the home menu
    pub fn entry(&self) -> &'static str {
        self.browser.unwrap_or(self.player)
    }
}

pub fn mode_screens(mode: PlaybackMode) -> ModeScreens {
    use ResumeStrategy::{Ceil, FirstPageShortcut};

    let (browser, player, resume) = match mode {
        PlaybackMode::Files => (Some(names::FILE_BROWSER), names::FILE_PLAYER, Ceil),
        PlaybackMode::Radio => (Some(names::RADIO_BROWSER), names::RADIO_PLAYER, FirstPageShortcut),
        PlaybackMode::Podcasts => (Some(names::PODCASTS), names::PODCAST_PLAYER, FirstPageShortcut),
        PlaybackMode::Audiobooks => (Some(names::AUDIOBOOKS), names::AUDIOBOOK_PLAYER, Ceil),
        PlaybackMode::Cd => (Some(names::CD_TRACKS), names::CD_PLAYER, Ceil),
        PlaybackMode::Collection => (Some(names::COLLECTION), names::COLLECTION_PLAYER, Ceil),
        PlaybackMode::Airplay => (None, names::AIRPLAY_PLAYER, Ceil),
        PlaybackMode::SpotifyConnect => (None, names::SPOTIFY_CONNECT_PLAYER, Ceil),
    };
    ModeScreens { browser, player, resume }
}

fn home_title(language: &str) -> &'static str {
    match language {
        "German" => "Start",
        "French" => "Accueil",
        _ => "Home",
    }
}

/// Factories for the fixed screens plus every enabled mode
pub fn register_all(config: &Config) -> FactoryRegistry {
    let mut factories = FactoryRegistry::new();

    factories.register(names::HOME, build_home);
    factories.register(names::ABOUT, build_about);
    factories.register(names::SLEEP, build_sleep);

    let languages = config.languages.clone();
    factories.register(names::LANGUAGE, move |nav: &mut NavigationController| {
        build_language(nav, &languages)
    });

    for mode in config.enabled_modes() {
        let screens = mode_screens(mode);

        if let Some(browser) = screens.browser {
            let entries = config.library.get(mode.key()).cloned().unwrap_or_default();
            factories.register(browser, move |nav: &mut NavigationController| {
                build_browser(nav, mode, &screens, LibraryContent::new(mode, entries.clone()))
            });
        }

        factories.register(screens.player, move |nav: &mut NavigationController| {
            build_player(nav, mode, &screens)
        });
    }

    factories
}

fn grid_shape(nav: &NavigationController) -> (usize, usize, GridLayout) {
    let ctx = nav.context();
    (ctx.rows, ctx.cols, ctx.layout)
}

fn build_home(nav: &mut NavigationController) -> Result<Box<dyn Screen>> {
    let queue = nav.queue().clone();
    let language = nav.context().language.clone();

    let mut items: Vec<GridItem> = nav
        .context()
        .enabled_modes
        .iter()
        .map(|mode| {
            let target = mode_screens(*mode).entry();
            let queue = queue.clone();
            GridItem::new(mode.label(), StateObject::new().with(state::MODE, mode.key()))
                .with_id(mode.key())
                .with_listener(Arc::new(move |_state: Option<StateObject>| {
                    queue.push(Command::navigate_to(target))
                }))
        })
        .collect();

    let language_queue = queue.clone();
    items.push(
        GridItem::new(language.as_str(), StateObject::new())
            .with_id(names::LANGUAGE)
            .with_listener(Arc::new(move |_state: Option<StateObject>| {
                language_queue.push(Command::navigate_to(names::LANGUAGE))
            })),
    );

    let screen = MenuScreen::new(
        names::HOME,
        home_title(&language),
        grid_shape(nav),
        Navigator::paginated().with_extra(ListenerKey::Info, "Info"),
        nav.redraw_signal(),
        nav.standard_listeners(),
        Box::new(StaticContent::new(items)),
    )
    .with_reads(&[]);
    Ok(Box::new(screen))
}

fn build_language(nav: &mut NavigationController, languages: &[String]) -> Result<Box<dyn Screen>> {
    let mut listeners = nav.standard_listeners();
    if let Some(change) = listeners.get(ListenerKey::Language).cloned() {
        listeners.bind(ListenerKey::Select, change);
    }

    let current = nav.context().language.clone();
    let items = languages
        .iter()
        .map(|lang| {
            let label = if *lang == current { format!("* {}", lang) } else { lang.clone() };
            GridItem::new(label, StateObject::new().with(state::LANGUAGE, lang.as_str())).with_id(lang.as_str())
        })
        .collect();

    let screen = MenuScreen::new(
        names::LANGUAGE,
        "Language",
        grid_shape(nav),
        Navigator::paginated(),
        nav.redraw_signal(),
        listeners,
        Box::new(StaticContent::new(items)),
    )
    .with_reads(&[]);
    Ok(Box::new(screen))
}

fn build_about(nav: &mut NavigationController) -> Result<Box<dyn Screen>> {
    let ctx = nav.context();
    let modes: Vec<&str> = ctx.enabled_modes.iter().map(|m| m.label()).collect();
    let lines = vec![
        format!("mediadeck {}", env!("CARGO_PKG_VERSION")),
        format!("Language: {}", ctx.language),
        format!("Modes: {}", modes.join(", ")),
    ];
    Ok(Box::new(InfoScreen::new(names::ABOUT, "About", lines, nav.standard_listeners())))
}

fn build_sleep(nav: &mut NavigationController) -> Result<Box<dyn Screen>> {
    let mut listeners = nav.standard_listeners();
    listeners.bind_command(WAKE_UP, nav.queue(), |_| Command::WakeUp);

    let screen = InfoScreen::new(names::SLEEP, "Sleeping", vec!["Touch to wake up".to_string()], listeners)
        .with_navigator(Navigator::new(Vec::new()))
        .on_select(WAKE_UP);
    Ok(Box::new(screen))
}

fn build_browser(
    nav: &mut NavigationController,
    mode: PlaybackMode,
    screens: &ModeScreens,
    content: LibraryContent,
) -> Result<Box<dyn Screen>> {
    let Some(name) = screens.browser else {
        anyhow::bail!("{} has no browser", mode.label());
    };

    let player = screens.player;
    let mut listeners = nav.standard_listeners();
    listeners.bind_command(ListenerKey::Select, nav.queue(), move |state| Command::Navigate {
        name: player.to_string(),
        state,
    });
    if nav.registry().contains(player) {
        listeners.bind(ListenerKey::Player, player_button(nav, player));
    }

    let screen = MenuScreen::new(
        name,
        mode.label(),
        grid_shape(nav),
        Navigator::paginated(),
        nav.redraw_signal(),
        listeners,
        Box::new(content),
    )
    .with_resume(screens.resume);
    Ok(Box::new(screen))
}

fn build_player(nav: &mut NavigationController, mode: PlaybackMode, screens: &ModeScreens) -> Result<Box<dyn Screen>> {
    // An already built browser gets a Player button that jumps straight here
    if let Some(browser) = screens.browser {
        let listener = player_button(nav, screens.player);
        if let Lookup::Found(screen) = nav.lookup_mut(browser) {
            screen.bind(ListenerKey::Player, listener);
        }
    }

    let screen = PlayerScreen::new(
        screens.player,
        mode.label(),
        nav.standard_listeners(),
        nav.playback(),
        nav.track_cache(),
        nav.redraw_signal(),
    );
    Ok(Box::new(screen))
}

/// Player button bound to one specific player instead of the active one
fn player_button(nav: &NavigationController, player: &'static str) -> Listener {
    let queue = nav.queue().clone();
    Arc::new(move |_state: Option<StateObject>| queue.push(Command::navigate_to(player)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_modes_have_no_factories() {
        let mut config = Config::default();
        config.modes.insert(PlaybackMode::Cd.key().to_string(), false);
        let factories = register_all(&config);

        assert!(factories.contains(names::HOME));
        assert!(factories.contains(names::RADIO_BROWSER));
        assert!(factories.contains(names::AIRPLAY_PLAYER));
        assert!(!factories.contains(names::CD_TRACKS));
        assert!(!factories.contains(names::CD_PLAYER));
    }

    #[test]
    fn test_streaming_modes_open_their_player() {
        assert_eq!(mode_screens(PlaybackMode::Airplay).entry(), names::AIRPLAY_PLAYER);
        assert_eq!(mode_screens(PlaybackMode::Radio).entry(), names::RADIO_BROWSER);
        assert_eq!(mode_screens(PlaybackMode::Radio).resume, ResumeStrategy::FirstPageShortcut);
    }
}
