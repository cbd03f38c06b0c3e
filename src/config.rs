use anyhow::{Context, Result};
use chrono::NaiveTime;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::nav::widgets::GridLayout;
use crate::ui::theme::ThemeVariant;

/// Playback modes the appliance can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaybackMode {
    Files,
    Radio,
    Podcasts,
    Audiobooks,
    Cd,
    Collection,
    Airplay,
    SpotifyConnect,
}

impl PlaybackMode {
    pub const ALL: [PlaybackMode; 8] = [
        PlaybackMode::Files,
        PlaybackMode::Radio,
        PlaybackMode::Podcasts,
        PlaybackMode::Audiobooks,
        PlaybackMode::Cd,
        PlaybackMode::Collection,
        PlaybackMode::Airplay,
        PlaybackMode::SpotifyConnect,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PlaybackMode::Files => "Files",
            PlaybackMode::Radio => "Radio",
            PlaybackMode::Podcasts => "Podcasts",
            PlaybackMode::Audiobooks => "Audiobooks",
            PlaybackMode::Cd => "CD",
            PlaybackMode::Collection => "Collection",
            PlaybackMode::Airplay => "AirPlay",
            PlaybackMode::SpotifyConnect => "Spotify Connect",
        }
    }

    /// Key used in the `[library]` table and in state objects
    pub fn key(self) -> &'static str {
        match self {
            PlaybackMode::Files => "files",
            PlaybackMode::Radio => "radio",
            PlaybackMode::Podcasts => "podcasts",
            PlaybackMode::Audiobooks => "audiobooks",
            PlaybackMode::Cd => "cd",
            PlaybackMode::Collection => "collection",
            PlaybackMode::Airplay => "airplay",
            PlaybackMode::SpotifyConnect => "spotify-connect",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }
}

/// Sleep, wake-up and power-off schedule. Times are `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerSettings {
    #[serde(default)]
    pub sleep: bool,
    #[serde(default)]
    pub sleep_time: Option<String>,
    #[serde(default)]
    pub wake_up: bool,
    #[serde(default)]
    pub wake_up_time: Option<String>,
    #[serde(default)]
    pub poweroff: bool,
    #[serde(default)]
    pub poweroff_time: Option<String>,
}

impl TimerSettings {
    pub fn parse_time(value: &str) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(value.trim(), "%H:%M")
            .with_context(|| format!("Invalid time '{}', expected HH:MM", value))
    }

    pub fn sleep_at(&self) -> Result<Option<NaiveTime>> {
        Self::enabled_time(self.sleep, self.sleep_time.as_deref())
    }

    pub fn wake_up_at(&self) -> Result<Option<NaiveTime>> {
        Self::enabled_time(self.wake_up, self.wake_up_time.as_deref())
    }

    pub fn poweroff_at(&self) -> Result<Option<NaiveTime>> {
        Self::enabled_time(self.poweroff, self.poweroff_time.as_deref())
    }

    fn enabled_time(enabled: bool, value: Option<&str>) -> Result<Option<NaiveTime>> {
        match (enabled, value) {
            (true, Some(v)) => Self::parse_time(v).map(Some),
            _ => Ok(None),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.sleep_at()?;
        self.wake_up_at()?;
        self.poweroff_at()?;
        Ok(())
    }
}

/// Menu grid shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSettings {
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
    #[serde(default)]
    pub layout: GridLayout,
}

fn default_rows() -> usize {
    3
}

fn default_cols() -> usize {
    3
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            layout: GridLayout::default(),
        }
    }
}

/// Entry of the demo library shown by browsers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_mode")]
    pub mode: PlaybackMode,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    /// Enabled flag per mode key; modes missing here are enabled
    #[serde(default)]
    pub modes: BTreeMap<String, bool>,
    #[serde(default = "default_volume")]
    pub volume: u8,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub timer: TimerSettings,
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub theme: ThemeVariant,
    /// Screens kept when the registry is reset on a language change
    #[serde(default)]
    pub always_keep: Vec<String>,
    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
    /// Items per browser, keyed by mode key
    #[serde(default)]
    pub library: BTreeMap<String, Vec<LibraryEntry>>,
}

fn default_mode() -> PlaybackMode {
    PlaybackMode::Radio
}

fn default_language() -> String {
    "English-USA".to_string()
}

fn default_languages() -> Vec<String> {
    vec!["English-USA".to_string(), "German".to_string(), "French".to_string()]
}

fn default_volume() -> u8 {
    40
}

fn default_shutdown_grace_ms() -> u64 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            language: default_language(),
            languages: default_languages(),
            modes: BTreeMap::new(),
            volume: default_volume(),
            mute: false,
            timer: TimerSettings::default(),
            grid: GridSettings::default(),
            theme: ThemeVariant::default(),
            always_keep: Vec::new(),
            shutdown_grace_ms: default_shutdown_grace_ms(),
            library: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("mediadeck")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".mediadeck")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from `path`, falling back to defaults when the file is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", path);

        if !path.exists() {
            info!("Config file {:?} doesn't exist, using defaults", path);
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config = Self::from_toml(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        debug!("Loaded config with {} library sections", config.library.len());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.timer.validate()?;
        if !config.is_enabled(config.mode) {
            anyhow::bail!("Current mode '{}' is disabled", config.mode.key());
        }
        Ok(config)
    }

    pub fn is_enabled(&self, mode: PlaybackMode) -> bool {
        self.modes.get(mode.key()).copied().unwrap_or(true)
    }

    pub fn enabled_modes(&self) -> Vec<PlaybackMode> {
        PlaybackMode::ALL.into_iter().filter(|m| self.is_enabled(*m)).collect()
    }

    /// The narrow, read-only slice the navigation core depends on
    pub fn nav_context(&self) -> NavContext {
        NavContext {
            mode: self.mode,
            language: self.language.clone(),
            enabled_modes: self.enabled_modes(),
            volume: self.volume.min(100),
            mute: self.mute,
            timer: self.timer.clone(),
            rows: self.grid.rows.max(1),
            cols: self.grid.cols.max(1),
            layout: self.grid.layout,
            always_keep: self.always_keep.clone(),
            shutdown_grace_ms: self.shutdown_grace_ms,
        }
    }
}

/// Configuration values consumed by the navigation core, injected at
/// construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavContext {
    pub mode: PlaybackMode,
    pub language: String,
    pub enabled_modes: Vec<PlaybackMode>,
    pub volume: u8,
    pub mute: bool,
    pub timer: TimerSettings,
    pub rows: usize,
    pub cols: usize,
    pub layout: GridLayout,
    pub always_keep: Vec<String>,
    pub shutdown_grace_ms: u64,
}

impl Default for NavContext {
    fn default() -> Self {
        Config::default().nav_context()
    }
}

impl NavContext {
    pub fn is_enabled(&self, mode: PlaybackMode) -> bool {
        self.enabled_modes.contains(&mode)
    }
}
