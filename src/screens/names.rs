//! Registry names of the built-in screens

pub const HOME: &str = "home";
pub const ABOUT: &str = "about";
pub const LANGUAGE: &str = "language";
pub const SLEEP: &str = "sleep";

pub const FILE_BROWSER: &str = "file_browser";
pub const FILE_PLAYER: &str = "file_player";
pub const RADIO_BROWSER: &str = "radio_browser";
pub const RADIO_PLAYER: &str = "radio_player";
pub const PODCASTS: &str = "podcasts";
pub const PODCAST_PLAYER: &str = "podcast_player";
pub const AUDIOBOOKS: &str = "audiobooks";
pub const AUDIOBOOK_PLAYER: &str = "audiobook_player";
pub const CD_TRACKS: &str = "cd_tracks";
pub const CD_PLAYER: &str = "cd_player";
pub const COLLECTION: &str = "collection";
pub const COLLECTION_PLAYER: &str = "collection_player";
pub const AIRPLAY_PLAYER: &str = "airplay_player";
pub const SPOTIFY_CONNECT_PLAYER: &str = "spotify_connect_player";
