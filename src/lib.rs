pub mod cli;
pub mod config;
pub mod nav;
pub mod playback;
pub mod screens;
pub mod ui;
