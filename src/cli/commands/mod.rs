pub mod run;
pub mod screens;

pub use run::{RunArgs, run_command};
pub use screens::{ScreensArgs, screens_command};

use anyhow::Result;
use std::path::Path;

use crate::config::Config;

/// Config from `--config`, or the default location
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
