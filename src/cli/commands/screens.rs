use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::screens::{mode_screens, register_all};

#[derive(Args)]
pub struct ScreensArgs {
    /// Config file to read instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn screens_command(args: ScreensArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let factories = register_all(&config);

    println!("Screens ({}):", factories.len());
    for name in factories.names() {
        println!("  {}", name);
    }

    println!();
    println!("Modes:");
    for mode in config.enabled_modes() {
        let screens = mode_screens(mode);
        let marker = if mode == config.mode { "*" } else { " " };
        println!("{} {:<16} -> {}", marker, mode.label(), screens.entry());
    }
    Ok(())
}
