use super::commands::run::RunArgs;
use super::commands::screens::ScreensArgs;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mediadeck")]
#[command(about = "Grid-menu front end for a small media player appliance")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive menu UI
    Run(RunArgs),
    /// List the screens the current configuration can build
    Screens(ScreensArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_run_options() {
        let cli = Cli::try_parse_from(["mediadeck", "run", "--config", "/tmp/deck.toml", "--screen", "radio_browser"]).unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.config.as_deref(), Some(std::path::Path::new("/tmp/deck.toml")));
                assert_eq!(args.screen.as_deref(), Some("radio_browser"));
            }
            Commands::Screens(_) => panic!("expected run"),
        }
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["mediadeck", "run"]).unwrap();
        assert!(matches!(cli.command, Commands::Run(RunArgs { config: None, screen: None })));
    }
}
