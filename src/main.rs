use anyhow::Result;
use clap::Parser;
use log::info;

use mediadeck::cli::commands::{run_command, screens_command};
use mediadeck::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("mediadeck.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting mediadeck");

    match cli.command {
        Commands::Run(args) => run_command(args).await,
        Commands::Screens(args) => screens_command(args),
    }
}
