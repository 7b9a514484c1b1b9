//! Stringly CLI
//!
//! Serves the Stringly Typed Store over HTTP and MCP, and inspects the data
//! directory from the command line.

use anyhow::Result;
use clap::Parser;
use stringly_core::error::exit_codes;
use stringly_core::{Config, NoteStore, Store, StringlyError};
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod server;

use app::{Cli, Commands};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so `stringly mcp` keeps stdout for the protocol
    let default_level = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<StringlyError>()
            .map(StringlyError::exit_code)
            .unwrap_or(exit_codes::GENERAL_ERROR);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let store = Store::open(&config.data_dir)?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run(args, config, store).await,
        Commands::Mcp => stringly_mcp::start_server(NoteStore::new(store)).await,
        Commands::Ls => commands::ls::run(&store, cli.format).await,
        Commands::Get(args) => commands::get::run(args, &store, cli.format).await,
        Commands::Rm(args) => commands::rm::run(args, &store).await,
    }
}
