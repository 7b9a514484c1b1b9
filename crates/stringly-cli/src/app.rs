//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use stringly_core::RunMode;

#[derive(Parser)]
#[command(name = "stringly")]
#[command(
    author,
    version,
    about = "Stringly Typed Store: JSON resources and notes on local disk"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the JSON documents
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to a YAML config file
    #[arg(long, global = true, env = "STRINGLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (REST resources and MCP over SSE)
    Serve(ServeArgs),

    /// Run the MCP server over stdio
    Mcp,

    /// List stored documents
    Ls,

    /// Print a document
    Get(IdArgs),

    /// Delete a document
    #[command(alias = "delete")]
    Rm(IdArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Serve over local TLS (development mode only)
    #[arg(long)]
    pub https: bool,

    /// Execution mode (development or production)
    #[arg(long)]
    pub mode: Option<RunMode>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Document id
    pub id: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
}
