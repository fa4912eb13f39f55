//! Link Vault CLI
//!
//! A command-line interface for saving links, searching them and sharing
//! a read-only view of the vault. Goes through the same services and
//! auth gate as the HTTP server.

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use linkvault_core::Database;

#[derive(Parser)]
#[command(name = "linkvault")]
#[command(author, version, about = "Save, search and share links", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: table (default) or json
    #[arg(long, global = true, default_value = "table")]
    format: output::OutputFormat,

    /// Suppress progress messages; token and hash commands print only the value
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Override database path (or set LINKVAULT_DB_PATH env var)
    #[arg(long, env = "LINKVAULT_DB_PATH", global = true)]
    db: Option<PathBuf>,

    /// Identity token from `account signin` (or set LINKVAULT_TOKEN env var)
    #[arg(long, env = "LINKVAULT_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign up, sign in and manage your account
    Account {
        #[command(subcommand)]
        action: commands::account::AccountAction,
    },

    /// Save, list, search and delete links
    Content {
        #[command(subcommand)]
        action: commands::content::ContentAction,
    },

    /// Share your vault or view someone else's
    Share {
        #[command(subcommand)]
        action: commands::share::ShareAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let db = match cli.db {
        Some(path) => Database::open(path).await?,
        None => Database::new().await?,
    };

    // The signing secret is loaded per command, so `share show` runs without one
    let ctx = commands::Context {
        db,
        format: cli.format,
        quiet: cli.quiet,
        token: cli.token,
    };

    match cli.command {
        Commands::Account { action } => commands::account::execute(&ctx, action).await,
        Commands::Content { action } => commands::content::execute(&ctx, action).await,
        Commands::Share { action } => commands::share::execute(&ctx, action).await,
    }
}
