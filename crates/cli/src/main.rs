//! Taxsync CLI - taxsync command

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tx_core::TaxonomyKind;

mod cmd;
mod system_config;
mod util;

/// Taxsync - Keep local CAHNRS unit and topic taxonomies in step with the remote service
#[derive(Parser)]
#[command(name = "taxsync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level regardless of config
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed schema markers and sync every stale taxonomy
    Activate {
        /// Read units.json/topics.json from this directory instead of the service
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Open a taxonomy's management view (syncs it first if stale)
    View {
        /// Taxonomy: units or topics
        kind: TaxonomyKind,
        /// Print the HTML listing instead of an outline
        #[arg(long)]
        html: bool,
        /// Read snapshots from this directory instead of the service
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Sync one taxonomy, or both
    Sync {
        /// Taxonomy: units or topics (default: both)
        kind: Option<TaxonomyKind>,
        /// Run even if the schema marker is current
        #[arg(short, long)]
        force: bool,
        /// Read snapshots from this directory instead of the service
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Add a term to the local taxonomy by hand
    Add {
        /// Taxonomy: units or topics
        kind: TaxonomyKind,
        /// Term name
        name: String,
        /// Name of an existing parent term (default: top level)
        #[arg(long)]
        parent: Option<String>,
    },
    /// Show schema markers and term counts
    Status,
    /// View or edit the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// List all configuration values
    List,
    /// Print a single value
    Get {
        /// Key such as remote.base_url
        key: String,
    },
    /// Set a value and save
    Set {
        /// Key such as remote.timeout_secs
        key: String,
        /// New value
        value: String,
    },
    /// Print the config file location
    Path {
        /// Write a default config file if none exists
        #[arg(long)]
        create: bool,
    },
    /// Print an annotated example config
    Example,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config subcommands load the file themselves
    let config = system_config::load();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        config
            .as_ref()
            .ok()
            .and_then(|c| c.log_level().ok())
            .unwrap_or(tracing::Level::WARN)
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Activate { from } => cmd::activate::run(&config?, from.as_deref()),
        Commands::View { kind, html, from } => cmd::view::run(&config?, kind, html, from.as_deref()),
        Commands::Sync { kind, force, from } => cmd::sync::run(&config?, kind, force, from.as_deref()),
        Commands::Add { kind, name, parent } => cmd::add::run(&config?, kind, &name, parent.as_deref()),
        Commands::Status => cmd::status::run(&config?),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::List => cmd::config::run_list(),
            ConfigCommands::Get { key } => cmd::config::run_get(&key),
            ConfigCommands::Set { key, value } => cmd::config::run_set(&key, &value),
            ConfigCommands::Path { create } => cmd::config::run_path(create),
            ConfigCommands::Example => cmd::config::run_example(),
        },
    }
}
