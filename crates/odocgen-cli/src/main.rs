//! # odocgen CLI
//!
//! Terminal front-end for the odocgen documentation index.
//!
//! ## Commands
//!
//! - `odocgen query <index> <pattern>` - Print the entries a query leaves visible
//! - `odocgen interactive <index>` - Live-filter the index in a TUI
//! - `odocgen render <index> -o index.html` - Write the searchable index page
//! - `odocgen status <index>` - Show index statistics and broken invariants
//!
//! ## Example Usage
//!
//! ```bash
//! # Which methods mention "write"?
//! odocgen query out/db.js write
//!
//! # Filter as you type
//! odocgen interactive out/db.js
//! ```

mod app;
mod commands;
mod tui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// odocgen - searchable index of generated class documentation
#[derive(Parser)]
#[command(name = "odocgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the entries whose names contain a pattern
    Query {
        /// Index file written by the generator (db.js or JSON)
        index: PathBuf,

        /// Case-sensitive substring to match against entry names
        pattern: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Start interactive live-filter mode
    #[command(alias = "i")]
    Interactive {
        /// Index file written by the generator (db.js or JSON)
        index: PathBuf,
    },

    /// Write the index page as standalone HTML with an in-browser live filter
    Render {
        /// Index file written by the generator (db.js or JSON)
        index: PathBuf,

        /// Output HTML file
        #[arg(short, long)]
        output: PathBuf,

        /// Query pre-filled in the search box
        #[arg(long, default_value = "")]
        query: String,

        /// Documented branch shown in the page title
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// Show index statistics and validation issues
    Status {
        /// Index file written by the generator (db.js or JSON)
        index: PathBuf,
    },
}

#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => odocgen_core::Config::load_from(path)?,
        None => odocgen_core::Config::load()?,
    };

    // Setup logging; the TUI owns the terminal, so only errors get through there
    let interactive = matches!(cli.command, Commands::Interactive { .. });
    let log_level = if cli.quiet || interactive {
        "error"
    } else {
        match cli.verbose {
            0 => config.general.log_level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    // Execute command
    match cli.command {
        Commands::Query {
            index,
            pattern,
            output,
        } => commands::query::run(config, &index, &pattern, output),
        Commands::Interactive { index } => tui::run(config, &index),
        Commands::Render {
            index,
            output,
            query,
            branch,
        } => commands::render::run(config, &index, &output, &query, branch),
        Commands::Status { index } => commands::status::run(config, &index),
    }
}
