//! Command-line interface for the component builder.
//!
//! # Commands
//!
//! - `compile` - run the generation core over a JSON run file and print the
//!   resulting registry and language strings
//! - `scan` - list the template and layout references in a markup file
//!
//! # Global Options
//!
//! - `--verbose` - enable debug logging
//! - `--quiet` - suppress everything except errors
//! - `--config` - path to the compiler config (TOML); also read from
//!   `CBUILD_CONFIG`
//!
//! # Example
//!
//! ```bash
//! cbuild --config cbuild.toml compile run.json --prior admin/views/items/tmpl/edit.php
//! cbuild scan admin/views/items/tmpl/default.php --format json
//! ```

mod compile;
mod scan;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::CONFIG_ENV_VAR;

pub use compile::{CompileCommand, RunFile};
pub use scan::ScanCommand;

/// Output format shared by the commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored output
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Main CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "cbuild",
    about = "Component builder - compile component metadata into extension source",
    version,
    author,
    long_about = "Runs the component builder generation core: compiles custom tabs, \
                  resolves template and layout references and preserves custom code regions."
)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the compiler config file (TOML)
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile the views of a run file
    Compile(CompileCommand),

    /// List template and layout references in a markup file
    Scan(ScanCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Returns the command's error; `main` renders it with
    /// [`user_friendly_error`](crate::core::user_friendly_error).
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        match self.command {
            Commands::Compile(cmd) => cmd.execute(self.config.as_deref(), self.quiet).await,
            Commands::Scan(cmd) => cmd.execute(self.quiet).await,
        }
    }

    /// The log filter implied by the flags, `None` when logging is off.
    fn log_filter(&self) -> Option<EnvFilter> {
        if self.quiet {
            None
        } else if self.verbose {
            Some(EnvFilter::new("component_builder=debug"))
        } else {
            Some(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        }
    }

    fn init_logging(&self) {
        let Some(filter) = self.log_filter() else {
            return;
        };
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}
