//! `cbuild scan` - list template and layout references in a markup file.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::OutputFormat;
use crate::templatelayout::{References, scan};

/// Arguments of `cbuild scan`.
#[derive(Args, Debug)]
pub struct ScanCommand {
    /// Markup file to scan
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ScanCommand {
    /// Run the command.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read.
    pub async fn execute(self, quiet: bool) -> Result<()> {
        let content = tokio::fs::read_to_string(&self.file)
            .await
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        let references = scan(&content);
        tracing::debug!(
            "Found {} template and {} layout reference(s) in {}",
            references.templates.len(),
            references.layouts.len(),
            self.file.display()
        );

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&references)?),
            OutputFormat::Text if !quiet => print_text(&references),
            OutputFormat::Text => {}
        }
        Ok(())
    }
}

fn print_text(references: &References) {
    if references.is_empty() {
        println!("{}", "No template or layout references found".dimmed());
        return;
    }
    for name in &references.templates {
        println!("{} {name}", "template".cyan());
    }
    for name in &references.layouts {
        println!("{} {name}", "layout".yellow());
    }
}
