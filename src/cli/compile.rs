//! `cbuild compile` - run the generation core over a run file.
//!
//! A run file is JSON describing one generation run:
//!
//! ```json
//! {
//!   "config": { "lang_prefix": "COM_SHOP" },
//!   "views": [{ "name_single_code": "item", "customtabs": "[{\"name\": \"Extra\"}]" }],
//!   "aliases": { "templates": [{ "name": "head", "html": "<thead/>" }], "layouts": [] },
//!   "placeholders": { "Component": "Shop" },
//!   "custom_code": { "footer": "<footer/>" }
//! }
//! ```
//!
//! `config` is only used when no config file is given with `--config` or
//! `CBUILD_CONFIG`.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::OutputFormat;
use crate::alias::{AliasSet, AliasStore};
use crate::compiler::{CompilerRun, ViewSummary};
use crate::config::CompilerConfig;
use crate::core::CompilerError;
use crate::language::LanguageTable;
use crate::model::ViewItem;

/// Input of one `compile` invocation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunFile {
    /// Inline compiler config, used when no config file is given
    #[serde(default)]
    pub config: Option<CompilerConfig>,
    /// Views to compile, in order
    pub views: Vec<ViewItem>,
    /// Template and layout aliases
    #[serde(default)]
    pub aliases: AliasSet,
    /// Run-wide placeholder values, keyed without delimiters
    #[serde(default)]
    pub placeholders: BTreeMap<String, String>,
    /// Snippets for inline `[CUSTOMCODE=<id>]` references
    #[serde(default)]
    pub custom_code: BTreeMap<String, String>,
}

impl RunFile {
    /// Parse run file text. `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::RunFileError`] when the text is not a valid
    /// run file.
    pub fn parse(content: &str, path: &Path) -> Result<Self, CompilerError> {
        serde_json::from_str(content).map_err(|e| CompilerError::RunFileError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Read and parse a run file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read run file {}", path.display()))?;
        Ok(Self::parse(&content, path)?)
    }
}

/// Result of a compile, as printed with `--format json`.
#[derive(Debug, Serialize)]
struct CompileReport<'a> {
    views: Vec<ViewSummary>,
    registry: Value,
    language: &'a LanguageTable,
    checksum: String,
}

/// Arguments of `cbuild compile`.
#[derive(Args, Debug)]
pub struct CompileCommand {
    /// The run file (JSON)
    pub run_file: PathBuf,

    /// Previously compiled file to capture custom code regions from
    /// (repeatable)
    #[arg(long)]
    pub prior: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl CompileCommand {
    /// Run the command.
    ///
    /// # Errors
    ///
    /// Fails when the run file or config cannot be loaded, or when a view
    /// fails to compile.
    pub async fn execute(self, config_path: Option<&Path>, quiet: bool) -> Result<()> {
        let run_file = RunFile::load(&self.run_file).await?;
        let config = resolve_config(config_path, run_file.config.clone()).await?;

        let mut run = CompilerRun::new(config);
        for (key, value) in &run_file.placeholders {
            run.placeholder_mut().set(key, value.as_str());
        }
        for (id, code) in &run_file.custom_code {
            run.customcode_mut().register(id.as_str(), code.as_str());
        }
        for prior in &self.prior {
            let content = tokio::fs::read_to_string(prior)
                .await
                .with_context(|| format!("Failed to read prior output {}", prior.display()))?;
            run.customcode_mut().capture(&content);
        }

        let aliases = AliasStore::from(run_file.aliases);
        let mut summaries = Vec::with_capacity(run_file.views.len());
        for mut item in run_file.views {
            let summary = run
                .compile_view(&mut item, &aliases)
                .with_context(|| format!("Failed to compile view '{}'", item.name_single_code))?;
            summaries.push(summary);
        }

        let checksum = run.registry().checksum()?;
        match self.format {
            OutputFormat::Json => {
                let report = CompileReport {
                    views: summaries,
                    registry: run.registry().to_value(),
                    language: run.language(),
                    checksum,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text if !quiet => print_text(&run, &summaries, &checksum),
            OutputFormat::Text => {}
        }

        Ok(())
    }
}

/// The config file wins over the run file's inline config.
async fn resolve_config(path: Option<&Path>, inline: Option<CompilerConfig>) -> Result<CompilerConfig> {
    if let Some(path) = path {
        return CompilerConfig::load_from(path).await;
    }
    let Some(config) = inline else {
        return Err(CompilerError::ConfigError {
            message: "No compiler config: pass --config, set CBUILD_CONFIG or add a 'config' object to the run file"
                .to_string(),
        }
        .into());
    };
    config.validate()?;
    Ok(config)
}

fn print_text(run: &CompilerRun, summaries: &[ViewSummary], checksum: &str) {
    for summary in summaries {
        let references = if summary.found {
            "references resolved".green()
        } else {
            "no references".dimmed()
        };
        println!(
            "{} {} ({} tab(s), {})",
            "✓".green(),
            summary.view.bold(),
            summary.tabs,
            references
        );
    }

    let config = run.config();
    println!();
    println!(
        "{} {} language string(s) for {}",
        "→".cyan(),
        run.language().strings_for(config.build_target).len(),
        config.build_target
    );
    println!("{} registry {}", "→".cyan(), checksum.dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_run_file() {
        let run_file = RunFile::parse(r#"{"views": [{"name_single_code": "item"}]}"#, Path::new("run.json")).unwrap();
        assert_eq!(run_file.views.len(), 1);
        assert!(run_file.config.is_none());
        assert!(run_file.aliases.templates.is_empty());
    }

    #[test]
    fn test_parse_rejects_missing_views() {
        let error = RunFile::parse("{}", Path::new("run.json")).unwrap_err();
        assert!(matches!(error, CompilerError::RunFileError { .. }));
        assert!(error.to_string().contains("run.json"));
    }

    #[tokio::test]
    async fn test_inline_config_is_validated() {
        let error = resolve_config(None, Some(CompilerConfig::new(" "))).await.unwrap_err();
        assert!(error.to_string().contains("lang_prefix"));

        assert!(resolve_config(None, None).await.is_err());
    }

    #[tokio::test]
    async fn test_config_file_wins() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "lang_prefix = \"COM_FILE\"")?;

        let config = resolve_config(Some(file.path()), Some(CompilerConfig::new("COM_INLINE"))).await?;
        assert_eq!(config.lang_prefix, "COM_FILE");
        Ok(())
    }
}
