//! Compiler configuration for a generation run.
//!
//! The configuration carries the few settings the generation core reads:
//! the language-key prefix, the build target being compiled, the language
//! target and the resolution depth limit. It is stored as TOML:
//!
//! ```toml
//! lang_prefix = "COM_EXAMPLE"
//! build_target = "admin"
//! lang_target = "both"
//! component_code = "example"
//! ```
//!
//! Every field except `lang_prefix` has a default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::constants::DEFAULT_MAX_RESOLVE_DEPTH;
use crate::core::{BuildTarget, CompilerError, LangTarget};

const fn default_max_resolve_depth() -> usize {
    DEFAULT_MAX_RESOLVE_DEPTH
}

fn is_default_max_resolve_depth(depth: &usize) -> bool {
    *depth == DEFAULT_MAX_RESOLVE_DEPTH
}

/// Settings consumed by the generation passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Prefix for every generated language key, e.g. `COM_EXAMPLE`.
    pub lang_prefix: String,

    /// The build target currently being compiled.
    #[serde(default)]
    pub build_target: BuildTarget,

    /// Which targets shared strings and layouts are emitted for.
    #[serde(default)]
    pub lang_target: LangTarget,

    /// Component code name, used for the `Component` placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_code: Option<String>,

    /// Maximum depth of the template/layout resolution worklist.
    #[serde(
        default = "default_max_resolve_depth",
        skip_serializing_if = "is_default_max_resolve_depth"
    )]
    pub max_resolve_depth: usize,
}

impl CompilerConfig {
    /// Create a configuration with the given language prefix and defaults for
    /// everything else.
    #[must_use]
    pub fn new(lang_prefix: impl Into<String>) -> Self {
        Self {
            lang_prefix: lang_prefix.into(),
            build_target: BuildTarget::default(),
            lang_target: LangTarget::default(),
            component_code: None,
            max_resolve_depth: DEFAULT_MAX_RESOLVE_DEPTH,
        }
    }

    /// Set the build target.
    #[must_use]
    pub const fn with_build_target(mut self, build_target: BuildTarget) -> Self {
        self.build_target = build_target;
        self
    }

    /// Set the language target.
    #[must_use]
    pub const fn with_lang_target(mut self, lang_target: LangTarget) -> Self {
        self.lang_target = lang_target;
        self
    }

    /// Set the component code name.
    #[must_use]
    pub fn with_component_code(mut self, component_code: impl Into<String>) -> Self {
        self.component_code = Some(component_code.into());
        self
    }

    /// Set the resolution depth limit.
    #[must_use]
    pub const fn with_max_resolve_depth(mut self, max_resolve_depth: usize) -> Self {
        self.max_resolve_depth = max_resolve_depth;
        self
    }

    /// The other build target when layouts are shared by both sides.
    ///
    /// Returns `None` unless `lang_target` is [`LangTarget::Both`].
    #[must_use]
    pub const fn mirror_target(&self) -> Option<BuildTarget> {
        match self.lang_target {
            LangTarget::Both => Some(self.build_target.other()),
            _ => None,
        }
    }

    /// Parse and validate a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::TomlError`] for malformed TOML and
    /// [`CompilerError::ConfigError`] when validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, CompilerError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML or
    /// fails validation.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read compiler config from {}", path.display()))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse compiler config from {}", path.display()))?;

        tracing::debug!(
            "Loaded compiler config from {} (build_target={}, lang_target={})",
            path.display(),
            config.build_target,
            config.lang_target
        );

        Ok(config)
    }

    /// Check the configuration for values the passes cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::ConfigError`] if `lang_prefix` is blank or
    /// contains whitespace, or if `max_resolve_depth` is zero.
    pub fn validate(&self) -> Result<(), CompilerError> {
        if self.lang_prefix.trim().is_empty() {
            return Err(CompilerError::ConfigError {
                message: "lang_prefix must not be empty".to_string(),
            });
        }

        if self.lang_prefix.chars().any(char::is_whitespace) {
            return Err(CompilerError::ConfigError {
                message: format!("lang_prefix '{}' must not contain whitespace", self.lang_prefix),
            });
        }

        if self.max_resolve_depth == 0 {
            return Err(CompilerError::ConfigError {
                message: "max_resolve_depth must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
