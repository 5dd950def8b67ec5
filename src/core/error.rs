//! Error handling for the component builder.
//!
//! The generation core reports failures through [`CompilerError`], a strongly
//! typed enum that callers can match on. The CLI wraps errors in an
//! [`ErrorContext`] that adds a suggestion and details before printing them.
//!
//! Most malformed input is *not* an error in this crate: an invalid tab list or
//! an unknown template name is normalized to "nothing to do". The variants
//! below cover the cases that must abort a generation run or that come from the
//! surrounding IO (configuration files, run files).
//!
//! # Examples
//!
//! ```rust,no_run
//! use component_builder::core::{CompilerError, ErrorContext};
//!
//! let context = ErrorContext::new(CompilerError::ConfigError {
//!     message: "lang_prefix must not be empty".to_string(),
//! })
//! .with_suggestion("Set lang_prefix = \"COM_EXAMPLE\" in the config file");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for generation runs.
///
/// # Error Categories
///
/// - **Structural anomalies**: [`ResolutionDepthExceeded`] aborts a run when the
///   template/layout worklist nests deeper than the configured limit.
/// - **Registry misuse**: [`InvalidRegistryPath`] for empty paths or segments.
/// - **Configuration**: [`ConfigError`], [`TomlError`].
/// - **Input decoding**: [`RunFileError`], [`JsonError`], [`IoError`].
///
/// [`ResolutionDepthExceeded`]: CompilerError::ResolutionDepthExceeded
/// [`InvalidRegistryPath`]: CompilerError::InvalidRegistryPath
/// [`ConfigError`]: CompilerError::ConfigError
/// [`TomlError`]: CompilerError::TomlError
/// [`RunFileError`]: CompilerError::RunFileError
/// [`JsonError`]: CompilerError::JsonError
/// [`IoError`]: CompilerError::IoError
#[derive(Error, Debug)]
pub enum CompilerError {
    /// Template/layout resolution nested deeper than the allowed maximum.
    ///
    /// The registry presence check normally stops the worklist long before
    /// this limit. Reaching it means two registry paths alias the same content
    /// under different keys, or the alias store produces an unbounded chain.
    ///
    /// # Fields
    /// - `path`: The registry path being resolved when the limit was hit
    /// - `depth`: The depth of the offending work item
    /// - `max_depth`: The configured limit
    #[error("Template/layout resolution exceeded maximum depth {max_depth} at '{path}' (depth {depth})")]
    ResolutionDepthExceeded {
        /// Registry path of the fragment that triggered the limit
        path: String,
        /// Depth of the offending work item
        depth: usize,
        /// Configured maximum depth
        max_depth: usize,
    },

    /// A registry path was empty or contained an empty segment.
    #[error("Invalid registry path '{path}': {reason}")]
    InvalidRegistryPath {
        /// The path as far as it could be rendered
        path: String,
        /// Why the path was rejected
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// The CLI run file could not be interpreted.
    #[error("Invalid run file '{path}': {reason}")]
    RunFileError {
        /// Path to the run file
        path: String,
        /// The reason the file was rejected
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result alias used across the library.
pub type Result<T, E = CompilerError> = std::result::Result<T, E>;

/// An error enriched with user-facing suggestion and details.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: CompilerError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details.
    #[must_use]
    pub const fn new(error: CompilerError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach additional details about the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions where the
/// failure is recognized.
///
/// Errors that are not a [`CompilerError`] (for example plain `anyhow`
/// messages added with `.context(...)`) keep their full chain in the details.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    match error.downcast::<CompilerError>() {
        Ok(compiler_error) => create_error_context(compiler_error),
        Err(error) => {
            let not_found = error
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io_error| io_error.kind() == std::io::ErrorKind::NotFound);
            if not_found {
                return ErrorContext::new(CompilerError::ConfigError {
                    message: error.to_string(),
                })
                .with_suggestion("Check that the file exists and the path is correct");
            }

            let chain = error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>();
            let context = ErrorContext::new(CompilerError::ConfigError {
                message: error.to_string(),
            });
            if chain.is_empty() {
                context
            } else {
                context.with_details(chain.join(": "))
            }
        }
    }
}

fn create_error_context(error: CompilerError) -> ErrorContext {
    match &error {
        CompilerError::ResolutionDepthExceeded {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(
                "Check the template and layout aliases for a reference chain that never repeats the same name",
            )
            .with_details(
                "Each template or layout is resolved once per run; this limit is only reached when that guard is bypassed",
            ),
        CompilerError::InvalidRegistryPath {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Make sure every view has a non-empty name_single_code"),
        CompilerError::ConfigError {
            ..
        }
        | CompilerError::TomlError(_) => ErrorContext::new(error)
            .with_suggestion("Check the config file passed with --config or CBUILD_CONFIG"),
        CompilerError::RunFileError {
            ..
        }
        | CompilerError::JsonError(_) => ErrorContext::new(error)
            .with_suggestion("The run file must be a JSON object with a 'views' array"),
        CompilerError::IoError(_) => ErrorContext::new(error),
    }
}
