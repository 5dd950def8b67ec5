//! Configuration for generation runs.
//!
//! A [`CompilerConfig`] is loaded once by the CLI (from `--config` or the
//! `CBUILD_CONFIG` environment variable), or taken from the run file's inline
//! `config` object, and handed to the run context.

mod compiler;

pub use compiler::CompilerConfig;

/// Environment variable naming the compiler config file.
pub const CONFIG_ENV_VAR: &str = "CBUILD_CONFIG";
