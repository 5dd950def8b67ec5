//! Component builder generation core.
//!
//! Given structured component metadata (view definitions, custom tabs, markup
//! fragments) the generation core decides what compiled content exists and
//! where it is placed, while keeping developer hand-edits across repeated
//! regenerations.
//!
//! # Architecture Overview
//!
//! A generation run is an explicit value, [`compiler::CompilerRun`], that owns
//! the run-scoped state every pass reads and writes:
//!
//! - the [`registry::Registry`], the bus between passes
//! - the [`language::LanguageTable`] of generated strings
//! - the active [`placeholder::Placeholder`] values
//! - the captured [`customcode::CustomCode`] regions
//!
//! Each view flows through two passes:
//!
//! 1. [`model::Customtabs`] compiles the view's custom tabs into
//!    `builder.custom_tabs.<view>` and registers their language strings.
//! 2. [`templatelayout::Data`] scans the compiled tabs and other markup for
//!    `loadTemplate`/`JLayoutHelper::render` calls, resolves each unseen name
//!    through an [`alias::AliasResolver`] into `builder.template_data` or
//!    `builder.layout_data`, and follows references nested in what it
//!    resolved.
//!
//! # Core Modules
//!
//! - [`alias`] - template/layout alias lookup
//! - [`cli`] - the `cbuild` command line
//! - [`compiler`] - the run context and per-view flow
//! - [`config`] - compiler configuration (TOML)
//! - [`constants`] - registry roots, scanner call shapes and limits
//! - [`core`] - errors and build/language targets
//! - [`customcode`] - custom code region preservation
//! - [`language`] - the language string table
//! - [`model`] - view items and custom tabs
//! - [`placeholder`] - placeholder substitution
//! - [`registry`] - the run-scoped registry
//! - [`templatelayout`] - template/layout scanning and resolution
//! - [`utils`] - identifier and indentation helpers
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Compile a run file with a config file
//! cbuild --config cbuild.toml compile run.json
//!
//! # Keep hand-edited regions from a previous build
//! cbuild compile run.json --prior admin/views/item/tmpl/edit.php --format json
//!
//! # List the references in a layout file
//! cbuild scan admin/layouts/item/details.php
//! ```

pub mod alias;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod constants;
pub mod core;
pub mod customcode;
pub mod language;
pub mod model;
pub mod placeholder;
pub mod registry;
pub mod templatelayout;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
