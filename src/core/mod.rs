//! Core types shared by every generation pass.
//!
//! - [`error`] - [`CompilerError`], [`ErrorContext`] and CLI-facing error rendering
//! - [`targets`] - Build and language target enums

pub mod error;
pub mod targets;

pub use error::{CompilerError, ErrorContext, Result, user_friendly_error};
pub use targets::{BuildTarget, LangTarget};
