//! Template and layout discovery.
//!
//! - [`scanner`] - extracts referenced template and layout names from markup
//! - [`data`] - resolves them through an [`AliasResolver`](crate::alias::AliasResolver)
//!   into the registry, following nested references

pub mod data;
pub mod scanner;

pub use data::Data;
pub use scanner::{References, scan};
