//! Utility helpers shared by the generation passes.

pub mod string;

pub use string::{SafeCase, indent, indent_lines, number_to_words, safe_string};
