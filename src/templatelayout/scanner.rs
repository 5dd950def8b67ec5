//! Lexical scanner for template and layout references.
//!
//! Recognizes exactly four call shapes in generated markup:
//!
//! | kind     | shape                                |
//! |----------|--------------------------------------|
//! | template | `$this->loadTemplate('name')`        |
//! | template | `$this->loadTemplate("name")`        |
//! | layout   | `JLayoutHelper::render('name', ...)` |
//! | layout   | `JLayoutHelper::render("name", ...)` |
//!
//! For each kind the single-quote matches come first, then the double-quote
//! matches, each in order of appearance. Duplicates are kept; the registry
//! presence check collapses them during resolution.

use serde::Serialize;

use crate::constants::{
    LAYOUT_CALL_DOUBLE, LAYOUT_CALL_SINGLE, TEMPLATE_CALL_DOUBLE, TEMPLATE_CALL_SINGLE,
};

/// Names referenced from a block of markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct References {
    /// Template names, single-quote matches first
    pub templates: Vec<String>,
    /// Layout names, single-quote matches first
    pub layouts: Vec<String>,
}

impl References {
    /// Whether no reference was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty() && self.layouts.is_empty()
    }
}

/// Scan `content` for template and layout references.
#[must_use]
pub fn scan(content: &str) -> References {
    References {
        templates: scan_templates(content),
        layouts: scan_layouts(content),
    }
}

/// Template names referenced from `content`.
#[must_use]
pub fn scan_templates(content: &str) -> Vec<String> {
    let mut names = between(content, TEMPLATE_CALL_SINGLE);
    names.extend(between(content, TEMPLATE_CALL_DOUBLE));
    names
}

/// Layout names referenced from `content`.
#[must_use]
pub fn scan_layouts(content: &str) -> Vec<String> {
    let mut names = between(content, LAYOUT_CALL_SINGLE);
    names.extend(between(content, LAYOUT_CALL_DOUBLE));
    names
}

/// Every non-empty name found between `open` and the nearest following
/// `close`, in order and untrimmed. An opening token without a closing token
/// ends the scan.
fn between(content: &str, (open, close): (&str, &str)) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = content;

    while let Some(start) = rest.find(open) {
        let after_open = &rest[start + open.len()..];
        let Some(end) = after_open.find(close) else {
            break;
        };
        let name = &after_open[..end];
        if !name.is_empty() {
            names.push(name.to_string());
        }
        rest = &after_open[end + close.len()..];
    }

    names
}
