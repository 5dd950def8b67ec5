//! Custom-code preservation.
//!
//! Developers edit compiled output by hand. Anything they place inside a
//! region marker survives the next regeneration:
//!
//! ```text
//! /***[REGION=toolbar]***/
//! ...developer content...
//! /***[/REGION=toolbar]***/
//! ```
//!
//! Before a run, [`CustomCode::capture`] reads the previously compiled artifact
//! and records each region's body by id. [`CustomCode::update`] then puts the
//! captured body back into freshly generated text wherever the same region
//! appears. Regions with no captured body, and unterminated regions, pass
//! through unchanged.
//!
//! The same pass expands inline references `[CUSTOMCODE=<id>]` to snippets
//! registered with [`CustomCode::register`].

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static REGION_OPEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"/\*\*\*\[REGION=([A-Za-z0-9_.\-]+)\]\*\*\*/").ok());

static INLINE_REFERENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\[CUSTOMCODE=([A-Za-z0-9_.\-]+)\]").ok());

/// Closing marker for region `id`.
#[must_use]
pub fn region_close(id: &str) -> String {
    format!("/***[/REGION={id}]***/")
}

/// Opening marker for region `id`.
#[must_use]
pub fn region_open(id: &str) -> String {
    format!("/***[REGION={id}]***/")
}

/// One region found in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Region<'a> {
    id: &'a str,
    /// Byte range of the body between the markers
    body_start: usize,
    body_end: usize,
    /// Byte offset just past the closing marker
    end: usize,
}

/// Find every terminated region in `text`, in order.
fn regions(text: &str) -> Vec<Region<'_>> {
    let mut found = Vec::new();
    let Some(region_open) = REGION_OPEN.as_ref() else {
        return found;
    };
    let mut search_from = 0;

    while let Some(captures) = region_open.captures_at(text, search_from) {
        let (Some(marker), Some(id)) = (captures.get(0), captures.get(1)) else {
            break;
        };
        let close = region_close(id.as_str());
        match text[marker.end()..].find(&close) {
            Some(offset) => {
                let body_end = marker.end() + offset;
                let end = body_end + close.len();
                found.push(Region {
                    id: id.as_str(),
                    body_start: marker.end(),
                    body_end,
                    end,
                });
                search_from = end;
            }
            None => {
                tracing::debug!("Unterminated custom code region '{}'", id.as_str());
                search_from = marker.end();
            }
        }
    }

    found
}

/// Captured developer content and registered snippets for one run.
#[derive(Debug, Clone, Default)]
pub struct CustomCode {
    captured: BTreeMap<String, String>,
    snippets: BTreeMap<String, String>,
}

impl CustomCode {
    /// Create an empty preserver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the body of every region in a previously compiled artifact.
    ///
    /// The first occurrence of an id wins. Returns how many regions were
    /// newly captured.
    pub fn capture(&mut self, prior: &str) -> usize {
        let mut count = 0;
        for region in regions(prior) {
            if self.captured.contains_key(region.id) {
                continue;
            }
            self.captured
                .insert(region.id.to_string(), prior[region.body_start..region.body_end].to_string());
            count += 1;
        }
        tracing::debug!("Captured {count} custom code region(s)");
        count
    }

    /// Register a snippet for inline `[CUSTOMCODE=<id>]` references.
    pub fn register(&mut self, id: impl Into<String>, code: impl Into<String>) {
        self.snippets.insert(id.into(), code.into());
    }

    /// Captured body for region `id`.
    #[must_use]
    pub fn captured(&self, id: &str) -> Option<&str> {
        self.captured.get(id).map(String::as_str)
    }

    /// Expand inline references, then reinstate captured region bodies.
    #[must_use]
    pub fn update(&self, text: &str) -> String {
        let expanded = self.expand_references(text);
        self.reinstate_regions(&expanded)
    }

    fn expand_references(&self, text: &str) -> String {
        if self.snippets.is_empty() || !text.contains("[CUSTOMCODE=") {
            return text.to_string();
        }
        let Some(inline_reference) = INLINE_REFERENCE.as_ref() else {
            return text.to_string();
        };

        inline_reference
            .replace_all(text, |captures: &regex::Captures<'_>| {
                let reference = &captures[0];
                match self.snippets.get(&captures[1]) {
                    Some(code) => code.clone(),
                    None => reference.to_string(),
                }
            })
            .into_owned()
    }

    fn reinstate_regions(&self, text: &str) -> String {
        if self.captured.is_empty() {
            return text.to_string();
        }

        let mut output = String::with_capacity(text.len());
        let mut cursor = 0;

        for region in regions(text) {
            let Some(body) = self.captured.get(region.id) else {
                continue;
            };
            output.push_str(&text[cursor..region.body_start]);
            output.push_str(body);
            output.push_str(&text[region.body_end..region.end]);
            cursor = region.end;
            tracing::trace!("Reinstated custom code region '{}'", region.id);
        }

        output.push_str(&text[cursor..]);
        output
    }
}
