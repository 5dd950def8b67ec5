//! Language string table.
//!
//! Passes register `(scope, key, text)` triples here; a downstream emitter
//! turns them into `.ini` string files per build target. Writing the same key
//! twice keeps the last text, trimmed, so a pass that runs twice over the same
//! input leaves the table unchanged.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::{BuildTarget, LangTarget};

/// Accumulated language strings for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LanguageTable {
    content: BTreeMap<LangTarget, BTreeMap<String, String>>,
}

impl LanguageTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `text` for `key` in `scope`.
    pub fn set(&mut self, scope: LangTarget, key: impl Into<String>, text: &str) {
        let key = key.into();
        tracing::trace!("language [{scope}] {key}");
        self.content.entry(scope).or_default().insert(key, text.trim().to_string());
    }

    /// Text registered for `key` in exactly `scope`.
    #[must_use]
    pub fn get(&self, scope: LangTarget, key: &str) -> Option<&str> {
        self.content.get(&scope)?.get(key).map(String::as_str)
    }

    /// Whether `key` is registered in `scope`.
    #[must_use]
    pub fn exists(&self, scope: LangTarget, key: &str) -> bool {
        self.get(scope, key).is_some()
    }

    /// All strings emitted for `target`, merging its own scope with `both`.
    ///
    /// Target-specific entries win over shared ones.
    #[must_use]
    pub fn strings_for(&self, target: BuildTarget) -> BTreeMap<&str, &str> {
        let mut strings = BTreeMap::new();
        for (scope, entries) in &self.content {
            if !scope.includes(target) {
                continue;
            }
            for (key, text) in entries {
                if *scope == LangTarget::Both && strings.contains_key(key.as_str()) {
                    continue;
                }
                strings.insert(key.as_str(), text.as_str());
            }
        }
        strings
    }

    /// Number of registered entries across all scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.values().map(BTreeMap::len).sum()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
