//! Alias resolution for templates and layouts.
//!
//! An alias is a stored, named fragment: a markup part (`html`) and a logic
//! companion (`php_view`). The template/layout resolver asks an
//! [`AliasResolver`] for the fragment behind each name it finds in generated
//! markup.
//!
//! The resolver behind a real build is backed by the metadata store.
//! [`AliasStore`] is the in-memory implementation the CLI fills from its run
//! file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The two kinds of alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasKind {
    /// A view sub-template loaded with `$this->loadTemplate(...)`
    Template,
    /// A shared layout rendered with `JLayoutHelper::render(...)`
    Layout,
}

impl fmt::Display for AliasKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AliasKind::Template => f.write_str("template"),
            AliasKind::Layout => f.write_str("layout"),
        }
    }
}

/// A resolved fragment pair, stored in the registry as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasData {
    /// Markup fragment
    #[serde(default)]
    pub html: String,
    /// Companion logic fragment
    #[serde(default)]
    pub php_view: String,
}

impl AliasData {
    /// Create a fragment pair.
    #[must_use]
    pub fn new(html: impl Into<String>, php_view: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            php_view: php_view.into(),
        }
    }
}

/// Looks up template and layout fragments by name.
///
/// Implementations must be deterministic for a given `(name, kind, view)`
/// within one run. Returning `None` means "no such alias" and is not an error.
pub trait AliasResolver {
    /// Fragment for `name` of `kind`, in the context of `view`.
    fn get(&self, name: &str, kind: AliasKind, view: &str) -> Option<AliasData>;
}

impl<T: AliasResolver + ?Sized> AliasResolver for &T {
    fn get(&self, name: &str, kind: AliasKind, view: &str) -> Option<AliasData> {
        (**self).get(name, kind, view)
    }
}

/// One alias as written in a run file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    /// Alias name as referenced from markup
    pub name: String,
    /// Restrict the alias to one view; `None` makes it available to all views
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    /// Markup fragment
    #[serde(default)]
    pub html: String,
    /// Companion logic fragment
    #[serde(default)]
    pub php_view: String,
}

/// Aliases grouped by kind, as written in a run file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasSet {
    /// Template aliases
    #[serde(default)]
    pub templates: Vec<AliasEntry>,
    /// Layout aliases
    #[serde(default)]
    pub layouts: Vec<AliasEntry>,
}

/// In-memory alias store with optional per-view overrides.
///
/// A view-specific entry wins over a shared entry with the same name.
#[derive(Debug, Clone, Default)]
pub struct AliasStore {
    shared: BTreeMap<(AliasKind, String), AliasData>,
    per_view: BTreeMap<(AliasKind, String, String), AliasData>,
}

impl AliasStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alias available to every view.
    pub fn insert(&mut self, kind: AliasKind, name: impl Into<String>, data: AliasData) {
        self.shared.insert((kind, name.into()), data);
    }

    /// Add an alias available to `view` only.
    pub fn insert_for_view(
        &mut self,
        kind: AliasKind,
        view: impl Into<String>,
        name: impl Into<String>,
        data: AliasData,
    ) {
        self.per_view.insert((kind, view.into(), name.into()), data);
    }

    /// Builder-style [`AliasStore::insert`] for templates.
    #[must_use]
    pub fn with_template(mut self, name: &str, html: &str, php_view: &str) -> Self {
        self.insert(AliasKind::Template, name, AliasData::new(html, php_view));
        self
    }

    /// Builder-style [`AliasStore::insert`] for layouts.
    #[must_use]
    pub fn with_layout(mut self, name: &str, html: &str, php_view: &str) -> Self {
        self.insert(AliasKind::Layout, name, AliasData::new(html, php_view));
        self
    }

    /// Number of stored aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.len() + self.per_view.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<AliasSet> for AliasStore {
    fn from(set: AliasSet) -> Self {
        let mut store = Self::new();
        for (kind, entries) in [(AliasKind::Template, set.templates), (AliasKind::Layout, set.layouts)]
        {
            for entry in entries {
                let data = AliasData::new(entry.html, entry.php_view);
                match entry.view {
                    Some(view) => store.insert_for_view(kind, view, entry.name, data),
                    None => store.insert(kind, entry.name, data),
                }
            }
        }
        store
    }
}

impl AliasResolver for AliasStore {
    fn get(&self, name: &str, kind: AliasKind, view: &str) -> Option<AliasData> {
        self.per_view
            .get(&(kind, view.to_string(), name.to_string()))
            .or_else(|| self.shared.get(&(kind, name.to_string())))
            .cloned()
    }
}
