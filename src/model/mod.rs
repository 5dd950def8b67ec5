//! Metadata models consumed and produced by the generation passes.
//!
//! - [`ViewItem`] - an admin view's metadata as it enters the pipeline
//! - [`tab`] - raw and compiled custom tab records
//! - [`customtabs`] - the custom-tab compiler pass

pub mod customtabs;
pub mod tab;

pub use customtabs::Customtabs;
pub use tab::{CustomTab, RawTab, TabPermission, decode_tabs};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata for one admin view.
///
/// Only the fields the generation core reads are typed; everything else the
/// metadata store provides is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewItem {
    /// Code name of a single record, e.g. `item`. Identifies the view.
    pub name_single_code: String,

    /// Code name of the record list, e.g. `items`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_list_code: Option<String>,

    /// Display name of a single record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_single: Option<String>,

    /// Display name of the record list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_list: Option<String>,

    /// Raw custom tab definitions: JSON text, or an already decoded list.
    ///
    /// Cleared by the custom-tab compiler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customtabs: Option<Value>,

    /// Additional markup blocks to scan for template and layout references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markup: Vec<String>,

    /// Remaining metadata fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ViewItem {
    /// Create a view item with only its code name set.
    #[must_use]
    pub fn new(name_single_code: impl Into<String>) -> Self {
        Self {
            name_single_code: name_single_code.into(),
            ..Self::default()
        }
    }

    /// Attach raw custom tab JSON.
    #[must_use]
    pub fn with_customtabs(mut self, json: impl Into<String>) -> Self {
        self.customtabs = Some(Value::String(json.into()));
        self
    }

    /// The list code name, defaulting to the single code name plus `s`.
    #[must_use]
    pub fn list_code(&self) -> String {
        self.name_list_code
            .clone()
            .filter(|code| !code.trim().is_empty())
            .unwrap_or_else(|| format!("{}s", self.name_single_code))
    }
}
