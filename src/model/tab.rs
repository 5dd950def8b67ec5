//! Custom tab records.
//!
//! Raw tab definitions arrive as loosely-typed JSON from the metadata store.
//! [`decode_tabs`] validates them once, at the boundary, into [`RawTab`]s; the
//! compiler then only deals with typed fields. [`CustomTab`] is the compiled
//! record written to the registry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A raw tab definition after boundary validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTab {
    /// Tab name, `None` when missing or not a non-blank string
    pub name: Option<String>,
    /// Tab body; missing or non-text bodies decode to an empty string
    pub html: String,
    /// Whether the tab is guarded by a view permission (`permission == 1`)
    pub permission: bool,
}

impl RawTab {
    /// Validate one tab record.
    #[must_use]
    pub fn from_record(record: &Map<String, Value>) -> Self {
        let name = record
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string);

        let html = match record.get("html") {
            Some(Value::String(html)) => html.clone(),
            Some(Value::Number(number)) => number.to_string(),
            _ => String::new(),
        };

        Self {
            name,
            html,
            permission: record.get("permission").is_some_and(is_one),
        }
    }
}

/// Loose `== 1` check: accepts `1`, `1.0`, `"1"` and `true`.
fn is_one(value: &Value) -> bool {
    match value {
        Value::Number(number) => number.as_f64() == Some(1.0),
        Value::String(text) => text.trim().parse::<f64>().is_ok_and(|number| number == 1.0),
        Value::Bool(flag) => *flag,
        _ => false,
    }
}

/// Decode the raw `customtabs` field of a view item.
///
/// The field may hold JSON text or an already decoded value. Lists are taken
/// in order; objects (subform storage such as `{"customtabs0": {...}}`) are
/// taken in document order. Entries that are not records are dropped, and
/// anything else decodes to an empty list.
#[must_use]
pub fn decode_tabs(raw: Option<&Value>) -> Vec<RawTab> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let decoded;
    let value = match raw {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(value) => {
                decoded = value;
                &decoded
            }
            Err(e) => {
                tracing::debug!("Ignoring custom tabs that are not valid JSON: {e}");
                return Vec::new();
            }
        },
        other => other,
    };

    let entries: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => return Vec::new(),
    };

    entries.into_iter().filter_map(Value::as_object).map(RawTab::from_record).collect()
}

/// Permission metadata of a guarded tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabPermission {
    /// Guard flag, always 1
    pub permission: u8,
    /// Language key for the permission title
    pub lang_permission: String,
    /// Language key for the permission description
    pub lang_permission_desc: String,
    /// Permission title text
    pub lang_permission_title: String,
    /// Sort key for the access rules listing
    #[serde(rename = "sortKey")]
    pub sort_key: String,
}

/// A compiled custom tab as stored under `builder.custom_tabs.<view>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTab {
    /// Owning view code name
    pub view: String,
    /// Display name
    pub name: String,
    /// Identifier derived from `name`
    pub code: String,
    /// Compiled markup
    pub html: String,
    /// Language key for the tab title
    pub lang: String,
    /// Present iff the tab is permission-guarded
    #[serde(flatten)]
    pub permission: Option<TabPermission>,
}
