//! Placeholder substitution.
//!
//! Fragments authored in the component metadata refer to names that are only
//! known at compile time, such as the current view's display name. They do so
//! with placeholders in one of two equivalent forms:
//!
//! - `[[[Views]]]`
//! - `###Views###`
//!
//! [`Placeholder::set`] registers a value under both forms.
//! [`Placeholder::update_active`] substitutes every registered placeholder and
//! leaves unknown ones as literal text.

use std::collections::BTreeMap;

use crate::config::CompilerConfig;
use crate::model::ViewItem;
use crate::utils::{SafeCase, safe_string};

/// Wrap `key` in the bracket placeholder form, `[[[key]]]`.
#[must_use]
pub fn bracket(key: &str) -> String {
    format!("[[[{key}]]]")
}

/// Wrap `key` in the hash placeholder form, `###key###`.
#[must_use]
pub fn hash(key: &str) -> String {
    format!("###{key}###")
}

/// The active placeholder set for one generation run.
#[derive(Debug, Clone, Default)]
pub struct Placeholder {
    active: BTreeMap<String, String>,
}

impl Placeholder {
    /// Create an empty placeholder set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under both forms of `key`.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        self.active.insert(hash(key), value.clone());
        self.active.insert(bracket(key), value);
    }

    /// Remove both forms of `key`.
    pub fn remove(&mut self, key: &str) {
        self.active.remove(&bracket(key));
        self.active.remove(&hash(key));
    }

    /// The value registered for `key`, or an empty string.
    #[must_use]
    pub fn get(&self, key: &str) -> &str {
        self.active
            .get(&bracket(key))
            .or_else(|| self.active.get(&hash(key)))
            .map_or("", String::as_str)
    }

    /// Whether `key` has a registered value.
    #[must_use]
    pub fn exists(&self, key: &str) -> bool {
        self.active.contains_key(&bracket(key)) || self.active.contains_key(&hash(key))
    }

    /// Replace every active placeholder in `text`.
    #[must_use]
    pub fn update_active(&self, text: &str) -> String {
        Self::update(text, &self.active)
    }

    /// Replace the placeholders in `map` (full placeholder text to value).
    ///
    /// Unknown placeholders are left untouched.
    #[must_use]
    pub fn update(text: &str, map: &BTreeMap<String, String>) -> String {
        if !text.contains("[[[") && !text.contains("###") {
            return text.to_string();
        }

        let mut result = text.to_string();
        for (placeholder, value) in map {
            if result.contains(placeholder.as_str()) {
                result = result.replace(placeholder.as_str(), value);
            }
        }
        result
    }

    /// Register the standard view and component placeholders.
    ///
    /// For a view `sales_order` (list `sales_orders`) this sets `view` to
    /// `sales_order`, `View` to `Sales Order`, `VIEW` to `SALES_ORDER`, and the
    /// plural `views`/`Views`/`VIEWS` forms from the list name. The display
    /// names in the item win over names derived from the code names.
    pub fn set_view_names(&mut self, item: &ViewItem, config: &CompilerConfig) {
        let single_code = item.name_single_code.as_str();
        let list_code = item.list_code();

        self.set("view", single_code);
        self.set("views", list_code.as_str());
        self.set("VIEW", safe_string(single_code, SafeCase::Upper));
        self.set("VIEWS", safe_string(&list_code, SafeCase::Upper));
        self.set(
            "View",
            item.name_single.clone().unwrap_or_else(|| title_case(single_code)),
        );
        self.set("Views", item.name_list.clone().unwrap_or_else(|| title_case(&list_code)));

        if let Some(component) = &config.component_code {
            self.set("component", component.as_str());
            self.set("Component", title_case(component));
            self.set("COMPONENT", safe_string(component, SafeCase::Upper));
        }
    }

    /// Number of active placeholder forms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no placeholders are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// `sales_order` → `Sales Order`
fn title_case(code: &str) -> String {
    code.split(|ch: char| ch == '_' || ch.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
