//! Run-scoped registry shared by the generation passes.
//!
//! The registry is the communication bus between passes: the custom-tab
//! compiler writes `builder.custom_tabs.<view>`, the template/layout resolver
//! writes `builder.template_data.*` and `builder.layout_data.*`, and downstream
//! file emission reads them back.
//!
//! A registry lives exactly as long as one generation run. It is owned by the
//! [`CompilerRun`](crate::compiler::CompilerRun) and passed by reference to each
//! pass; there is no process-wide instance.
//!
//! # Storage
//!
//! Values are [`serde_json::Value`]s arranged in a tree with one object level
//! per path segment, so reading a prefix such as
//! `builder.template_data.admin.items` returns every template resolved for that
//! view.
//!
//! ```rust
//! use component_builder::registry::{Registry, RegistryPath};
//! use serde_json::json;
//!
//! # fn example() -> component_builder::core::Result<()> {
//! let mut registry = Registry::new();
//! let path = RegistryPath::parse("builder.custom_tabs.items")?;
//!
//! assert!(!registry.check(&path));
//! registry.set(&path, json!([]));
//! assert!(registry.check(&path));
//! # Ok(())
//! # }
//! ```

mod path;

pub use path::RegistryPath;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::core::Result;

/// Hierarchical key/value store for one generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    root: Map<String, Value>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value stored at `path`, if any.
    #[must_use]
    pub fn get(&self, path: &RegistryPath) -> Option<&Value> {
        let (last, parents) = path.segments().split_last()?;
        let mut node = &self.root;
        for segment in parents {
            node = node.get(segment)?.as_object()?;
        }
        node.get(last)
    }

    /// Get the value at `path`, or `default` when unset.
    #[must_use]
    pub fn get_or(&self, path: &RegistryPath, default: Value) -> Value {
        self.get(path).filter(|value| !value.is_null()).cloned().unwrap_or(default)
    }

    /// Get the value at `path` deserialized into `T`.
    ///
    /// Returns `Ok(None)` when the path is unset.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::JsonError`](crate::core::CompilerError::JsonError)
    /// if the stored value does not have the shape of `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &RegistryPath) -> Result<Option<T>> {
        match self.get(path) {
            Some(value) if !value.is_null() => Ok(Some(T::deserialize(value)?)),
            _ => Ok(None),
        }
    }

    /// Whether a non-null value is stored at `path`.
    #[must_use]
    pub fn check(&self, path: &RegistryPath) -> bool {
        self.get(path).is_some_and(|value| !value.is_null())
    }

    /// Store `value` at `path`, creating intermediate branches.
    ///
    /// A non-object value found on the way is replaced by a branch.
    pub fn set(&mut self, path: &RegistryPath, value: Value) {
        let Some((last, parents)) = path.segments().split_last() else {
            return;
        };

        let mut node = &mut self.root;
        for segment in parents {
            let entry = node.entry(segment.clone()).or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            // `entry` was just made an object
            let Value::Object(map) = entry else {
                return;
            };
            node = map;
        }

        tracing::trace!("registry set {path}");
        node.insert(last.clone(), value);
    }

    /// Serialize `value` and store it at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::JsonError`](crate::core::CompilerError::JsonError)
    /// if `value` cannot be represented as JSON.
    pub fn set_as<T: Serialize>(&mut self, path: &RegistryPath, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.set(path, value);
        Ok(())
    }

    /// Remove and return the value at `path`.
    pub fn remove(&mut self, path: &RegistryPath) -> Option<Value> {
        let (last, parents) = path.segments().split_last()?;
        let mut node = &mut self.root;
        for segment in parents {
            node = node.get_mut(segment)?.as_object_mut()?;
        }
        node.remove(last)
    }

    /// Whether nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// The whole store as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// SHA-256 checksum of the serialized store, as `sha256:<hex>`.
    ///
    /// Two runs over the same input produce the same checksum.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::JsonError`](crate::core::CompilerError::JsonError)
    /// if serialization fails.
    pub fn checksum(&self) -> Result<String> {
        let bytes = serde_json::to_vec(&self.root)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("sha256:{}", hex::encode(hasher.finalize())))
    }
}
