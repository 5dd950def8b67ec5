//! Registry paths.
//!
//! A path is an ordered list of non-empty segments. Segments are opaque: a
//! layout name such as `items.fullwidth` is a single segment even though it
//! contains a dot, so paths are built from segments rather than parsed from a
//! dotted string.

use std::fmt;

use crate::constants::{
    CUSTOM_TABS_BRANCH, LAYOUT_DATA_BRANCH, REGISTRY_ROOT, TEMPLATE_DATA_BRANCH,
};
use crate::core::{BuildTarget, CompilerError};

/// A validated registry path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistryPath {
    segments: Vec<String>,
}

impl RegistryPath {
    /// Build a path from segments.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::InvalidRegistryPath`] if there are no segments
    /// or any segment is empty.
    pub fn new<I, S>(segments: I) -> Result<Self, CompilerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();

        if segments.is_empty() {
            return Err(CompilerError::InvalidRegistryPath {
                path: String::new(),
                reason: "path has no segments".to_string(),
            });
        }

        if let Some(position) = segments.iter().position(String::is_empty) {
            return Err(CompilerError::InvalidRegistryPath {
                path: segments.join("."),
                reason: format!("segment {position} is empty"),
            });
        }

        Ok(Self {
            segments,
        })
    }

    /// Split a dotted string into segments.
    ///
    /// Only suitable when no segment contains a dot.
    ///
    /// # Errors
    ///
    /// Same as [`RegistryPath::new`].
    pub fn parse(dotted: &str) -> Result<Self, CompilerError> {
        Self::new(dotted.split('.'))
    }

    /// `builder.custom_tabs.<view>`
    ///
    /// # Errors
    ///
    /// Fails if `view` is empty.
    pub fn custom_tabs(view: &str) -> Result<Self, CompilerError> {
        Self::new([REGISTRY_ROOT, CUSTOM_TABS_BRANCH, view])
    }

    /// `builder.template_data.<target>.<view>.<name>`
    ///
    /// # Errors
    ///
    /// Fails if `view` or `name` is empty.
    pub fn template_data(target: BuildTarget, view: &str, name: &str) -> Result<Self, CompilerError> {
        Self::new([REGISTRY_ROOT, TEMPLATE_DATA_BRANCH, target.as_str(), view, name])
    }

    /// `builder.layout_data.<target>.<name>`
    ///
    /// # Errors
    ///
    /// Fails if `name` is empty.
    pub fn layout_data(target: BuildTarget, name: &str) -> Result<Self, CompilerError> {
        Self::new([REGISTRY_ROOT, LAYOUT_DATA_BRANCH, target.as_str(), name])
    }

    /// The path segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Return a new path with `segment` appended.
    ///
    /// # Errors
    ///
    /// Fails if `segment` is empty.
    pub fn join(&self, segment: impl Into<String>) -> Result<Self, CompilerError> {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self::new(segments)
    }
}

impl fmt::Display for RegistryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_paths() {
        assert!(RegistryPath::new(Vec::<String>::new()).is_err());
        assert!(RegistryPath::parse("builder..x").is_err());
        assert!(RegistryPath::custom_tabs("").is_err());
    }

    #[test]
    fn test_layout_segment_keeps_dots() {
        let path = RegistryPath::layout_data(BuildTarget::Site, "items.fullwidth").unwrap();
        assert_eq!(path.segments().len(), 4);
        assert_eq!(path.to_string(), "builder.layout_data.site.items.fullwidth");
    }

    #[test]
    fn test_template_path() {
        let path = RegistryPath::template_data(BuildTarget::Admin, "items", "head").unwrap();
        assert_eq!(path.to_string(), "builder.template_data.admin.items.head");
        assert_eq!(path, RegistryPath::parse("builder.template_data.admin.items.head").unwrap());
    }

    #[test]
    fn test_join() {
        let base = RegistryPath::parse("builder.custom_tabs").unwrap();
        assert_eq!(base.join("items").unwrap().to_string(), "builder.custom_tabs.items");
        assert!(base.join("").is_err());
    }
}
