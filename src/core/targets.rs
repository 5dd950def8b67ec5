//! Build and language targets.
//!
//! A component is compiled once per [`BuildTarget`] (the administrator side or
//! the public site). Language strings and shared layouts may be emitted for one
//! side or for both, which is what [`LangTarget`] describes.

use serde::{Deserialize, Serialize};

use super::CompilerError;

/// The side of the extension currently being compiled.
///
/// # Serialization
///
/// ```rust
/// use component_builder::core::BuildTarget;
///
/// let json = serde_json::to_string(&BuildTarget::Admin).unwrap();
/// assert_eq!(json, "\"admin\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildTarget {
    /// Administrator interface
    #[default]
    Admin,
    /// Public-facing site interface
    Site,
}

impl BuildTarget {
    /// The opposite build target.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            BuildTarget::Admin => BuildTarget::Site,
            BuildTarget::Site => BuildTarget::Admin,
        }
    }

    /// Registry segment for this target.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BuildTarget::Admin => "admin",
            BuildTarget::Site => "site",
        }
    }
}

impl std::fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BuildTarget {
    type Err = CompilerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" | "administrator" => Ok(BuildTarget::Admin),
            "site" => Ok(BuildTarget::Site),
            _ => Err(CompilerError::ConfigError {
                message: format!("unknown build target '{s}' (expected admin or site)"),
            }),
        }
    }
}

/// Which build target(s) a language string or shared layout is emitted for.
///
/// Also used as the scope of [`LanguageTable`](crate::language::LanguageTable)
/// writes; custom tabs always write with [`LangTarget::Both`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LangTarget {
    /// Administrator strings only
    Admin,
    /// Site strings only
    Site,
    /// Strings shared by both targets
    #[default]
    Both,
}

impl LangTarget {
    /// Whether strings in this scope are emitted for `target`.
    #[must_use]
    pub const fn includes(self, target: BuildTarget) -> bool {
        matches!(
            (self, target),
            (LangTarget::Both, _)
                | (LangTarget::Admin, BuildTarget::Admin)
                | (LangTarget::Site, BuildTarget::Site)
        )
    }

    /// Scope name as written in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LangTarget::Admin => "admin",
            LangTarget::Site => "site",
            LangTarget::Both => "both",
        }
    }
}

impl std::fmt::Display for LangTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LangTarget {
    type Err = CompilerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" | "administrator" => Ok(LangTarget::Admin),
            "site" => Ok(LangTarget::Site),
            "both" => Ok(LangTarget::Both),
            _ => Err(CompilerError::ConfigError {
                message: format!("unknown language target '{s}' (expected admin, site or both)"),
            }),
        }
    }
}
