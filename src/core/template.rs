//! Template references and lookup modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a template is looked up in the source provider.
///
/// Partials are stored under an underscore-prefixed leaf (`topics/_topic`) and are
/// resolved through a distinct lookup mode. The digest algorithm is the same for
/// both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// Top-level template lookup
    #[default]
    Full,
    /// Partial template lookup
    Partial,
}

impl LookupMode {
    /// Pick the lookup mode for a name.
    ///
    /// Partial mode is used when forced by the caller or when the name itself
    /// denotes a partial, i.e. contains `"/_"`.
    #[must_use]
    pub fn for_name(name: &str, force_partial: bool) -> Self {
        if force_partial || name.contains("/_") {
            Self::Partial
        } else {
            Self::Full
        }
    }

    /// Returns `true` for [`LookupMode::Partial`].
    #[must_use]
    pub const fn is_partial(self) -> bool {
        matches!(self, Self::Partial)
    }
}

impl fmt::Display for LookupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Partial => write!(f, "partial"),
        }
    }
}

/// A `(logical name, format)` pair identifying one template.
///
/// The name is path-like (`"topics/topic"`), the format is a rendering format tag
/// such as `"html"` or `"json"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateRef {
    name: String,
    format: String,
}

impl TemplateRef {
    /// Create a new template reference.
    pub fn new(name: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format: format.into(),
        }
    }

    /// The name exactly as requested.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rendering format.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Key under which this template's digest is memoized: `"<name>.<format>"`.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{}.{}", self.name, self.format)
    }

    /// The name with partial underscores removed (`topics/_topic` -> `topics/topic`).
    ///
    /// This is the name handed to the source provider.
    #[must_use]
    pub fn logical_name(&self) -> String {
        self.name.replace("/_", "/")
    }

    /// The containing directory: the name without its last segment.
    ///
    /// Returns an empty string for names without a `/`.
    #[must_use]
    pub fn directory(&self) -> &str {
        self.name.rsplit_once('/').map_or("", |(dir, _)| dir)
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name, self.format)
    }
}
