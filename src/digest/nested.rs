//! Nested dependency listing for diagnostics.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One entry of a nested dependency listing.
///
/// Serializes to either a bare name or a single-key map from name to the nested
/// list, so `A -> B -> C` listed from `A` is `[{"B": ["C"]}]` in JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestedDependency {
    /// A dependency with no dependencies of its own
    Leaf(String),
    /// A dependency and what it depends on
    Branch {
        /// Template name
        name: String,
        /// Its own nested dependencies, never empty
        dependencies: Vec<NestedDependency>,
    },
}

impl NestedDependency {
    /// Build an entry, collapsing to a leaf when there are no nested dependencies.
    pub fn new(name: String, dependencies: Vec<NestedDependency>) -> Self {
        if dependencies.is_empty() {
            Self::Leaf(name)
        } else {
            Self::Branch {
                name,
                dependencies,
            }
        }
    }

    /// Template name of this entry.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Leaf(name) => name,
            Self::Branch {
                name,
                ..
            } => name,
        }
    }

    /// Nested dependencies, empty for a leaf.
    #[must_use]
    pub fn dependencies(&self) -> &[NestedDependency] {
        match self {
            Self::Leaf(_) => &[],
            Self::Branch {
                dependencies,
                ..
            } => dependencies,
        }
    }
}

impl Serialize for NestedDependency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(name) => serializer.serialize_str(name),
            Self::Branch {
                name,
                dependencies,
            } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(name, dependencies)?;
                map.end()
            }
        }
    }
}
