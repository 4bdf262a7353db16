//! Template source providers.
//!
//! The digestor never reads templates itself. It asks a [`SourceProvider`] for the
//! source text of a logical name in a given lookup mode, and treats
//! [`DigestError::TemplateNotFound`] as "this template does not exist".
//!
//! Two providers ship with the crate:
//! - [`MemorySource`] - in-memory fixtures with lookup counting, for tests and hosts
//!   that keep templates in a database or embed them in the binary
//! - [`FileSystemSource`] - a directory tree of `name.format[.handler]` files, with
//!   partials stored under an underscore-prefixed leaf

mod filesystem;
mod memory;

pub use filesystem::FileSystemSource;
pub use memory::MemorySource;

use crate::core::DigestError;

/// Source text of a template returned by a [`SourceProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Where the template was found (a path, a database id, a fixture name)
    pub identifier: String,
    /// Raw template text
    pub text: String,
}

impl Source {
    /// Create a new source.
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            text: text.into(),
        }
    }
}

/// Resolves logical template names to source text.
///
/// Implementations must return [`DigestError::TemplateNotFound`] when no template
/// matches, and reserve other variants for real failures. Those propagate out of
/// the digestor unchanged.
pub trait SourceProvider: Send + Sync {
    /// Find a template.
    ///
    /// # Arguments
    ///
    /// * `name` - Logical name, without partial underscores (`topics/topic`)
    /// * `prefixes` - Extra locations to try before the bare name
    /// * `partial` - Whether to use partial lookup
    /// * `formats` - Acceptable formats, in order of preference
    fn find(
        &self,
        name: &str,
        prefixes: &[String],
        partial: bool,
        formats: &[String],
    ) -> Result<Source, DigestError>;
}

impl<T: SourceProvider + ?Sized> SourceProvider for &T {
    fn find(
        &self,
        name: &str,
        prefixes: &[String],
        partial: bool,
        formats: &[String],
    ) -> Result<Source, DigestError> {
        (**self).find(name, prefixes, partial, formats)
    }
}

impl<T: SourceProvider + ?Sized> SourceProvider for std::sync::Arc<T> {
    fn find(
        &self,
        name: &str,
        prefixes: &[String],
        partial: bool,
        formats: &[String],
    ) -> Result<Source, DigestError> {
        (**self).find(name, prefixes, partial, formats)
    }
}

/// Stored name of a partial: the leaf segment gets a leading underscore.
///
/// `comments/comment` becomes `comments/_comment`, `footer` becomes `_footer`.
pub(crate) fn partial_name(name: &str) -> String {
    match name.rsplit_once('/') {
        Some((dir, leaf)) => format!("{dir}/_{leaf}"),
        None => format!("_{name}"),
    }
}

/// Candidate stored names for a lookup, most specific first.
pub(crate) fn candidate_names(name: &str, prefixes: &[String]) -> Vec<String> {
    prefixes
        .iter()
        .filter(|prefix| !prefix.is_empty())
        .map(|prefix| format!("{}/{}", prefix.trim_end_matches('/'), name))
        .chain(std::iter::once(name.to_string()))
        .collect()
}
