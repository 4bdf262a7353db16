//! In-memory template store.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Source, SourceProvider, candidate_names, partial_name};
use crate::core::DigestError;

/// Templates held in memory, keyed by stored name and format.
///
/// Partials are registered under their underscore-prefixed name (`topics/_topic`).
/// A partial lookup tries that name first and falls back to the plain name, so
/// fixtures can register a dependency once and have it found in either mode.
/// A full lookup only matches the plain name.
///
/// Every call to [`SourceProvider::find`] is counted, which lets tests verify that
/// memoized digests are served without touching the store.
///
/// # Examples
///
/// ```rust
/// use template_digest::source::{MemorySource, SourceProvider};
///
/// let source = MemorySource::new()
///     .with_template("topics/show", "html", "<%= render @topic %>")
///     .with_template("topics/_topic", "html", "<h1>topic</h1>");
///
/// let found = source.find("topics/topic", &[], true, &["html".to_string()]).unwrap();
/// assert_eq!(found.text, "<h1>topic</h1>");
/// assert_eq!(source.lookups(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemorySource {
    templates: RwLock<HashMap<(String, String), String>>,
    lookups: AtomicUsize,
}

impl MemorySource {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`MemorySource::insert`].
    #[must_use]
    pub fn with_template(
        self,
        name: impl Into<String>,
        format: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.insert(name, format, text);
        self
    }

    /// Add or replace a template.
    pub fn insert(&self, name: impl Into<String>, format: impl Into<String>, text: impl Into<String>) {
        let mut templates = self.templates.write().unwrap_or_else(|e| e.into_inner());
        templates.insert((name.into(), format.into()), text.into());
    }

    /// Remove a template, returning its text if it was present.
    pub fn remove(&self, name: &str, format: &str) -> Option<String> {
        let mut templates = self.templates.write().unwrap_or_else(|e| e.into_inner());
        templates.remove(&(name.to_string(), format.to_string()))
    }

    /// Number of lookups served so far, found or not.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Reset the lookup counter.
    pub fn reset_lookups(&self) {
        self.lookups.store(0, Ordering::SeqCst);
    }
}

impl SourceProvider for MemorySource {
    fn find(
        &self,
        name: &str,
        prefixes: &[String],
        partial: bool,
        formats: &[String],
    ) -> Result<Source, DigestError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let templates = self.templates.read().unwrap_or_else(|e| e.into_inner());

        for candidate in candidate_names(name, prefixes) {
            let mut stored_names = Vec::with_capacity(2);
            if partial {
                stored_names.push(partial_name(&candidate));
            }
            stored_names.push(candidate);

            for stored in &stored_names {
                for format in formats {
                    if let Some(text) = templates.get(&(stored.clone(), format.clone())) {
                        tracing::trace!("Memory source hit: {stored}.{format}");
                        return Ok(Source::new(format!("{stored}.{format}"), text.clone()));
                    }
                }
            }
        }

        Err(DigestError::not_found(name, formats.join(","), partial))
    }
}
