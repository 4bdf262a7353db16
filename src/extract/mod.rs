//! Dependency extraction from template source text.
//!
//! Templates are never parsed. Dependencies are found by scanning the raw text with
//! independent [`ReferenceExtractor`] strategies whose results are concatenated in
//! registration order:
//!
//! 1. [`RenderCallExtractor`] - implicit references from `render` calls
//! 2. [`ExplicitDependencyExtractor`] - `# Template Dependency: <name>` annotations
//!
//! Implicit references go through the [`NameResolver`] to become canonical template
//! names; explicit references are used verbatim. Malformed directives simply do not
//! match and produce fewer dependencies.
//!
//! # Examples
//!
//! ```rust
//! use template_digest::core::TemplateRef;
//! use template_digest::extract::DependencyExtractor;
//!
//! let extractor = DependencyExtractor::default();
//! let source = r#"
//! <%= render "comments/comments" %>
//! <%= render(@topic) %>
//! <%# Template Dependency: shared/footer %>
//! "#;
//!
//! let deps = extractor.dependencies(source, &TemplateRef::new("topics/show", "html"));
//! assert_eq!(deps, vec!["comments/comments", "topics/topic", "shared/footer"]);
//! ```

mod explicit;
mod render;
mod resolver;

pub use explicit::ExplicitDependencyExtractor;
pub use render::RenderCallExtractor;
pub use resolver::NameResolver;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::core::TemplateRef;
use crate::inflector::{EnglishInflector, Inflector};

/// How a reference was found, which decides whether it needs resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Inferred from a render directive; resolved through [`NameResolver`]
    Implicit,
    /// Named directly by an annotation; already canonical
    Explicit,
}

/// One text-scanning strategy.
pub trait ReferenceExtractor: Send + Sync {
    /// Raw reference tokens in order of first appearance, without duplicates.
    fn extract_references(&self, source: &str) -> Vec<String>;

    /// Whether the tokens need name resolution.
    fn kind(&self) -> ReferenceKind;
}

/// Runs every registered strategy and resolves the results into a dependency set.
#[derive(Clone)]
pub struct DependencyExtractor {
    extractors: Vec<Arc<dyn ReferenceExtractor>>,
    resolver: NameResolver,
}

impl fmt::Debug for DependencyExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyExtractor")
            .field("extractors", &self.extractors.len())
            .finish_non_exhaustive()
    }
}

impl Default for DependencyExtractor {
    fn default() -> Self {
        Self::new(Arc::new(EnglishInflector))
    }
}

impl DependencyExtractor {
    /// Render-call and annotation strategies with the given inflector.
    pub fn new(inflector: Arc<dyn Inflector>) -> Self {
        Self {
            extractors: vec![
                Arc::new(RenderCallExtractor),
                Arc::new(ExplicitDependencyExtractor),
            ],
            resolver: NameResolver::new(inflector),
        }
    }

    /// An extractor with no strategies, to be filled with [`DependencyExtractor::with_extractor`].
    pub fn empty(inflector: Arc<dyn Inflector>) -> Self {
        Self {
            extractors: Vec::new(),
            resolver: NameResolver::new(inflector),
        }
    }

    /// Append a strategy; its results come after those already registered.
    #[must_use]
    pub fn with_extractor(mut self, extractor: Arc<dyn ReferenceExtractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    /// Direct dependencies of `template` given its source text.
    ///
    /// The result is ordered by strategy, then by first appearance, with duplicates
    /// removed after resolution and across strategies. `render @topic` next to
    /// `render 'topics/topic'`, or a render call that repeats an annotation, yields
    /// one entry, so the joined dependency digest has no repeated parts.
    pub fn dependencies(&self, source: &str, template: &TemplateRef) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut dependencies = Vec::new();

        for extractor in &self.extractors {
            for reference in extractor.extract_references(source) {
                let name = match extractor.kind() {
                    ReferenceKind::Implicit => self.resolver.resolve(&reference, template.directory()),
                    ReferenceKind::Explicit => reference,
                };
                if name.is_empty() {
                    continue;
                }
                if seen.insert(name.clone()) {
                    dependencies.push(name);
                }
            }
        }

        tracing::trace!("Extracted {} dependencies from {}", dependencies.len(), template);
        dependencies
    }
}

/// Keep the first occurrence of every item.
pub(crate) fn dedup_preserving_order(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}
