//! Dependency-aware template digests.
//!
//! A template's digest covers its own source and, recursively, the digests of every
//! template it renders. Editing any template in a dependency tree changes the digest
//! of everything above it, which makes digests usable as cache-busting keys for
//! rendered fragments.
//!
//! # Algorithm
//!
//! ```text
//! digest(t) = hash(source(t) + "-" + join("-", [digest(d) for d in dependencies(t)]))
//! ```
//!
//! - Dependencies are always digested as partials
//! - A missing template digests to `""` and is logged at error level, so its
//!   dependents still get a digest
//! - `hash` is SHA-256 truncated to 128 bits, as 32 lowercase hex characters
//!
//! # Memoization and locking
//!
//! Results are memoized in a [`DigestCache`] under `"<name>.<format>"` and the lookup
//! mode, so a template that renders its own same-named partial keeps a digest of
//! its own source. A top-level
//! [`Digestor::digest`] call holds the cache lock for its whole recursive
//! computation; sub-digests work on the locked map directly.
//!
//! # Cycles
//!
//! Each top-level request tracks the templates currently being digested. Reaching
//! one of them again fails the request with [`DigestError::CircularDependency`];
//! nothing from the failed request is memoized.
//!
//! # Examples
//!
//! ```rust
//! use template_digest::digest::{DigestCache, DigestOptions, Digestor};
//! use template_digest::source::MemorySource;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), template_digest::core::DigestError> {
//! let source = MemorySource::new()
//!     .with_template("topics/show", "html", "<%= render @topic %>")
//!     .with_template("topics/_topic", "html", "<h1><%= topic.title %></h1>");
//!
//! let digestor = Digestor::new().with_cache(Arc::new(DigestCache::new()));
//! let digest = digestor.digest("topics/show", "html", &source, DigestOptions::default())?;
//! assert_eq!(digest.len(), 32);
//!
//! assert_eq!(digestor.dependencies("topics/show", "html", &source)?, vec!["topics/topic"]);
//! # Ok(())
//! # }
//! ```

mod cache;
mod logger;
mod nested;
mod node;

pub use cache::DigestCache;
pub use logger::{DigestLogger, NoopLogger, TracingLogger};
pub use nested::NestedDependency;

use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;

use crate::constants::DIGEST_BYTES;
use crate::core::{DigestError, LookupMode, TemplateRef};
use crate::extract::DependencyExtractor;
use crate::inflector::Inflector;
use crate::source::SourceProvider;
use node::DigestNode;

/// Options for a digest request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigestOptions {
    /// Look the template up as a partial even if its name does not say so
    pub partial: bool,
}

impl DigestOptions {
    /// Options forcing partial lookup.
    #[must_use]
    pub const fn partial() -> Self {
        Self {
            partial: true,
        }
    }
}

/// Templates being digested by the current request, outermost first.
type InProgress = Vec<(String, LookupMode)>;

/// Computes and memoizes template digests.
///
/// Cloning is cheap; clones share the cache, extractor and logger.
#[derive(Clone)]
pub struct Digestor {
    cache: Arc<DigestCache>,
    extractor: DependencyExtractor,
    logger: Arc<dyn DigestLogger>,
}

impl fmt::Debug for Digestor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Digestor")
            .field("extractor", &self.extractor)
            .finish_non_exhaustive()
    }
}

impl Default for Digestor {
    fn default() -> Self {
        Self::new()
    }
}

impl Digestor {
    /// A digestor using the process-wide cache, the default extractor and no logging.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: DigestCache::global(),
            extractor: DependencyExtractor::default(),
            logger: Arc::new(NoopLogger),
        }
    }

    /// Use `cache` instead of the process-wide cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<DigestCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Report digests and missing templates to `logger`.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn DigestLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Use `inflector` for object references with the default extraction strategies.
    #[must_use]
    pub fn with_inflector(mut self, inflector: Arc<dyn Inflector>) -> Self {
        self.extractor = DependencyExtractor::new(inflector);
        self
    }

    /// Replace the dependency extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: DependencyExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// The cache this digestor memoizes into.
    #[must_use]
    pub fn cache(&self) -> &Arc<DigestCache> {
        &self.cache
    }

    /// Digest of `name` in `format`, memoized.
    ///
    /// Partial lookup is used when `options.partial` is set or the name contains
    /// `"/_"`. A missing template yields `Ok("")`.
    ///
    /// # Errors
    ///
    /// - [`DigestError::CircularDependency`] when a template depends on itself
    /// - Any non-not-found error from the source provider
    pub fn digest(
        &self,
        name: &str,
        format: &str,
        provider: &dyn SourceProvider,
        options: DigestOptions,
    ) -> Result<String, DigestError> {
        let template = TemplateRef::new(name, format);
        let mode = LookupMode::for_name(name, options.partial);

        let mut entries = self.cache.lock();
        let mut in_progress = InProgress::new();
        self.digest_locked(&mut entries, &mut in_progress, template, mode, provider)
    }

    /// Direct dependencies of `name` in `format`.
    ///
    /// Render references come first, then explicit annotations. A missing template
    /// has no dependencies. Nothing is cached.
    ///
    /// # Errors
    ///
    /// Any non-not-found error from the source provider.
    pub fn dependencies(
        &self,
        name: &str,
        format: &str,
        provider: &dyn SourceProvider,
    ) -> Result<Vec<String>, DigestError> {
        let node = DigestNode::new(
            TemplateRef::new(name, format),
            LookupMode::for_name(name, false),
            provider,
            &self.extractor,
        );
        absorb_missing(node.dependencies())
    }

    /// Dependencies of `name` in `format`, each with its own dependencies nested.
    ///
    /// Nested levels are looked up as partials. Nothing is hashed or cached.
    ///
    /// # Errors
    ///
    /// - [`DigestError::CircularDependency`] when a template depends on itself
    /// - Any non-not-found error from the source provider
    pub fn nested_dependencies(
        &self,
        name: &str,
        format: &str,
        provider: &dyn SourceProvider,
    ) -> Result<Vec<NestedDependency>, DigestError> {
        let mut in_progress = InProgress::new();
        self.nested_with(
            &mut in_progress,
            TemplateRef::new(name, format),
            LookupMode::for_name(name, false),
            provider,
        )
    }

    fn nested_with(
        &self,
        in_progress: &mut InProgress,
        template: TemplateRef,
        mode: LookupMode,
        provider: &dyn SourceProvider,
    ) -> Result<Vec<NestedDependency>, DigestError> {
        enter(in_progress, &template, mode)?;

        let node = DigestNode::new(template, mode, provider, &self.extractor);
        let result = absorb_missing(node.dependencies()).and_then(|dependencies| {
            dependencies
                .into_iter()
                .map(|dependency| -> Result<NestedDependency, DigestError> {
                    let child = TemplateRef::new(dependency.as_str(), node.template().format());
                    let nested = self.nested_with(in_progress, child, LookupMode::Partial, provider)?;
                    Ok(NestedDependency::new(dependency, nested))
                })
                .collect()
        });

        in_progress.pop();
        result
    }

    /// Check-or-compute-and-store for one template. The caller holds the cache lock.
    fn digest_locked(
        &self,
        entries: &mut cache::Entries,
        in_progress: &mut InProgress,
        template: TemplateRef,
        mode: LookupMode,
        provider: &dyn SourceProvider,
    ) -> Result<String, DigestError> {
        let key = template.cache_key();
        if let Some(digest) = entries.get(&(key.clone(), mode)) {
            tracing::debug!("Digest cache hit for {key} ({mode})");
            return Ok(digest.clone());
        }
        tracing::debug!("Digest cache miss for {key} ({mode})");

        enter(in_progress, &template, mode)?;
        let node = DigestNode::new(template, mode, provider, &self.extractor);
        let result = self.compute(entries, in_progress, &node, provider);
        in_progress.pop();

        Ok(cache::insert_if_absent(entries, key, mode, result?))
    }

    fn compute(
        &self,
        entries: &mut cache::Entries,
        in_progress: &mut InProgress,
        node: &DigestNode<'_>,
        provider: &dyn SourceProvider,
    ) -> Result<String, DigestError> {
        let template = node.template();

        let source = match node.source() {
            Ok(source) => source,
            Err(e) if e.is_not_found() => {
                self.logger.error(&format!("Couldn't find template for digesting: {template}"));
                return Ok(String::new());
            }
            Err(e) => return Err(e),
        };

        let dependencies = node.dependencies()?;
        let mut dependency_digests = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            let child = TemplateRef::new(dependency, template.format());
            dependency_digests.push(self.digest_locked(
                entries,
                in_progress,
                child,
                LookupMode::Partial,
                provider,
            )?);
        }

        let digest = hash_content(&source.text, &dependency_digests.join("-"));
        self.logger.info(&format!("Cache digest for {template}: {digest}"));
        Ok(digest)
    }
}

/// Push `template` onto the in-progress stack, failing if it is already there.
fn enter(
    in_progress: &mut InProgress,
    template: &TemplateRef,
    mode: LookupMode,
) -> Result<(), DigestError> {
    let key = template.cache_key();
    if let Some(start) = in_progress.iter().position(|(k, m)| *k == key && *m == mode) {
        let chain = in_progress[start..]
            .iter()
            .map(|(k, _)| k.clone())
            .chain(std::iter::once(key))
            .collect();
        return Err(DigestError::CircularDependency {
            chain,
        });
    }
    in_progress.push((key, mode));
    Ok(())
}

fn absorb_missing(result: Result<Vec<String>, DigestError>) -> Result<Vec<String>, DigestError> {
    match result {
        Err(e) if e.is_not_found() => {
            tracing::debug!("{e}: treating as having no dependencies");
            Ok(Vec::new())
        }
        other => other,
    }
}

/// `hash(source + "-" + dependency_digest)` as lowercase hex.
///
/// SHA-256 truncated to 128 bits. Used for change detection, not integrity.
pub fn hash_content(source: &str, dependency_digest: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hasher.update(b"-");
    hasher.update(dependency_digest.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..DIGEST_BYTES])
}

/// [`Digestor::digest`] with the process-wide cache and default settings.
///
/// # Errors
///
/// See [`Digestor::digest`].
pub fn digest(
    name: &str,
    format: &str,
    provider: &dyn SourceProvider,
    options: DigestOptions,
) -> Result<String, DigestError> {
    Digestor::new().digest(name, format, provider, options)
}

/// [`Digestor::dependencies`] with default settings.
///
/// # Errors
///
/// See [`Digestor::dependencies`].
pub fn dependencies(
    name: &str,
    format: &str,
    provider: &dyn SourceProvider,
) -> Result<Vec<String>, DigestError> {
    Digestor::new().dependencies(name, format, provider)
}

/// [`Digestor::nested_dependencies`] with default settings.
///
/// # Errors
///
/// See [`Digestor::nested_dependencies`].
pub fn nested_dependencies(
    name: &str,
    format: &str,
    provider: &dyn SourceProvider,
) -> Result<Vec<NestedDependency>, DigestError> {
    Digestor::new().nested_dependencies(name, format, provider)
}
