//! Dependency-aware digests for view templates.
//!
//! A template's digest covers its own source and the digests of every template
//! it renders, so editing a deeply nested partial changes the digest of each
//! template that reaches it. The digests are meant to be used as cache keys for
//! rendered fragments.
//!
//! # Architecture Overview
//!
//! - [`source`] - Where template text comes from ([`source::SourceProvider`])
//! - [`extract`] - Finds `render` calls and `# Template Dependency:` comments
//! - [`inflector`] - English pluralization used to name partials after variables
//! - [`digest`] - Memoized recursive digests and dependency listings
//! - [`core`] - Template identifiers and error types
//! - [`config`] - `tdigest.toml` loading for the command-line tool
//! - [`cli`] - The `tdigest` command-line interface
//!
//! # Example
//!
//! ```rust
//! use template_digest::digest::{Digestor, DigestOptions};
//! use template_digest::source::MemorySource;
//!
//! let source = MemorySource::new()
//!     .with_template("topics/show", "html", "<%= render @topic %>")
//!     .with_template("topics/_topic", "html", "<h1><%= topic.title %></h1>");
//!
//! let digestor = Digestor::default();
//! let digest = digestor
//!     .digest("topics/show", "html", &source, DigestOptions::default())
//!     .unwrap();
//! assert_eq!(digest.len(), 32);
//!
//! let deps = digestor.dependencies("topics/show", "html", &source).unwrap();
//! assert_eq!(deps, vec!["topics/topic"]);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod digest;
pub mod extract;
pub mod inflector;
pub mod source;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use digest::{DigestOptions, Digestor};
