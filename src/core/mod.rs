//! Core types for template digesting
//!
//! This module holds the fundamental abstractions shared by the extractor, the
//! digestor and the source providers.
//!
//! # Modules
//!
//! ## `error` - Error Handling
//!
//! - [`DigestError`] - Enumerated failure modes, with the absorbable
//!   [`DigestError::TemplateNotFound`] distinguishable via [`DigestError::is_not_found`]
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to the user-friendly format
//!
//! ## `template` - Template References
//!
//! - [`TemplateRef`] - A `(logical name, format)` pair and its cache key
//! - [`LookupMode`] - Full-template vs partial lookup
//!
//! # Examples
//!
//! ```rust
//! use template_digest::core::{LookupMode, TemplateRef};
//!
//! let template = TemplateRef::new("topics/_topic", "html");
//! assert_eq!(template.cache_key(), "topics/_topic.html");
//! assert_eq!(template.logical_name(), "topics/topic");
//! assert_eq!(template.directory(), "topics");
//! assert_eq!(LookupMode::for_name(template.name(), false), LookupMode::Partial);
//! ```

pub mod error;
mod template;

pub use error::{DigestError, ErrorContext, user_friendly_error};
pub use template::{LookupMode, TemplateRef};
