//! Error handling for template digesting
//!
//! This module provides the error type shared by every digesting component and the
//! user-facing error reporting used by the `tdigest` binary. The error system follows
//! two principles:
//! 1. **Strongly-typed errors** so callers can tell the absorbable "template not found"
//!    case apart from real failures
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`DigestError`] - Enumerated failure cases for lookup, digesting and configuration
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Absorbed vs propagated errors
//!
//! [`DigestError::TemplateNotFound`] is the only condition the public entry points
//! absorb: a missing template digests to an empty string and has no dependencies.
//! Everything else, including [`DigestError::CircularDependency`], is returned to the
//! caller.
//!
//! # Examples
//!
//! ```rust,no_run
//! use template_digest::core::{DigestError, user_friendly_error};
//!
//! fn lookup() -> Result<(), DigestError> {
//!     Err(DigestError::TemplateNotFound {
//!         name: "topics/show".to_string(),
//!         format: "html".to_string(),
//!         partial: false,
//!     })
//! }
//!
//! if let Err(e) = lookup() {
//!     let ctx = user_friendly_error(anyhow::Error::from(e));
//!     ctx.display();
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for digest operations.
#[derive(Error, Debug)]
pub enum DigestError {
    /// The source provider has no template for the requested name and format.
    #[error("Missing template {name}.{format}{}", partial_suffix(.partial))]
    TemplateNotFound {
        /// Logical name that was looked up
        name: String,
        /// Format the lookup was restricted to
        format: String,
        /// Whether the lookup used partial mode
        partial: bool,
    },

    /// A template depends on itself, directly or through other templates.
    ///
    /// The chain lists cache keys from the first occurrence of the repeated
    /// template to its re-entry.
    #[error("Circular template dependency detected: {}", .chain.join(" → "))]
    CircularDependency {
        /// Cache keys forming the cycle, first and last entries are equal
        chain: Vec<String>,
    },

    /// A template name that cannot be mapped onto the template store.
    #[error("Invalid template name '{name}': {reason}")]
    InvalidTemplateName {
        /// The offending name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// I/O failure other than a missing template.
    #[error("Failed to {operation} {path}")]
    Io {
        /// What was being attempted
        operation: String,
        /// Path involved
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was requested
        path: String,
    },

    /// A configuration file exists but could not be parsed.
    #[error("Invalid configuration file syntax in {file}")]
    ConfigParse {
        /// Path of the configuration file
        file: String,
        /// Parser message
        reason: String,
    },

    /// Catch-all for failures without a dedicated variant.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

const fn partial_suffix(partial: &bool) -> &'static str {
    if *partial { " (partial)" } else { "" }
}

impl DigestError {
    /// Returns `true` for the "template not found" condition that digesting absorbs.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::TemplateNotFound { .. })
    }

    /// Build a [`DigestError::TemplateNotFound`] for a lookup.
    pub fn not_found(name: impl Into<String>, format: impl Into<String>, partial: bool) -> Self {
        Self::TemplateNotFound {
            name: name.into(),
            format: format.into(),
            partial,
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// Suggestions are printed in green and details in yellow by [`ErrorContext::display`].
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: DigestError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: DigestError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions where one is known.
///
/// Errors carrying a [`DigestError`] (directly or as a context layer) get tailored
/// suggestions; anything else is wrapped as [`DigestError::Other`] with the full
/// `anyhow` chain as the message.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let message = format!("{error:#}");
    match error.downcast::<DigestError>() {
        Ok(digest_error) => create_error_context(digest_error),
        Err(error) => match error.downcast::<std::io::Error>() {
            Ok(io_error) => ErrorContext::new(DigestError::Io {
                operation: "access".to_string(),
                path: "unknown".to_string(),
                source: io_error,
            })
            .with_suggestion("Check that the file or directory exists and is readable"),
            Err(_) => ErrorContext::new(DigestError::Other {
                message,
            }),
        },
    }
}

fn create_error_context(error: DigestError) -> ErrorContext {
    match &error {
        DigestError::TemplateNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the template name and the configured template root (--root)")
            .with_details("Partials are stored with a leading underscore, e.g. topics/_topic"),
        DigestError::CircularDependency {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Remove one of the render calls or dependency annotations in the cycle")
            .with_details("A template cannot depend on itself, directly or transitively"),
        DigestError::InvalidTemplateName {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Use a relative logical name such as 'topics/show'"),
        DigestError::ConfigNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Pass an existing file to --config or unset TDIGEST_CONFIG"),
        DigestError::ConfigParse {
            reason,
            ..
        } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_suggestion("Check the TOML syntax of the configuration file")
                .with_details(details)
        }
        DigestError::Io {
            source,
            ..
        } => {
            let details = source.to_string();
            ErrorContext::new(error).with_details(details)
        }
        DigestError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
