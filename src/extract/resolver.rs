//! Canonical names for implicit render references.

use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::inflector::Inflector;

/// `@topic`, `topics`, `message.topics`: an object or collection, not a path.
static OBJECT_REFERENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^@?(?:[a-z]+\.)*([a-z_]+)$").ok());

/// Turns raw render tokens into template names.
///
/// Steps, in order:
/// 1. `render(@topic)`, `render(topics)`, `render(message.topics)` all become
///    `topics/topic` (plural of the last word, then its singular)
/// 2. `render("headline")` inside `message/show` becomes `message/headline`
/// 3. Quotes from string renders are removed
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use template_digest::extract::NameResolver;
/// use template_digest::inflector::EnglishInflector;
///
/// let resolver = NameResolver::new(Arc::new(EnglishInflector));
/// assert_eq!(resolver.resolve("@topic", "topics"), "topics/topic");
/// assert_eq!(resolver.resolve("'headline'", "message"), "message/headline");
/// assert_eq!(resolver.resolve("\"comments/comments\"", "topics"), "comments/comments");
/// ```
#[derive(Clone)]
pub struct NameResolver {
    inflector: Arc<dyn Inflector>,
}

impl fmt::Debug for NameResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameResolver").finish_non_exhaustive()
    }
}

impl NameResolver {
    /// Create a resolver using `inflector` for object references.
    pub fn new(inflector: Arc<dyn Inflector>) -> Self {
        Self {
            inflector,
        }
    }

    /// Resolve `reference` as seen in a template living in `directory`.
    ///
    /// Templates at the root have an empty directory; bare names found there are
    /// left unprefixed.
    pub fn resolve(&self, reference: &str, directory: &str) -> String {
        let mut name = self.expand_object_reference(reference);

        // Root templates have no directory; leave the name bare rather than `/name`
        if !name.contains('/') && !directory.is_empty() {
            name = format!("{directory}/{name}");
        }

        let name = name.replace(['"', '\''], "");
        tracing::trace!("Resolved render reference {reference} to {name}");
        name
    }

    fn expand_object_reference(&self, reference: &str) -> String {
        let word = OBJECT_REFERENCE
            .as_ref()
            .and_then(|regex| regex.captures(reference))
            .and_then(|cap| cap.get(1));

        match word {
            Some(word) => {
                let word = word.as_str();
                format!("{}/{}", self.inflector.pluralize(word), self.inflector.singularize(word))
            }
            None => reference.to_string(),
        }
    }
}
