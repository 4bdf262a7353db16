//! Explicit dependencies named by annotation comments.

use regex::Regex;
use std::sync::LazyLock;

use super::{ReferenceExtractor, ReferenceKind, dedup_preserving_order};

static EXPLICIT_DEPENDENCY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"# Template Dependency: (\S+)").ok());

/// Finds `# Template Dependency: <name>` annotations.
///
/// Used for dependencies a render-call scan cannot see, such as names computed at
/// runtime. The token runs up to the next whitespace and is taken verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitDependencyExtractor;

impl ReferenceExtractor for ExplicitDependencyExtractor {
    fn extract_references(&self, source: &str) -> Vec<String> {
        let Some(regex) = EXPLICIT_DEPENDENCY.as_ref() else {
            return Vec::new();
        };

        dedup_preserving_order(
            regex
                .captures_iter(source)
                .filter_map(|cap| cap.get(1))
                .map(|m| m.as_str().to_string()),
        )
    }

    fn kind(&self) -> ReferenceKind {
        ReferenceKind::Explicit
    }
}
