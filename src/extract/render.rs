//! Implicit dependencies from `render` calls.

use regex::Regex;
use std::sync::LazyLock;

use super::{ReferenceExtractor, ReferenceKind, dedup_preserving_order};

/// Matches:
///   render partial: "comments/comment", collection: commentable.comments
///   render "comments/comments"
///   render 'comments/comments'
///   render('comments/comments')
///   render(@topic)
///   render(topics)
///   render(message.topics)
static RENDER_DEPENDENCY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r#"(?x)
        render\s*                     # render, followed by optional whitespace
        \(?                           # optional opening parenthesis
        (?:partial:|:partial\s+=>)?\s*  # optional partial marker, modern or legacy
        ([@a-z"'][@a-z_/."']+)        # the template name itself
        "#,
    )
    .ok()
});

/// Finds the name token of every `render` invocation.
///
/// The token is kept raw (quotes, `@` and dots included); turning it into a template
/// name is the [`super::NameResolver`]'s job.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderCallExtractor;

impl ReferenceExtractor for RenderCallExtractor {
    fn extract_references(&self, source: &str) -> Vec<String> {
        let Some(regex) = RENDER_DEPENDENCY.as_ref() else {
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
        ReferenceKind::Implicit
    }
}
