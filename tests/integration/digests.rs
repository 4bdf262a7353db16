//! Digest propagation and memoization over in-memory templates.

use std::sync::Arc;

use template_digest::digest::{DigestCache, DigestOptions, Digestor, NestedDependency, hash_content};
use template_digest::source::MemorySource;
use template_digest::test_utils::{RecordingLogger, init_test_logging};

const SHOW: &str = r#"<%= render "comments/comments" %>
<%= render @topic %>"#;
const COMMENTS: &str = r#"<%= render partial: "comments/comment", collection: @comments %>"#;

fn blog(comment: &str) -> MemorySource {
    MemorySource::new()
        .with_template("topics/show", "html", SHOW)
        .with_template("topics/_topic", "html", "<h1><%= topic.title %></h1>")
        .with_template("topics/index", "html", "<%= render @topics %>")
        .with_template("comments/_comments", "html", COMMENTS)
        .with_template("comments/_comment", "html", comment)
}

fn fresh() -> Digestor {
    Digestor::new().with_cache(Arc::new(DigestCache::new()))
}

fn digest_of(source: &MemorySource, name: &str) -> String {
    fresh()
        .digest(name, "html", source, DigestOptions::default())
        .expect("digest should succeed")
}

#[test]
fn test_editing_a_nested_partial_changes_every_ancestor() {
    init_test_logging(None);

    let before = blog("<p><%= comment.body %></p>");
    let after = blog("<p class=\"comment\"><%= comment.body %></p>");

    assert_ne!(digest_of(&before, "topics/show"), digest_of(&after, "topics/show"));
    assert_ne!(
        digest_of(&before, "comments/_comments"),
        digest_of(&after, "comments/_comments")
    );
    assert_ne!(digest_of(&before, "comments/_comment"), digest_of(&after, "comments/_comment"));
}

#[test]
fn test_editing_a_partial_leaves_unrelated_templates_alone() {
    let before = blog("<p><%= comment.body %></p>");
    let after = blog("<p>edited</p>");

    // topics/index renders topics/topic only
    assert_eq!(digest_of(&before, "topics/index"), digest_of(&after, "topics/index"));
    assert_eq!(digest_of(&before, "topics/_topic"), digest_of(&after, "topics/_topic"));
}

#[test]
fn test_digest_matches_manual_composition() {
    let source = blog("<p>c</p>");
    let comment = hash_content("<p>c</p>", "");
    let comments = hash_content(COMMENTS, &comment);
    let topic = hash_content("<h1><%= topic.title %></h1>", "");

    assert_eq!(
        digest_of(&source, "topics/show"),
        hash_content(SHOW, &format!("{comments}-{topic}"))
    );
}

#[test]
fn test_repeat_digests_do_not_touch_the_source() {
    let source = blog("<p>c</p>");
    let digestor = fresh();

    let first = digestor.digest("topics/show", "html", &source, DigestOptions::default()).unwrap();
    let lookups = source.lookups();
    assert_eq!(lookups, 4);

    for _ in 0..3 {
        let again =
            digestor.digest("topics/show", "html", &source, DigestOptions::default()).unwrap();
        assert_eq!(again, first);
    }
    assert_eq!(source.lookups(), lookups);

    // Shared partials are already cached
    source.reset_lookups();
    digestor.digest("topics/index", "html", &source, DigestOptions::default()).unwrap();
    assert_eq!(source.lookups(), 1);
}

#[test]
fn test_cached_digest_outlives_source_edits_until_cleared() {
    let source = blog("<p>c</p>");
    let digestor = fresh();
    let first = digestor.digest("topics/show", "html", &source, DigestOptions::default()).unwrap();

    source.insert("comments/_comment", "html", "<p>changed</p>");
    let stale = digestor.digest("topics/show", "html", &source, DigestOptions::default()).unwrap();
    assert_eq!(stale, first);

    digestor.cache().clear();
    let refreshed =
        digestor.digest("topics/show", "html", &source, DigestOptions::default()).unwrap();
    assert_ne!(refreshed, first);
}

#[test]
fn test_missing_dependency_is_logged_and_digests_empty() {
    let logger = RecordingLogger::new();
    let source = MemorySource::new().with_template("pages/home", "html", "<%= render 'shared/nav' %>");
    let digestor = fresh().with_logger(Arc::new(logger.clone()));

    let digest = digestor.digest("pages/home", "html", &source, DigestOptions::default()).unwrap();

    assert_eq!(digest, hash_content("<%= render 'shared/nav' %>", ""));
    assert_eq!(logger.errors(), vec!["Couldn't find template for digesting: shared/nav.html"]);
    assert_eq!(digestor.cache().get("shared/nav.html").as_deref(), Some(""));
}

#[test]
fn test_explicit_dependency_contributes_to_digest() {
    let with_annotation = MemorySource::new()
        .with_template("pages/home", "html", "<%# Template Dependency: shared/footer %>")
        .with_template("shared/_footer", "html", "v1");
    let edited = MemorySource::new()
        .with_template("pages/home", "html", "<%# Template Dependency: shared/footer %>")
        .with_template("shared/_footer", "html", "v2");

    assert_ne!(digest_of(&with_annotation, "pages/home"), digest_of(&edited, "pages/home"));
}

#[test]
fn test_nested_dependencies_of_blog() {
    let source = blog("<p>c</p>");
    let nested = fresh().nested_dependencies("topics/show", "html", &source).unwrap();

    assert_eq!(
        nested,
        vec![
            NestedDependency::new(
                "comments/comments".to_string(),
                vec![NestedDependency::Leaf("comments/comment".to_string())],
            ),
            NestedDependency::Leaf("topics/topic".to_string()),
        ]
    );
    assert_eq!(
        serde_json::to_string(&nested).unwrap(),
        r#"[{"comments/comments":["comments/comment"]},"topics/topic"]"#
    );
}

#[test]
fn test_transitive_cycle_is_an_error_and_not_cached() {
    let source = MemorySource::new()
        .with_template("a/a", "html", "<%= render 'b/b' %>")
        .with_template("b/_b", "html", "<%= render 'a/a' %>")
        .with_template("a/_a", "html", "<%= render 'b/b' %>");
    let digestor = fresh();

    let err = digestor.digest("a/a", "html", &source, DigestOptions::default()).unwrap_err();
    assert!(err.to_string().contains("Circular template dependency"), "{err}");
    assert!(digestor.cache().get("a/a.html").is_none());
}

#[test]
fn test_editing_a_template_that_renders_its_own_partial_changes_its_digest() {
    let version = |text: &str| {
        MemorySource::new()
            .with_template("users/show", "html", text)
            .with_template("users/_show", "html", "partial body")
    };
    let v1 = version("FULL v1 <%= render 'show' %>");
    let v2 = version("FULL v2 EDITED <%= render 'show' %>");

    let d1 = digest_of(&v1, "users/show");
    let d2 = digest_of(&v2, "users/show");
    let partial = digest_of(&v1, "users/_show");

    assert_ne!(d1, d2);
    assert_ne!(d1, partial);
    assert_eq!(partial, hash_content("partial body", ""));
}

#[test]
fn test_partial_digested_first_does_not_shadow_the_full_template() {
    let source = MemorySource::new()
        .with_template("users/show", "html", "FULL <%= render 'show' %>")
        .with_template("users/_show", "html", "partial body");
    let digestor = fresh();

    let partial =
        digestor.digest("users/show", "html", &source, DigestOptions::partial()).unwrap();
    let full = digestor.digest("users/show", "html", &source, DigestOptions::default()).unwrap();

    assert_eq!(partial, hash_content("partial body", ""));
    assert_eq!(full, hash_content("FULL <%= render 'show' %>", &partial));
}
