//! Templates laid out on disk.

use std::sync::Arc;

use template_digest::core::TemplateRef;
use template_digest::digest::{DigestCache, DigestOptions, Digestor, hash_content};
use template_digest::test_utils::TemplateTree;

pub(crate) fn blog_tree() -> TemplateTree {
    let tree = TemplateTree::new().unwrap();
    tree.write(
        "topics/show.html.erb",
        "<%= render \"comments/comments\" %>\n<%= render @topic %>\n",
    )
    .unwrap();
    tree.write("topics/_topic.html.erb", "<h1><%= topic.title %></h1>\n").unwrap();
    tree.write(
        "topics/index.html.erb",
        "<%# Template Dependency: shared/footer %>\n<%= render @topics %>\n",
    )
    .unwrap();
    tree.write(
        "comments/_comments.html.erb",
        "<%= render partial: \"comments/comment\", collection: @comments %>\n",
    )
    .unwrap();
    tree.write("comments/_comment.html.erb", "<p><%= comment.body %></p>\n").unwrap();
    tree.write("shared/_footer.html.erb", "<footer></footer>\n").unwrap();
    tree.write("topics/show.json.jbuilder", "json.title @topic.title\n").unwrap();
    tree
}

fn fresh() -> Digestor {
    Digestor::new().with_cache(Arc::new(DigestCache::new()))
}

#[test]
fn test_dependencies_from_disk() {
    let tree = blog_tree();
    let deps = fresh().dependencies("topics/show", "html", &tree.source()).unwrap();
    assert_eq!(deps, vec!["comments/comments", "topics/topic"]);

    let deps = fresh().dependencies("topics/index", "html", &tree.source()).unwrap();
    assert_eq!(deps, vec!["topics/topic", "shared/footer"]);
}

#[test]
fn test_digest_from_disk_reads_handler_files() {
    let tree = blog_tree();
    let digest = fresh()
        .digest("comments/_comment", "html", &tree.source(), DigestOptions::default())
        .unwrap();
    assert_eq!(digest, hash_content("<p><%= comment.body %></p>\n", ""));
}

#[test]
fn test_formats_are_digested_independently() {
    let tree = blog_tree();
    let digestor = fresh();
    let source = tree.source();

    let html = digestor.digest("topics/show", "html", &source, DigestOptions::default()).unwrap();
    let json = digestor.digest("topics/show", "json", &source, DigestOptions::default()).unwrap();

    // No jbuilder handler is configured
    assert!(json.is_empty());
    assert!(!html.is_empty());
    assert!(digestor.cache().get("topics/show.json").is_some());
}

#[test]
fn test_editing_a_file_changes_the_digest_after_clear() {
    let tree = blog_tree();
    let digestor = fresh();
    let source = tree.source();

    let before = digestor.digest("topics/show", "html", &source, DigestOptions::default()).unwrap();
    tree.write("comments/_comment.html.erb", "<p>edited</p>\n").unwrap();
    digestor.cache().clear();
    let after = digestor.digest("topics/show", "html", &source, DigestOptions::default()).unwrap();

    assert_ne!(before, after);
}

#[test]
fn test_template_listing() {
    let tree = blog_tree();
    let names: Vec<String> =
        tree.source().templates(false).unwrap().iter().map(TemplateRef::cache_key).collect();
    assert_eq!(names, vec!["topics/index.html", "topics/show.html", "topics/show.json"]);

    let all = tree.source().templates(true).unwrap();
    assert!(all.contains(&TemplateRef::new("comments/_comment", "html")));
}

#[test]
fn test_path_traversal_is_rejected() {
    let tree = blog_tree();
    let err = fresh()
        .digest("../secrets", "html", &tree.source(), DigestOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("../secrets"), "{err}");
}
