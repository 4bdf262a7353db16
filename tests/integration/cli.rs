//! `tdigest` commands run as a subprocess.

use std::path::Path;
use std::sync::Arc;

use assert_cmd::Command;
use predicates::prelude::*;
use template_digest::digest::{DigestCache, DigestOptions, Digestor};

use crate::filesystem::blog_tree;

/// A `tdigest` invocation isolated from the caller's configuration.
fn tdigest(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tdigest").unwrap();
    cmd.current_dir(cwd)
        .env_remove("TDIGEST_CONFIG")
        .env_remove("RUST_LOG")
        .env("HOME", cwd)
        .env("XDG_CONFIG_HOME", cwd)
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_deps_lists_direct_dependencies() {
    let tree = blog_tree();
    let root = tree.path().to_str().unwrap();

    tdigest(tree.path())
        .args(["--root", root, "deps", "topics/show"])
        .assert()
        .success()
        .stdout("comments/comments\ntopics/topic\n");
}

#[test]
fn test_deps_json() {
    let tree = blog_tree();
    let root = tree.path().to_str().unwrap();

    tdigest(tree.path())
        .args(["--root", root, "deps", "topics/index", "--json"])
        .assert()
        .success()
        .stdout("[\"topics/topic\",\"shared/footer\"]\n");
}

#[test]
fn test_digest_json_matches_library() {
    let tree = blog_tree();
    let root = tree.path().to_str().unwrap();

    let output = tdigest(tree.path())
        .args(["--root", root, "digest", "topics/show", "topics/index", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let digestor = Digestor::new().with_cache(Arc::new(DigestCache::new()));
    for name in ["topics/show", "topics/index"] {
        let expected =
            digestor.digest(name, "html", &tree.source(), DigestOptions::default()).unwrap();
        assert_eq!(printed[format!("{name}.html")], serde_json::Value::String(expected));
    }
}

#[test]
fn test_digest_all_lists_non_partials() {
    let tree = blog_tree();
    let root = tree.path().to_str().unwrap();

    tdigest(tree.path())
        .args(["--root", root, "digest", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("topics/index.html"))
        .stdout(predicate::str::contains("topics/show.html"))
        .stdout(predicate::str::contains("_comment").not());
}

#[test]
fn test_digest_missing_template_is_reported_not_fatal() {
    let tree = blog_tree();
    let root = tree.path().to_str().unwrap();

    tdigest(tree.path())
        .args(["--root", root, "digest", "nowhere/page"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nowhere/page.html  (missing)"));
}

#[test]
fn test_tree_prints_nested_dependencies() {
    let tree = blog_tree();
    let root = tree.path().to_str().unwrap();

    tdigest(tree.path())
        .args(["--root", root, "tree", "topics/show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("topics/show.html"))
        .stdout(predicate::str::contains("│   └── comments/comment"))
        .stdout(predicate::str::contains("└── topics/topic"));
}

#[test]
fn test_tree_reports_cycles() {
    let tree = blog_tree();
    tree.write("loops/_a.html.erb", "<%= render 'loops/b' %>").unwrap();
    tree.write("loops/_b.html.erb", "<%= render 'loops/a' %>").unwrap();
    let root = tree.path().to_str().unwrap();

    tdigest(tree.path())
        .args(["--root", root, "tree", "loops/_a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Circular template dependency"));
}

#[test]
fn test_missing_root_fails() {
    let tree = blog_tree();

    tdigest(tree.path())
        .args(["--root", "does/not/exist", "deps", "topics/show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_config_file_in_working_directory_sets_root() {
    let tree = blog_tree();
    let project = tempfile::TempDir::new().unwrap();
    std::fs::write(
        project.path().join("tdigest.toml"),
        format!("root = {:?}\n", tree.path().to_str().unwrap()),
    )
    .unwrap();

    tdigest(project.path())
        .args(["deps", "topics/show"])
        .assert()
        .success()
        .stdout("comments/comments\ntopics/topic\n");
}

#[test]
fn test_init_writes_config_once() {
    let project = tempfile::TempDir::new().unwrap();

    tdigest(project.path())
        .args(["--root", "views", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let written = std::fs::read_to_string(project.path().join("tdigest.toml")).unwrap();
    assert!(written.contains("root = \"views\""), "{written}");

    tdigest(project.path()).arg("init").assert().failure();
    tdigest(project.path()).args(["init", "--force"]).assert().success();
}
