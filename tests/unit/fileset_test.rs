//! Tests for the checked file set against real git repositories

use crate::common::git_repo::TempGitRepo;
use pygate::fileset;

fn default_exclude() -> Vec<String> {
    vec!["tests/".to_string(), "docs/".to_string(), "examples/".to_string()]
}

#[test]
fn collects_tracked_python_files() {
    let repo = TempGitRepo::new();
    repo.track_file("src/a.py", "x = 1\n");
    repo.track_file("src/b.py", "y = 2\n");
    repo.track_file("README.md", "# readme\n");

    let files = fileset::collect(repo.path(), &default_exclude()).unwrap();
    assert_eq!(files, vec!["src/a.py", "src/b.py"]);
}

#[test]
fn untracked_files_are_not_in_the_set() {
    let repo = TempGitRepo::new();
    repo.track_file("src/a.py", "x = 1\n");
    repo.write_file("src/untracked.py", "y = 2\n");

    let files = fileset::collect(repo.path(), &default_exclude()).unwrap();
    assert_eq!(files, vec!["src/a.py"]);
}

#[test]
fn excluded_prefixes_are_dropped() {
    let repo = TempGitRepo::new();
    repo.track_file("src/a.py", "x = 1\n");
    repo.track_file("tests/test_a.py", "bad   =   1\n");
    repo.track_file("docs/conf.py", "project = 'x'\n");
    repo.track_file("examples/demo.py", "print(1)\n");

    let files = fileset::collect(repo.path(), &default_exclude()).unwrap();
    assert_eq!(files, vec!["src/a.py"]);
}

#[test]
fn set_survives_commits_unchanged() {
    // Determinism: same repo state, same set
    let repo = TempGitRepo::new();
    repo.track_file("src/a.py", "x = 1\n");
    let before = fileset::collect(repo.path(), &default_exclude()).unwrap();
    repo.commit("add a.py");
    let after = fileset::collect(repo.path(), &default_exclude()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn exclusions_anchor_at_repo_root_from_a_subdirectory() {
    // Started from src/, tracked paths must still be repo-root-relative:
    // src/tests/x.py stays in the set and top-level tests/ stays out.
    let repo = TempGitRepo::new();
    repo.track_file("src/tests/x.py", "x = 1\n");
    repo.track_file("tests/x.py", "y = 2\n");

    let files = fileset::collect(&repo.path().join("src"), &default_exclude()).unwrap();
    assert_eq!(files, vec!["src/tests/x.py"]);
}

#[test]
fn work_tree_root_resolves_from_a_subdirectory() {
    let repo = TempGitRepo::new();
    repo.track_file("src/deep/a.py", "x = 1\n");

    let from_root = fileset::work_tree_root(repo.path()).unwrap();
    let from_subdir = fileset::work_tree_root(&repo.path().join("src/deep")).unwrap();
    assert_eq!(from_root, from_subdir);

    let plain = tempfile::TempDir::new().unwrap();
    assert!(fileset::work_tree_root(plain.path()).is_none());
}

#[test]
fn work_tree_detection() {
    let repo = TempGitRepo::new();
    assert!(fileset::in_work_tree(repo.path()));

    let plain = tempfile::TempDir::new().unwrap();
    assert!(!fileset::in_work_tree(plain.path()));
}

#[test]
fn collect_outside_a_repo_errors() {
    let plain = tempfile::TempDir::new().unwrap();
    assert!(fileset::collect(plain.path(), &default_exclude()).is_err());
}
