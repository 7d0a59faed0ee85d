//! Integration tests for git checkouts from a local repository.

mod support;

use std::fs;
use std::path::Path;

use git2::{IndexAddOption, Repository, Signature};
use tempfile::TempDir;

use pickle_core::download::GitFetcher;
use pickle_core::prelude::*;

fn commit_all(repo: &Repository, message: &str) -> git2::Oid {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = Signature::now("pickle", "pickle@example.com").unwrap();

    let parents = match repo.head() {
        Ok(head) => vec![repo.find_commit(head.target().unwrap()).unwrap()],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<_> = parents.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}

/// Repository with `config.m4` at v1 (tagged) and a later commit on master.
fn upstream(dir: &Path) -> (git2::Oid, git2::Oid) {
    let repo = Repository::init(dir).unwrap();
    repo.set_head("refs/heads/master").unwrap();

    fs::write(dir.join("config.m4"), "PHP_ARG_ENABLE(foo)\n").unwrap();
    let v1 = commit_all(&repo, "v1");
    let obj = repo.find_object(v1, None).unwrap();
    repo.tag_lightweight("v1", &obj, false).unwrap();

    fs::write(dir.join("NEWS"), "unreleased\n").unwrap();
    let head = commit_all(&repo, "after v1");
    (v1, head)
}

#[test]
fn checks_out_tagged_reference() {
    if !support::git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let temp = TempDir::new().unwrap();
    let upstream_dir = temp.path().join("upstream").join("foo");
    fs::create_dir_all(&upstream_dir).unwrap();
    let (v1, _) = upstream(&upstream_dir);

    let url = upstream_dir.to_str().unwrap();
    let descriptor = PackageDescriptor::git("foo", url, "v1");
    let dest = temp.path().join("ext").join("foo");

    GitFetcher::default().fetch(&descriptor, &dest).unwrap();

    assert!(dest.join("config.m4").is_file());
    assert!(!dest.join("NEWS").exists());
    assert_eq!(GitFetcher::head_commit(&dest).unwrap(), v1.to_string());
}

#[test]
fn default_reference_is_master() {
    if !support::git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let temp = TempDir::new().unwrap();
    let upstream_dir = temp.path().join("foo");
    fs::create_dir_all(&upstream_dir).unwrap();
    let (_, head) = upstream(&upstream_dir);

    let descriptor = PackageDescriptor::git("foo", upstream_dir.to_str().unwrap(), "master");
    let dest = temp.path().join("ext").join("foo");

    GitFetcher::default().fetch(&descriptor, &dest).unwrap();

    assert!(dest.join("NEWS").is_file());
    assert_eq!(GitFetcher::head_commit(&dest).unwrap(), head.to_string());
}

#[test]
fn unknown_reference_fails_at_checkout() {
    if !support::git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let temp = TempDir::new().unwrap();
    let upstream_dir = temp.path().join("foo");
    fs::create_dir_all(&upstream_dir).unwrap();
    upstream(&upstream_dir);

    let descriptor = PackageDescriptor::git("foo", upstream_dir.to_str().unwrap(), "v9");
    let err = GitFetcher::default()
        .fetch(&descriptor, &temp.path().join("ext").join("foo"))
        .unwrap_err();

    assert!(matches!(err, RetrievalError::Git { ref command, .. } if command == "checkout"));
}

#[test]
fn option_like_reference_is_rejected_before_cloning() {
    let temp = TempDir::new().unwrap();
    let m = SpecifierMatch::parse("https://example.com/foo#--detach").unwrap();
    let descriptor = DescriptorBuilder::default().build(&m);
    assert_eq!(descriptor.source_reference(), Some("--detach"));

    let dest = temp.path().join("ext").join("foo");
    let err = GitFetcher::default().fetch(&descriptor, &dest).unwrap_err();

    assert!(matches!(err, RetrievalError::Git { ref command, .. } if command == "checkout"));
    assert!(err.to_string().contains("--detach"));
    assert!(!dest.exists());
}
