//! Throwaway repositories for tests

use git2::{Oid, Repository, Signature, Time};
use tempfile::TempDir;

/// Fresh repository with no commits
pub fn init_repo() -> (TempDir, Repository) {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path()).unwrap();
    (temp, repo)
}

/// Commit on top of HEAD with the given author and message
pub fn commit(repo: &Repository, author: &str, message: &str, seconds: i64) -> Oid {
    let sig = Signature::new(author, &format!("{}@test.com", author), &Time::new(seconds, 0))
        .unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

/// Lightweight tag on a commit
pub fn tag_lightweight(repo: &Repository, name: &str, target: Oid) {
    let object = repo.find_object(target, None).unwrap();
    repo.tag_lightweight(name, &object, false).unwrap();
}

/// Annotated tag on a commit
pub fn tag_annotated(repo: &Repository, name: &str, target: Oid) {
    let object = repo.find_object(target, None).unwrap();
    let sig = Signature::new("tagger", "tagger@test.com", &Time::new(1_600_000_000, 0)).unwrap();
    repo.tag(name, &object, &sig, name, false).unwrap();
}
