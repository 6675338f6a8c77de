//! Commit graph traversal

use git2::{Commit, Oid, Repository, Revwalk, Sort};
use tracing::{debug, trace};

use loggit_core::error::GitError;

use crate::repository::Result;

/// Single-pass walk over the commits reachable from a start commit.
///
/// Commits come out children before parents (topological, ties broken by
/// commit time) and each one exactly once. Nothing is read from the
/// repository until the first call to `next`; an invalid start commit is
/// reported there as [`GitError::InvalidStart`]. After an error the walk is
/// exhausted. Walking again requires a new `CommitWalk`.
pub struct CommitWalk<'repo> {
    repo: &'repo Repository,
    start: Oid,
    revwalk: Option<Revwalk<'repo>>,
    finished: bool,
    emitted: usize,
}

impl<'repo> CommitWalk<'repo> {
    pub(crate) fn new(repo: &'repo Repository, start: Oid) -> Self {
        Self {
            repo,
            start,
            revwalk: None,
            finished: false,
            emitted: 0,
        }
    }

    fn begin(&self) -> Result<Revwalk<'repo>> {
        let invalid_start = |source: git2::Error| GitError::InvalidStart {
            id: self.start.to_string(),
            source,
        };

        self.repo.find_commit(self.start).map_err(invalid_start)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(self.start).map_err(invalid_start)?;

        debug!(start = %self.start, "commit walk started");
        Ok(revwalk)
    }

    fn fail(&mut self, error: GitError) -> Option<Result<Commit<'repo>>> {
        self.finished = true;
        Some(Err(error))
    }
}

impl<'repo> Iterator for CommitWalk<'repo> {
    type Item = Result<Commit<'repo>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.revwalk.is_none() {
            match self.begin() {
                Ok(revwalk) => self.revwalk = Some(revwalk),
                Err(e) => return self.fail(e),
            }
        }

        let repo = self.repo;
        let next = self.revwalk.as_mut().and_then(|walk| walk.next());

        match next {
            Some(Ok(oid)) => match repo.find_commit(oid) {
                Ok(commit) => {
                    self.emitted += 1;
                    trace!(id = %oid, "walked commit");
                    Some(Ok(commit))
                }
                Err(e) => self.fail(e.into()),
            },
            Some(Err(e)) => self.fail(e.into()),
            None => {
                self.finished = true;
                debug!(start = %self.start, count = self.emitted, "commit walk finished");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{commit, init_repo};
    use git2::Signature;
    use std::collections::HashSet;

    #[test]
    fn test_walk_newest_first() {
        let (_temp, repo) = init_repo();
        let first = commit(&repo, "first", "First commit", 1_000);
        let second = commit(&repo, "second", "Second commit", 2_000);

        let ids: Vec<Oid> = CommitWalk::new(&repo, second)
            .map(|c| c.unwrap().id())
            .collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn test_walk_visits_each_commit_once_across_merge() {
        let (_temp, repo) = init_repo();
        let root = commit(&repo, "root", "root", 1_000);
        let left = commit(&repo, "left", "left", 2_000);

        // Branch off root for the right-hand side
        let sig = Signature::new("right", "right@test.com", &git2::Time::new(3_000, 0)).unwrap();
        let tree = repo.find_commit(root).unwrap().tree().unwrap();
        let root_commit = repo.find_commit(root).unwrap();
        let right = repo
            .commit(None, &sig, &sig, "right", &tree, &[&root_commit])
            .unwrap();

        let left_commit = repo.find_commit(left).unwrap();
        let right_commit = repo.find_commit(right).unwrap();
        let merge = repo
            .commit(
                Some("HEAD"),
                &sig,
                &sig,
                "merge",
                &tree,
                &[&left_commit, &right_commit],
            )
            .unwrap();

        let ids: Vec<Oid> = CommitWalk::new(&repo, merge)
            .map(|c| c.unwrap().id())
            .collect();

        assert_eq!(ids.len(), 4);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 4);

        let position = |id: Oid| ids.iter().position(|x| *x == id).unwrap();
        assert_eq!(position(merge), 0);
        assert!(position(left) < position(root));
        assert!(position(right) < position(root));
        assert_eq!(position(root), 3);
    }

    #[test]
    fn test_walk_is_stable() {
        let (_temp, repo) = init_repo();
        commit(&repo, "a", "a", 1_000);
        commit(&repo, "b", "b", 1_000);
        let head = commit(&repo, "c", "c", 1_000);

        let once: Vec<Oid> = CommitWalk::new(&repo, head).map(|c| c.unwrap().id()).collect();
        let twice: Vec<Oid> = CommitWalk::new(&repo, head).map(|c| c.unwrap().id()).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_invalid_start_fails_lazily() {
        let (_temp, repo) = init_repo();
        commit(&repo, "first", "First commit", 1_000);
        let bogus = Oid::from_str("0123456789abcdef0123456789abcdef01234567").unwrap();

        let mut walk = CommitWalk::new(&repo, bogus);
        assert!(matches!(walk.next(), Some(Err(GitError::InvalidStart { .. }))));
        assert!(walk.next().is_none());
    }

    #[test]
    fn test_early_termination() {
        let (_temp, repo) = init_repo();
        commit(&repo, "a", "a", 1_000);
        commit(&repo, "b", "b", 2_000);
        let head = commit(&repo, "c", "c", 3_000);

        let taken: Vec<_> = CommitWalk::new(&repo, head).take(1).collect();
        assert_eq!(taken.len(), 1);
    }
}
