//! Commit records in walk order

use crate::repository::Result;
use crate::tags::TagIndex;
use crate::types::CommitRecord;
use crate::walker::CommitWalk;

/// Lazy sequence of [`CommitRecord`]s, newest first.
///
/// Pairs a [`CommitWalk`] with a prebuilt [`TagIndex`] so that every walked
/// commit is turned into a record carrying its tag names.
pub struct Log<'repo> {
    walk: CommitWalk<'repo>,
    tags: TagIndex,
}

impl<'repo> Log<'repo> {
    pub(crate) fn new(walk: CommitWalk<'repo>, tags: TagIndex) -> Self {
        Self { walk, tags }
    }

    /// The tag index used for this log
    pub fn tags(&self) -> &TagIndex {
        &self.tags
    }
}

impl Iterator for Log<'_> {
    type Item = Result<CommitRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit = match self.walk.next()? {
            Ok(commit) => commit,
            Err(e) => return Some(Err(e)),
        };

        let tags = self.tags.tags_for(commit.id()).to_vec();
        Some(CommitRecord::build(&commit, tags))
    }
}
