//! Tag lookup by commit

use std::collections::HashMap;

use git2::{Oid, Repository};
use tracing::{debug, instrument};

use crate::repository::Result;

/// Short tag name: everything after the last `/` of a reference name
pub fn short_tag_name(reference: &str) -> &str {
    reference
        .rsplit_once('/')
        .map_or(reference, |(_, short)| short)
}

/// Tag names keyed by the commit each tag peels to.
///
/// Lightweight and annotated tags are treated alike: both are peeled to
/// their commit. Names keep the order in which the repository enumerates
/// its tags. Tags that do not lead to a commit are skipped.
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    by_commit: HashMap<Oid, Vec<String>>,
}

impl TagIndex {
    /// Enumerate and peel every tag of `repo` once
    #[instrument(skip(repo))]
    pub fn build(repo: &Repository) -> Result<Self> {
        let mut by_commit: HashMap<Oid, Vec<String>> = HashMap::new();
        let mut count = 0usize;

        repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name);

            match repo.find_object(oid, None).and_then(|o| o.peel_to_commit()) {
                Ok(commit) => {
                    by_commit
                        .entry(commit.id())
                        .or_default()
                        .push(short_tag_name(&name).to_string());
                    count += 1;
                }
                Err(e) => {
                    debug!(tag = %name, error = %e, "tag does not point at a commit, skipping");
                }
            }

            true
        })?;

        debug!(tags = count, commits = by_commit.len(), "built tag index");
        Ok(Self { by_commit })
    }

    /// Tag names pointing at `commit`, empty when untagged
    pub fn tags_for(&self, commit: Oid) -> &[String] {
        self.by_commit
            .get(&commit)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of tagged commits
    pub fn len(&self) -> usize {
        self.by_commit.len()
    }

    /// Whether no commit is tagged
    pub fn is_empty(&self) -> bool {
        self.by_commit.is_empty()
    }
}
