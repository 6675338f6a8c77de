//! Tag boundary filters

use loggit_git::CommitRecord;

use super::CommitFilter;

fn boundary(tag: &Option<String>, commits: &[CommitRecord]) -> Option<usize> {
    let tag = tag.as_deref().filter(|t| !t.is_empty())?;
    commits.iter().position(|c| c.has_tag(tag))
}

/// Keeps only the commits strictly newer than the first commit carrying the tag.
///
/// An empty or missing tag, or a tag no commit carries, leaves the sequence
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct StartTag {
    tag: Option<String>,
}

impl StartTag {
    /// Create a new start tag filter
    pub fn new(tag: Option<String>) -> Self {
        Self { tag }
    }
}

impl CommitFilter for StartTag {
    fn name(&self) -> &'static str {
        "start-tag"
    }

    fn apply(&self, mut commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
        if let Some(index) = boundary(&self.tag, &commits) {
            commits.truncate(index);
        }
        commits
    }
}

/// Drops the commits newer than the first commit carrying the tag, keeping
/// that commit and everything older.
///
/// An empty or missing tag, or a tag no commit carries, leaves the sequence
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct EndTag {
    tag: Option<String>,
}

impl EndTag {
    /// Create a new end tag filter
    pub fn new(tag: Option<String>) -> Self {
        Self { tag }
    }
}

impl CommitFilter for EndTag {
    fn name(&self) -> &'static str {
        "end-tag"
    }

    fn apply(&self, mut commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
        match boundary(&self.tag, &commits) {
            Some(index) => commits.split_off(index),
            None => commits,
        }
    }
}
