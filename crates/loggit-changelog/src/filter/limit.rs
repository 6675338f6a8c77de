//! Limit filter

use loggit_git::CommitRecord;

use super::CommitFilter;

/// Keeps the first `max` commits; `None` keeps everything
#[derive(Debug, Clone, Copy, Default)]
pub struct Limit {
    max: Option<usize>,
}

impl Limit {
    /// Create a new limit
    pub fn new(max: Option<usize>) -> Self {
        Self { max }
    }
}

impl CommitFilter for Limit {
    fn name(&self) -> &'static str {
        "limit"
    }

    fn apply(&self, mut commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
        if let Some(max) = self.max {
            commits.truncate(max);
        }
        commits
    }
}
