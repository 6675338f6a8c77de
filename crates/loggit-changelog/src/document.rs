//! Log document handed from extraction to rendering

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use loggit_core::error::RenderError;
use loggit_git::CommitRecord;

/// Ordered, filtered commit history, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDocument {
    /// Commits in walk order
    pub commits: Vec<CommitRecord>,
}

impl LogDocument {
    /// Create a new document
    pub fn new(commits: Vec<CommitRecord>) -> Self {
        Self { commits }
    }

    /// Number of commits
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// Whether the document holds no commits
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Check the document against the log schema.
    ///
    /// Ids must be 40 or 64 lowercase hex digits and unique, a non-empty full
    /// message needs a non-empty short message, and tag names must be
    /// non-empty short names.
    pub fn validate(&self) -> Result<(), RenderError> {
        let mut seen = HashSet::with_capacity(self.commits.len());

        for commit in &self.commits {
            let fail = |message: &str| RenderError::Schema {
                commit: commit.id.clone(),
                message: message.to_string(),
            };

            if !is_object_id(&commit.id) {
                return Err(fail("id is not a 40 or 64 digit lowercase hex hash"));
            }
            if !seen.insert(commit.id.as_str()) {
                return Err(fail("duplicate commit id"));
            }
            if commit.short_message.is_empty() && !commit.full_message.is_empty() {
                return Err(fail("short message is empty"));
            }
            if let Some(tag) = commit.tags.iter().find(|t| t.is_empty() || t.contains('/')) {
                return Err(fail(&format!("invalid tag name '{}'", tag)));
            }
        }

        Ok(())
    }
}

impl From<Vec<CommitRecord>> for LogDocument {
    fn from(commits: Vec<CommitRecord>) -> Self {
        Self::new(commits)
    }
}

fn is_object_id(id: &str) -> bool {
    matches!(id.len(), 40 | 64) && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
