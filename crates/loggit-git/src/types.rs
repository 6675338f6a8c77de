//! Commit records

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use loggit_core::error::GitError;

use crate::repository::Result;

/// One commit of the extracted history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full hex object id
    pub id: String,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Authored instant
    pub authored_at: DateTime<Utc>,
    /// First paragraph of the message on a single line
    pub short_message: String,
    /// Complete message
    pub full_message: String,
    /// Names of the tags pointing at this commit
    pub tags: Vec<String>,
}

impl CommitRecord {
    /// Create a new record, deriving the short message from `full_message`
    pub fn new(
        id: impl Into<String>,
        author_name: impl Into<String>,
        author_email: impl Into<String>,
        authored_at: DateTime<Utc>,
        full_message: impl Into<String>,
    ) -> Self {
        let full_message = full_message.into();
        let short_message = summarize(&full_message);

        Self {
            id: id.into(),
            author_name: author_name.into(),
            author_email: author_email.into(),
            authored_at,
            short_message,
            full_message,
            tags: Vec::new(),
        }
    }

    /// Set the tag names
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Build a record from a git2 commit and the tags pointing at it
    pub fn build(commit: &git2::Commit<'_>, tags: Vec<String>) -> Result<Self> {
        let id = commit.id().to_string();
        let author = commit.author();

        if author.name_bytes().is_empty() && author.email_bytes().is_empty() {
            return Err(malformed(&id, "commit has no author"));
        }

        let name = String::from_utf8_lossy(author.name_bytes()).into_owned();
        let email = String::from_utf8_lossy(author.email_bytes()).into_owned();
        if author.name().is_none() || author.email().is_none() {
            warn!(id = %id, "author identity is not valid UTF-8, using lossy conversion");
        }

        let seconds = author.when().seconds();
        let authored_at = Utc
            .timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| malformed(&id, &format!("author time {} is out of range", seconds)))?;

        let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();

        Ok(Self::new(id, name, email, authored_at, message).with_tags(tags))
    }

    /// Abbreviated id (first 7 characters)
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(7)
            .map_or(self.id.len(), |(i, _)| i);
        &self.id[..end]
    }

    /// Whether a tag with this short name points at the commit
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }
}

fn malformed(id: &str, reason: &str) -> GitError {
    GitError::MalformedCommit {
        id: id.to_string(),
        reason: reason.to_string(),
    }
}

/// First paragraph of `message` with its lines joined by single spaces.
///
/// Never empty for a non-empty message: a message made only of whitespace
/// summarizes to itself.
pub fn summarize(message: &str) -> String {
    let summary = message
        .lines()
        .map(str::trim)
        .skip_while(|line| line.is_empty())
        .take_while(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if summary.is_empty() {
        message.to_string()
    } else {
        summary
    }
}
