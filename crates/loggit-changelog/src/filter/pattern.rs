//! Message pattern filters

use regex::Regex;

use loggit_core::error::FilterError;
use loggit_core::pattern;
use loggit_git::CommitRecord;

use super::CommitFilter;

/// Keeps commits whose full message matches the pattern
#[derive(Debug, Clone)]
pub struct IncludePattern {
    regex: Regex,
}

impl IncludePattern {
    /// Compile a new include filter
    pub fn new(pattern: &str, flags: &str) -> Result<Self, FilterError> {
        Ok(Self {
            regex: pattern::compile("include", pattern, flags)?,
        })
    }
}

impl CommitFilter for IncludePattern {
    fn name(&self) -> &'static str {
        "include"
    }

    fn apply(&self, mut commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
        commits.retain(|c| self.regex.is_match(&c.full_message));
        commits
    }
}

/// Drops commits whose full message matches the pattern
#[derive(Debug, Clone)]
pub struct ExcludePattern {
    regex: Regex,
}

impl ExcludePattern {
    /// Compile a new exclude filter
    pub fn new(pattern: &str, flags: &str) -> Result<Self, FilterError> {
        Ok(Self {
            regex: pattern::compile("exclude", pattern, flags)?,
        })
    }
}

impl CommitFilter for ExcludePattern {
    fn name(&self) -> &'static str {
        "exclude"
    }

    fn apply(&self, mut commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
        commits.retain(|c| !self.regex.is_match(&c.full_message));
        commits
    }
}
