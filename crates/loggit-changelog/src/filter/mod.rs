//! Commit filters
//!
//! Each filter selects an order-preserving subsequence of the commits it is
//! given and never modifies a record. A [`FilterChain`] applies them in the
//! fixed order limit, start tag, end tag, include pattern, exclude pattern.

mod limit;
mod pattern;
mod tags;

pub use limit::Limit;
pub use pattern::{ExcludePattern, IncludePattern};
pub use tags::{EndTag, StartTag};

use loggit_core::config::FilterSpec;
use loggit_core::error::FilterError;
use loggit_git::CommitRecord;
use tracing::{debug, instrument};

/// Trait for commit filters
pub trait CommitFilter: Send + Sync {
    /// Stage name used in logs
    fn name(&self) -> &'static str;

    /// Select the commits to keep, preserving their order
    fn apply(&self, commits: Vec<CommitRecord>) -> Vec<CommitRecord>;
}

/// Ordered filter pipeline built from a [`FilterSpec`]
pub struct FilterChain {
    filters: Vec<Box<dyn CommitFilter>>,
    limit: Option<usize>,
}

impl FilterChain {
    /// Build the chain, compiling patterns and checking the limit
    pub fn from_spec(spec: &FilterSpec) -> Result<Self, FilterError> {
        let limit = match spec.limit {
            Some(n) if n < 0 => return Err(FilterError::NegativeLimit(n)),
            Some(n) => Some(usize::try_from(n).unwrap_or(usize::MAX)),
            None => None,
        };

        let mut filters: Vec<Box<dyn CommitFilter>> = vec![
            Box::new(Limit::new(limit)),
            Box::new(StartTag::new(spec.start_tag.clone())),
            Box::new(EndTag::new(spec.end_tag.clone())),
            Box::new(IncludePattern::new(&spec.include, &spec.include_flags)?),
        ];

        if let Some(exclude) = &spec.exclude {
            filters.push(Box::new(ExcludePattern::new(exclude, &spec.exclude_flags)?));
        }

        Ok(Self { filters, limit })
    }

    /// Upper bound on the commits the chain can keep, `None` when unbounded.
    ///
    /// The walk can stop after this many commits without changing the result.
    pub fn walk_bound(&self) -> Option<usize> {
        self.limit
    }

    /// Names of the stages in application order
    pub fn stages(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Run every stage in order
    #[instrument(skip(self, commits), fields(input = commits.len()))]
    pub fn apply(&self, commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
        self.filters.iter().fold(commits, |commits, filter| {
            let before = commits.len();
            let kept = filter.apply(commits);
            debug!(stage = filter.name(), before, after = kept.len(), "filter applied");
            kept
        })
    }
}
