//! Git repository operations

use std::path::{Path, PathBuf};

use git2::{Oid, Repository};
use tracing::{debug, info, instrument};

use loggit_core::error::GitError;

use crate::log::Log;
use crate::tags::TagIndex;
use crate::walker::CommitWalk;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Read-only repository handle
pub struct GitRepo {
    pub(crate) repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository at `path`.
    ///
    /// `path` may be a working directory or the metadata directory itself.
    /// Parent directories are not searched.
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "opening git repository");
        let repo = Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::RepositoryNotFound(path.to_path_buf())
            } else {
                GitError::OpenFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            repo,
        })
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the repository has no commits yet
    pub fn is_empty(&self) -> Result<bool> {
        self.repo.is_empty().map_err(GitError::Git2)
    }

    /// Get the current branch name, `None` when HEAD is detached or unborn
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            Ok(head.shorthand().map(str::to_string))
        } else {
            Ok(None)
        }
    }

    /// Resolve a reference (branch, tag, `HEAD` or revision) to a commit id.
    ///
    /// An unborn `HEAD` in a repository without commits is reported as
    /// [`GitError::RefNotFound`] like any other unresolvable name.
    #[instrument(skip(self))]
    pub fn resolve_ref(&self, reference: &str) -> Result<Oid> {
        let not_found = |e: git2::Error| GitError::RefNotFound {
            reference: reference.to_string(),
            reason: e.message().to_string(),
        };

        let object = self.repo.revparse_single(reference).map_err(not_found)?;
        let commit = object.peel_to_commit().map_err(not_found)?;

        debug!(reference, id = %commit.id(), "resolved reference");
        Ok(commit.id())
    }

    /// Walk the history reachable from `start`, newest first
    pub fn walk(&self, start: Oid) -> CommitWalk<'_> {
        CommitWalk::new(&self.repo, start)
    }

    /// Build the commit to tag-name index for this repository
    pub fn tag_index(&self) -> Result<TagIndex> {
        TagIndex::build(&self.repo)
    }

    /// Commit records reachable from `reference`, newest first
    #[instrument(skip(self))]
    pub fn log(&self, reference: &str) -> Result<Log<'_>> {
        let start = self.resolve_ref(reference)?;
        let tags = self.tag_index()?;
        Ok(Log::new(self.walk(start), tags))
    }
}
