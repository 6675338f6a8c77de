//! loggit git - read-only history extraction
//!
//! This crate opens a repository, walks its commit graph from a reference,
//! indexes tags by the commit they peel to and turns each commit into a
//! [`CommitRecord`].

mod log;
mod repository;
mod tags;
pub mod types;
mod walker;

#[cfg(test)]
pub(crate) mod testing;

pub use log::Log;
pub use repository::{GitRepo, Result};
pub use tags::{short_tag_name, TagIndex};
pub use types::CommitRecord;
pub use walker::CommitWalk;
