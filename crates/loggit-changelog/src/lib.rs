//! loggit changelog - filtering and rendering of commit history
//!
//! Takes the records produced by `loggit-git`, narrows them with a
//! [`FilterChain`], checks the resulting [`LogDocument`] and renders it as
//! raw XML, a markdown digest or a user template.

pub mod document;
pub mod filter;
pub mod generator;
pub mod output;
pub mod render;

pub use document::LogDocument;
pub use filter::{CommitFilter, FilterChain};
pub use generator::ChangelogGenerator;
pub use output::write_atomic;
pub use render::{Renderer, Template};
