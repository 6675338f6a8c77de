//! loggit core - shared types for changelog extraction
//!
//! This crate provides the error taxonomy, configuration loading and
//! validation, and regex flag handling used by the other loggit crates.

pub mod config;
pub mod error;
pub mod pattern;

pub use config::{Config, FilterSpec, OutputConfig, OutputFormat, RenderMode, RepositoryConfig};
pub use error::{
    ConfigError, FilterError, GitError, LoggitError, OutputError, RenderError, Result,
};
