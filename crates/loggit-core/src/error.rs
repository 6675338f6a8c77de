//! Error types for loggit

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using LoggitError
pub type Result<T> = std::result::Result<T, LoggitError>;

/// Main error type for loggit operations
#[derive(Debug, Error)]
pub enum LoggitError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Filter construction errors
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Rendering and document errors
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Output file errors
    #[error(transparent)]
    Output(#[from] OutputError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Path holds no repository metadata
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Repository exists but could not be opened
    #[error("Failed to open repository at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    /// Reference does not resolve to a commit (includes repositories without commits)
    #[error("Reference '{reference}' not found: {reason}")]
    RefNotFound { reference: String, reason: String },

    /// Walk start point is not a commit in the repository
    #[error("Invalid start commit {id}: {source}")]
    InvalidStart {
        id: String,
        #[source]
        source: git2::Error,
    },

    /// Commit data cannot be turned into a record
    #[error("Malformed commit {id}: {reason}")]
    MalformedCommit { id: String, reason: String },

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Filter construction errors
#[derive(Debug, Error)]
pub enum FilterError {
    /// Regex failed to compile
    #[error("Invalid {stage} pattern '{pattern}': {source}")]
    InvalidPattern {
        stage: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Unsupported regex flag character
    #[error("Invalid {stage} flag '{flag}' (supported: i, m, s, x)")]
    InvalidFlag { stage: &'static str, flag: char },

    /// Limit below zero
    #[error("Limit must be non-negative, got {0}")]
    NegativeLimit(i64),
}

/// Rendering and document errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// Intermediate document does not conform to the log schema
    #[error("Schema validation failed for commit {commit}: {message}")]
    Schema { commit: String, message: String },

    /// Custom template could not be read
    #[error("Failed to read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Custom template uses a placeholder that does not exist
    #[error("Unknown template variable '{{{{{name}}}}}' in {path}")]
    UnknownVariable { name: String, path: PathBuf },

    /// Custom template has an unbalanced commits block
    #[error("Unbalanced {{{{#commits}}}} block in {0}")]
    UnbalancedBlock(PathBuf),
}

/// Output file errors
#[derive(Debug, Error)]
pub enum OutputError {
    /// Destination is a directory
    #[error("Output path is a directory: {0}")]
    IsDirectory(PathBuf),

    /// Writing or replacing the destination failed
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoggitError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}
