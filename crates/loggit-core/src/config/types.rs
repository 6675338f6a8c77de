//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Main configuration for loggit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository to read history from
    pub repository: RepositoryConfig,

    /// Commit filters
    pub filter: FilterSpec,

    /// Rendering and destination
    pub output: OutputConfig,
}

/// Repository configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Repository path (working directory or `.git` directory)
    pub path: PathBuf,

    /// Reference to start the walk from
    pub reference: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            reference: "HEAD".to_string(),
        }
    }
}

/// Filter settings applied to the commit sequence.
///
/// Every field is independently optional. The defaults make each stage an
/// identity transform: no limit, no tag boundaries, an include pattern that
/// matches everything and no exclude pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Maximum number of commits; `None` is unbounded
    pub limit: Option<i64>,

    /// Keep only commits strictly newer than the commit carrying this tag
    pub start_tag: Option<String>,

    /// Keep the commit carrying this tag and everything older
    pub end_tag: Option<String>,

    /// Regex a full message must match to be kept
    pub include: String,

    /// Flags for `include` (`i`, `m`, `s`, `x`)
    pub include_flags: String,

    /// Regex whose matches are dropped
    pub exclude: Option<String>,

    /// Flags for `exclude`
    pub exclude_flags: String,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            limit: None,
            start_tag: None,
            end_tag: None,
            include: ".*".to_string(),
            include_flags: String::new(),
            exclude: None,
            exclude_flags: String::new(),
        }
    }
}

/// Output format selector as written in configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Intermediate XML log document
    #[default]
    Raw,
    /// Markdown digest
    Digest,
    /// User supplied template
    Custom,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" | "xml" => Ok(Self::Raw),
            "digest" | "markdown" | "md" => Ok(Self::Digest),
            "custom" => Ok(Self::Custom),
            other => Err(ConfigError::InvalidValue {
                field: "output.format".to_string(),
                message: format!("unknown format '{}', must be one of: raw, digest, custom", other),
            }),
        }
    }
}

/// Rendering mode, resolved once from [`OutputConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderMode {
    /// Intermediate XML log document
    Raw,
    /// Markdown digest
    Digest,
    /// Template file at the given path
    Custom(PathBuf),
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination file
    pub file: PathBuf,

    /// Output format
    pub format: OutputFormat,

    /// Template path for the custom format
    pub template: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("gitlog.xml"),
            format: OutputFormat::Raw,
            template: None,
        }
    }
}

impl OutputConfig {
    /// Resolve the format selector into a render mode
    pub fn render_mode(&self) -> Result<RenderMode, ConfigError> {
        match self.format {
            OutputFormat::Raw => Ok(RenderMode::Raw),
            OutputFormat::Digest => Ok(RenderMode::Digest),
            OutputFormat::Custom => self
                .template
                .clone()
                .map(RenderMode::Custom)
                .ok_or_else(|| ConfigError::MissingField("output.template".to_string())),
        }
    }
}
