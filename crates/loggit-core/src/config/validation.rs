//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::pattern;

use super::types::{Config, OutputFormat};

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_repository(config)?;
    validate_filter(config)?;
    validate_output(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_repository(config: &Config) -> Result<()> {
    if config.repository.reference.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "repository.reference".to_string(),
            message: "reference cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_filter(config: &Config) -> Result<()> {
    let filter = &config.filter;

    if let Some(limit) = filter.limit {
        if limit < 0 {
            return Err(ConfigError::InvalidValue {
                field: "filter.limit".to_string(),
                message: format!("must be non-negative, got {}", limit),
            }
            .into());
        }
    }

    pattern::compile("include", &filter.include, &filter.include_flags).map_err(|e| {
        ConfigError::InvalidValue {
            field: "filter.include".to_string(),
            message: e.to_string(),
        }
    })?;

    match &filter.exclude {
        Some(exclude) => {
            pattern::compile("exclude", exclude, &filter.exclude_flags).map_err(|e| {
                ConfigError::InvalidValue {
                    field: "filter.exclude".to_string(),
                    message: e.to_string(),
                }
            })?;
        }
        None if !filter.exclude_flags.is_empty() => {
            debug!("exclude_flags set without an exclude pattern, ignoring");
        }
        None => {}
    }

    Ok(())
}

fn validate_output(config: &Config) -> Result<()> {
    if config.output.file.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "output.file".to_string(),
            message: "output file cannot be empty".to_string(),
        }
        .into());
    }

    if config.output.format == OutputFormat::Custom && config.output.template.is_none() {
        return Err(ConfigError::MissingField("output.template".to_string()).into());
    }

    Ok(())
}
