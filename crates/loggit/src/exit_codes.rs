//! Exit codes for the CLI

use loggit_core::{ConfigError, FilterError, GitError, LoggitError, OutputError, RenderError};

/// Success
pub const SUCCESS: u8 = 0;

/// General error
pub const ERROR: u8 = 1;

/// Configuration or filter error
pub const CONFIG_ERROR: u8 = 2;

/// Git error
pub const GIT_ERROR: u8 = 3;

/// Rendering or schema error
pub const RENDER_ERROR: u8 = 4;

/// Output file error
pub const OUTPUT_ERROR: u8 = 5;

/// Exit code for an error, from the first loggit error in its chain
pub fn for_error(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| {
            if let Some(e) = cause.downcast_ref::<LoggitError>() {
                Some(for_loggit_error(e))
            } else if cause.is::<ConfigError>() || cause.is::<FilterError>() {
                Some(CONFIG_ERROR)
            } else if cause.is::<GitError>() {
                Some(GIT_ERROR)
            } else if cause.is::<RenderError>() {
                Some(RENDER_ERROR)
            } else if cause.is::<OutputError>() {
                Some(OUTPUT_ERROR)
            } else {
                None
            }
        })
        .unwrap_or(ERROR)
}

fn for_loggit_error(err: &LoggitError) -> u8 {
    match err {
        LoggitError::Config(_) | LoggitError::Filter(_) => CONFIG_ERROR,
        LoggitError::Git(_) => GIT_ERROR,
        LoggitError::Render(_) => RENDER_ERROR,
        LoggitError::Output(_) => OUTPUT_ERROR,
        LoggitError::Io(_) | LoggitError::Other(_) => ERROR,
    }
}
