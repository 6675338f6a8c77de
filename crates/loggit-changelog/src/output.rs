//! Output file writing

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use loggit_core::error::OutputError;

/// Write `text` to `path` atomically.
///
/// The text goes to a temporary file in the destination directory which is
/// then renamed over the target, so a failed write never leaves a partial
/// file behind. Missing parent directories are created.
#[instrument(skip(text), fields(path = %path.display(), len = text.len()))]
pub fn write_atomic(path: &Path, text: &str) -> Result<(), OutputError> {
    if path.is_dir() {
        return Err(OutputError::IsDirectory(path.to_path_buf()));
    }

    let failed = |source| OutputError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(failed)?;

    let mut file = NamedTempFile::new_in(&parent).map_err(failed)?;
    file.write_all(text.as_bytes()).map_err(failed)?;
    file.as_file().sync_all().map_err(failed)?;
    file.persist(path).map_err(|e| failed(e.error))?;

    debug!("output written");
    Ok(())
}
