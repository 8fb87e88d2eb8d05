use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::splice::split_lines;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write to file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Loads a UTF-8 document as lines that keep their own terminators.
pub fn read_document(path: &Path) -> Result<Vec<String>, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let lines = split_lines(&content);
    debug!(path = %path.display(), lines = lines.len(), "read document");
    Ok(lines)
}

/// Writes `lines` to `path`, replacing any existing file.
///
/// The content goes to a temporary file beside the target first and is then
/// renamed over it, so the target is never left half written. An existing
/// target keeps its permissions, and a symlinked target is edited through the
/// link rather than replaced by a regular file.
pub fn write_document<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<(), DocumentError> {
    let write_error = |source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    };
    let existing = std::fs::metadata(path).ok();
    let target = match existing {
        Some(_) => std::fs::canonicalize(path).map_err(write_error)?,
        None => path.to_path_buf(),
    };

    let mut file = NamedTempFile::new_in(parent_dir(&target)).map_err(write_error)?;
    if let Some(metadata) = &existing {
        file.as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_error)?;
    }
    for line in lines {
        file.write_all(line.as_ref().as_bytes())
            .map_err(write_error)?;
    }
    file.flush().map_err(write_error)?;
    file.persist(&target).map_err(|e| write_error(e.error))?;
    debug!(path = %target.display(), lines = lines.len(), "wrote document");
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
