//! Writing generated files to disk.
//!
//! Files are only rewritten when their content changes, so running the
//! generator twice leaves modification times alone.

use crate::errors::{CliError, Result};
use std::fmt;
use std::path::Path;

/// Status of a file operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// File was newly created.
    Created,
    /// File existed and was updated with new content.
    Updated,
    /// File existed and content was unchanged.
    Unchanged,
    /// Would be created (dry-run mode).
    WouldCreate,
    /// Would be updated (dry-run mode).
    WouldUpdate,
}

impl FileStatus {
    /// Returns true if the file on disk differs from the generated content.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::WouldCreate | Self::WouldUpdate)
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "Created"),
            Self::Updated => write!(f, "Updated"),
            Self::Unchanged => write!(f, "Unchanged"),
            Self::WouldCreate => write!(f, "Would create"),
            Self::WouldUpdate => write!(f, "Would update"),
        }
    }
}

/// Determine what writing `content` to `filepath` would do.
///
/// # Errors
///
/// Returns an error if an existing file cannot be read.
pub fn dry_run_status(filepath: &Path, content: &[u8]) -> Result<FileStatus> {
    if !filepath.exists() {
        return Ok(FileStatus::WouldCreate);
    }
    let existing = std::fs::read(filepath).map_err(|e| CliError::io("reading", filepath, e))?;
    Ok(if existing == content {
        FileStatus::Unchanged
    } else {
        FileStatus::WouldUpdate
    })
}

/// Write `content` to `filepath`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the file or its parent directory cannot be read or
/// written.
pub fn write_file(filepath: &Path, content: &[u8]) -> Result<FileStatus> {
    let status = if filepath.exists() {
        let existing = std::fs::read(filepath).map_err(|e| CliError::io("reading", filepath, e))?;
        if existing == content {
            return Ok(FileStatus::Unchanged);
        }
        FileStatus::Updated
    } else {
        FileStatus::Created
    };

    if let Some(parent) = filepath.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CliError::io("creating", parent, e))?;
    }
    std::fs::write(filepath, content).map_err(|e| CliError::io("writing", filepath, e))?;
    Ok(status)
}
