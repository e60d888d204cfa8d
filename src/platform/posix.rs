//! platform::posix
//!
//! POSIX-family file operations: native symlinks, `cp -r` for copies.

use std::fs;
use std::path::{Path, PathBuf};

use super::traits::{FileOps, FileOpsError};

/// POSIX implementation of [`FileOps`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixFileOps;

impl FileOps for PosixFileOps {
    fn name(&self) -> &'static str {
        "posix"
    }

    fn is_link(&self, path: &Path) -> Result<bool, FileOpsError> {
        // symlink_metadata does not follow the link, so a dangling link
        // still reports as a link here.
        let metadata = fs::symlink_metadata(path).map_err(|source| FileOpsError::Inspect {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(metadata.file_type().is_symlink())
    }

    fn resolve_link(&self, path: &Path) -> Result<PathBuf, FileOpsError> {
        fs::canonicalize(path).map_err(|source| FileOpsError::Resolve {
            path: path.to_path_buf(),
            source,
        })
    }

    fn copy_command(&self, source: &Path, destination: &Path) -> String {
        format!("cp -r {} {}", source.display(), destination.display())
    }
}
