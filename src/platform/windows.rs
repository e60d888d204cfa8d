//! platform::windows
//!
//! Windows-family file operations.
//!
//! # Design
//!
//! Deployments on Windows mark the active version with a directory
//! junction where POSIX would use a symlink, so link detection must
//! recognize any reparse point, not just the symlink file type.
//!
//! The struct compiles on every platform: copy-command construction is
//! pure string work and is exercised by tests everywhere, while
//! reparse-point inspection is gated to Windows builds (off Windows it
//! falls back to the portable symlink predicate).

use std::fs;
use std::path::{Path, PathBuf};

use super::traits::{FileOps, FileOpsError};

/// `FILE_ATTRIBUTE_REPARSE_POINT`: set for symlinks and junctions alike.
#[cfg(windows)]
const FILE_ATTRIBUTE_REPARSE_POINT: u32 = 0x0400;

/// Windows implementation of [`FileOps`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsFileOps;

impl WindowsFileOps {
    /// Rewrite `/` separators to the native `\`.
    fn native_separators(path: &Path) -> String {
        path.display().to_string().replace('/', "\\")
    }
}

impl FileOps for WindowsFileOps {
    fn name(&self) -> &'static str {
        "windows"
    }

    #[cfg(windows)]
    fn is_link(&self, path: &Path) -> Result<bool, FileOpsError> {
        use std::os::windows::fs::MetadataExt;

        let metadata = fs::symlink_metadata(path).map_err(|source| FileOpsError::Inspect {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(metadata.file_attributes() & FILE_ATTRIBUTE_REPARSE_POINT != 0)
    }

    #[cfg(not(windows))]
    fn is_link(&self, path: &Path) -> Result<bool, FileOpsError> {
        // Junctions do not exist off Windows; the portable predicate keeps
        // this implementation testable on other hosts.
        let metadata = fs::symlink_metadata(path).map_err(|source| FileOpsError::Inspect {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(metadata.file_type().is_symlink())
    }

    fn resolve_link(&self, path: &Path) -> Result<PathBuf, FileOpsError> {
        // canonicalize resolves symlinks and junctions alike and fails on
        // dangling targets.
        fs::canonicalize(path).map_err(|source| FileOpsError::Resolve {
            path: path.to_path_buf(),
            source,
        })
    }

    fn copy_command(&self, source: &Path, destination: &Path) -> String {
        format!(
            "xcopy {} {} /s /e /y",
            Self::native_separators(source),
            Self::native_separators(destination)
        )
    }
}
