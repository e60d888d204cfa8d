//! platform::traits
//!
//! Filesystem capability trait definition.
//!
//! # Design
//!
//! Link handling diverges between platform families: POSIX has native
//! symlinks, Windows has symlinks plus directory junctions (reparse
//! points) that deployments use interchangeably. `FileOps` collects the
//! three operations this crate needs behind one trait so the divergence
//! lives in exactly two implementations, selected once by
//! [`crate::platform::native`] instead of branching at call sites.
//!
//! `copy_command` only *constructs* a command string. Running it is the
//! caller's responsibility; implementations perform no execution.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from filesystem link operations.
#[derive(Debug, Error)]
pub enum FileOpsError {
    /// Could not read metadata for the path.
    #[error("cannot inspect {path}: {source}")]
    Inspect {
        /// Path that was being inspected.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The link exists but could not be resolved to a target.
    #[error("cannot resolve link {path}: {source}")]
    Resolve {
        /// Path of the link.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The path exists but is not a link of any recognized kind.
    #[error("{path} exists but is not a link")]
    NotALink {
        /// The offending path.
        path: PathBuf,
    },
}

/// Platform-abstracted filesystem primitives.
///
/// Implementations must be `Send + Sync`; they hold no mutable state.
pub trait FileOps: Send + Sync {
    /// Platform family name (`"posix"` or `"windows"`).
    fn name(&self) -> &'static str;

    /// Whether `path` is a symbolic link or platform equivalent.
    ///
    /// On Windows this recognizes directory junctions as well as true
    /// symlinks. Inspecting reparse data may require elevated privileges
    /// there; that is a platform cost, not an error condition.
    fn is_link(&self, path: &Path) -> Result<bool, FileOpsError>;

    /// Resolve a link fully, returning the canonical target path.
    ///
    /// Fails when the link is dangling or the target is unreadable; a
    /// dangling link is never silently treated as resolved.
    fn resolve_link(&self, path: &Path) -> Result<PathBuf, FileOpsError>;

    /// Build (but do not run) a recursive copy command for this platform.
    fn copy_command(&self, source: &Path, destination: &Path) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = FileOpsError::Inspect {
            path: PathBuf::from("/deploy/current"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/deploy/current"));
        assert!(err.to_string().contains("inspect"));

        let err = FileOpsError::Resolve {
            path: PathBuf::from("/deploy/current"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("resolve"));

        let err = FileOpsError::NotALink {
            path: PathBuf::from("/deploy/current"),
        };
        assert!(err.to_string().contains("not a link"));
    }
}
