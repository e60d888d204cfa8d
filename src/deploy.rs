//! deploy
//!
//! Deployment state reader for the `current`-link convention.
//!
//! # Design
//!
//! A deployment root contains version-named directories and a `current`
//! link pointing at the active one:
//!
//! ```text
//! /srv/app/
//!   2.0.64/
//!   2.0.65/
//!   current -> /srv/app/2.0.65
//! ```
//!
//! This module only ever *reads* that convention; the link is written by
//! the deployment process itself. Absence of `current` is a valid state
//! ("nothing deployed"), reported as `Ok(None)`. An existing entry that
//! cannot be resolved — dangling target, permission denial, or not a link
//! at all — is a fatal error, never mistaken for absence.
//!
//! No locking is performed around the link; a concurrent writer yields
//! whatever consistency the filesystem provides.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::platform::{self, FileOps, FileOpsError};

/// Name of the link that marks the active version.
pub const CURRENT_LINK: &str = "current";

/// Errors from deployment state reading.
#[derive(Debug, Error)]
pub enum DeployError {
    /// The `current` entry exists but the deployed version cannot be
    /// determined from it.
    #[error("cannot resolve deployed version link: {source}")]
    LinkResolution {
        /// Path of the `current` entry.
        path: PathBuf,
        /// What went wrong.
        #[source]
        source: FileOpsError,
    },
}

/// Read the deployed version under `root`.
///
/// Returns `Ok(None)` when nothing is deployed (no `current` entry) and
/// `Ok(Some(version))` when `current` resolves to a version-named
/// directory. Never mutates the filesystem.
///
/// # Errors
///
/// [`DeployError::LinkResolution`] when `current` exists but cannot be
/// resolved. Absence and breakage are distinct outcomes by contract.
pub fn current_version(root: &Path) -> Result<Option<String>, DeployError> {
    current_version_with(root, platform::native())
}

/// Read the deployed version using an explicit [`FileOps`] implementation.
///
/// Same contract as [`current_version`]; the platform capability is
/// injected.
pub fn current_version_with(
    root: &Path,
    ops: &dyn FileOps,
) -> Result<Option<String>, DeployError> {
    let link = root.join(CURRENT_LINK);

    // Existence must be checked without following the link: a dangling
    // `current` still exists and has to fail below rather than read as
    // "nothing deployed".
    match fs::symlink_metadata(&link) {
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            debug!(root = %root.display(), "no current link; nothing deployed");
            return Ok(None);
        }
        Err(source) => {
            return Err(DeployError::LinkResolution {
                path: link.clone(),
                source: FileOpsError::Inspect { path: link, source },
            });
        }
        Ok(_) => {}
    }

    if !ops.is_link(&link).map_err(|source| DeployError::LinkResolution {
        path: link.clone(),
        source,
    })? {
        return Err(DeployError::LinkResolution {
            path: link.clone(),
            source: FileOpsError::NotALink { path: link },
        });
    }

    let target = ops
        .resolve_link(&link)
        .map_err(|source| DeployError::LinkResolution {
            path: link.clone(),
            source,
        })?;

    let version = target
        .file_name()
        .ok_or_else(|| DeployError::LinkResolution {
            path: link.clone(),
            source: FileOpsError::Resolve {
                path: link.clone(),
                source: io::Error::new(
                    io::ErrorKind::InvalidData,
                    "link target has no final path component",
                ),
            },
        })?
        .to_string_lossy()
        .into_owned();

    debug!(root = %root.display(), version = %version, "read deployment state");
    Ok(Some(version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_root_reads_as_nothing_deployed() {
        // The root itself not existing means no current link either.
        let result = current_version(Path::new("/definitely/not/a/deploy/root"));
        assert!(matches!(result, Ok(None)));
    }

    #[cfg(unix)]
    mod on_disk {
        use super::*;
        use std::os::unix::fs::symlink;
        use tempfile::TempDir;

        #[test]
        fn no_current_entry_is_none() {
            let root = TempDir::new().expect("temp dir");
            let result = current_version(root.path()).expect("read");
            assert_eq!(result, None);
        }

        #[test]
        fn current_link_yields_target_directory_name() {
            let root = TempDir::new().expect("temp dir");
            let version_dir = root.path().join("2.0.65");
            fs::create_dir(&version_dir).expect("mkdir");
            symlink(&version_dir, root.path().join(CURRENT_LINK)).expect("symlink");

            let result = current_version(root.path()).expect("read");
            assert_eq!(result, Some("2.0.65".to_string()));
        }

        #[test]
        fn relative_link_target_also_resolves() {
            let root = TempDir::new().expect("temp dir");
            fs::create_dir(root.path().join("2.0.65")).expect("mkdir");
            symlink("2.0.65", root.path().join(CURRENT_LINK)).expect("symlink");

            let result = current_version(root.path()).expect("read");
            assert_eq!(result, Some("2.0.65".to_string()));
        }

        #[test]
        fn dangling_link_is_fatal_not_absent() {
            let root = TempDir::new().expect("temp dir");
            symlink(root.path().join("gone"), root.path().join(CURRENT_LINK))
                .expect("symlink");

            let err = current_version(root.path()).unwrap_err();
            assert!(matches!(err, DeployError::LinkResolution { .. }));
        }

        #[test]
        fn plain_directory_named_current_is_fatal() {
            let root = TempDir::new().expect("temp dir");
            fs::create_dir(root.path().join(CURRENT_LINK)).expect("mkdir");

            let err = current_version(root.path()).unwrap_err();
            match err {
                DeployError::LinkResolution { source, .. } => {
                    assert!(matches!(source, FileOpsError::NotALink { .. }));
                }
            }
        }

        #[test]
        fn reading_does_not_mutate_the_link() {
            let root = TempDir::new().expect("temp dir");
            let version_dir = root.path().join("2.0.65");
            fs::create_dir(&version_dir).expect("mkdir");
            let link = root.path().join(CURRENT_LINK);
            symlink(&version_dir, &link).expect("symlink");

            let _ = current_version(root.path()).expect("read");
            assert_eq!(fs::read_link(&link).expect("read_link"), version_dir);
        }
    }
}
