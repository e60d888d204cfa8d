//! fetch
//!
//! Artifact download into a destination directory.
//!
//! # Design
//!
//! The fetcher delegates the transfer to the repository client, which
//! writes exactly one file (`<artifact>-<version>.<extension>`) into the
//! destination directory and reports its metadata. The destination must
//! already exist — deciding where artifacts land, and creating that
//! location, is the caller's job.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::RepositoryConfig;
use crate::coordinate::{ArtifactCoordinate, CoordinateError};
use crate::repository::{create_client, ArtifactFile, RepositoryClient, RepositoryError};

/// Errors from artifact fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The coordinate string was malformed; nothing was transferred.
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    /// The destination directory does not exist.
    #[error("destination directory {0} does not exist")]
    DestinationNotFound(PathBuf),

    /// The transfer failed (transport, auth, or filesystem write).
    #[error("failed to fetch {coordinate}: {source}")]
    Remote {
        /// Coordinate being fetched.
        coordinate: String,
        /// Underlying repository failure.
        #[source]
        source: RepositoryError,
    },
}

/// Fetch an artifact into `destination`.
///
/// The version field should already be resolved (see [`crate::resolve`]);
/// a `latest` alias is passed to the repository literally.
///
/// # Errors
///
/// - [`FetchError::Coordinate`] on malformed input
/// - [`FetchError::DestinationNotFound`] when `destination` is missing
/// - [`FetchError::Remote`] on any transfer failure
pub fn fetch_artifact(
    coordinate: &str,
    config: &RepositoryConfig,
    destination: &Path,
    verify_tls: bool,
) -> Result<ArtifactFile, FetchError> {
    let parsed = ArtifactCoordinate::parse(coordinate)?;
    let client = create_client(config, verify_tls).map_err(|source| FetchError::Remote {
        coordinate: coordinate.to_string(),
        source,
    })?;
    fetch_with_client(&parsed, client.as_ref(), destination)
}

/// Fetch using an already-constructed client.
///
/// Same contract as [`fetch_artifact`], with the repository capability
/// injected.
pub fn fetch_with_client(
    coordinate: &ArtifactCoordinate,
    client: &dyn RepositoryClient,
    destination: &Path,
) -> Result<ArtifactFile, FetchError> {
    if !destination.is_dir() {
        return Err(FetchError::DestinationNotFound(destination.to_path_buf()));
    }

    info!(%coordinate, destination = %destination.display(), "fetching artifact");
    client
        .pull_artifact(coordinate, destination)
        .map_err(|source| FetchError::Remote {
            coordinate: coordinate.to_string(),
            source,
        })
}
