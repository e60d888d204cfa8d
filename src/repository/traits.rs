//! repository::traits
//!
//! Repository client capability definition.
//!
//! # Design
//!
//! The `RepositoryClient` trait is the boundary between this crate and the
//! artifact repository server. Transport and authentication internals stay
//! behind it; callers see two operations: a metadata query returning the
//! raw resolve document, and a pull that writes exactly one file into an
//! existing destination directory.
//!
//! All methods block the calling thread; timeout and retry policy belong
//! to the implementation and its callers, not to this trait.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::coordinate::ArtifactCoordinate;

/// Errors from repository operations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// Authentication failed (bad credentials, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested artifact or metadata was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server returned an error response.
    #[error("repository error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the server
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// Local filesystem error while writing pulled bytes.
    #[error("filesystem error: {0}")]
    Io(String),
}

/// Metadata describing the file a pull wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFile {
    /// Path of the written file inside the destination directory.
    pub path: PathBuf,
    /// Size of the written file in bytes.
    pub size: u64,
    /// SHA-256 of the written bytes, hex-encoded.
    pub sha256: String,
    /// SHA-1 advertised by the repository, when it supplies one.
    pub remote_sha1: Option<String>,
}

/// The repository client capability.
///
/// Implementations must be `Send + Sync`. Obtain one through
/// [`crate::repository::create_client`] rather than naming concrete types.
pub trait RepositoryClient: Send + Sync {
    /// Backend name (e.g. `"nexus"`, `"mock"`).
    fn name(&self) -> &'static str;

    /// Fetch the resolve document for `coordinate`.
    ///
    /// Returns the raw document text; interpreting it is the caller's job
    /// (see [`crate::resolve`]).
    fn artifact_info(&self, coordinate: &ArtifactCoordinate) -> Result<String, RepositoryError>;

    /// Download the artifact into `destination`, which must already exist.
    ///
    /// Writes exactly one file, `<artifact>-<version>.<extension>`,
    /// overwriting any previous copy, and returns its metadata.
    fn pull_artifact(
        &self,
        coordinate: &ArtifactCoordinate,
        destination: &Path,
    ) -> Result<ArtifactFile, RepositoryError>;
}
