//! resolve
//!
//! Version resolution for artifact coordinates.
//!
//! # Design
//!
//! A literal version is already resolved: it comes back unchanged with no
//! client construction and no network traffic. The `latest` alias (any
//! case) triggers exactly one metadata query; the first `<version>`
//! element of the resolve document is the answer. Resolving against an
//! unchanged remote is idempotent — repeated calls return the same version
//! until the repository publishes a new one.
//!
//! # Example
//!
//! ```
//! use stevedore::coordinate::ArtifactCoordinate;
//! use stevedore::repository::MockRepository;
//! use stevedore::resolve::resolve_with_client;
//!
//! let repo = MockRepository::new().with_info(
//!     "g:a:latest:tgz",
//!     "<artifact-resolution><data><version>2.0.5</version></data></artifact-resolution>",
//! );
//! let coord = ArtifactCoordinate::parse("g:a:latest:tgz").unwrap();
//!
//! assert_eq!(resolve_with_client(&coord, &repo).unwrap(), "2.0.5");
//! ```

use quick_xml::de::from_str;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::RepositoryConfig;
use crate::coordinate::{ArtifactCoordinate, CoordinateError};
use crate::repository::{create_client, RepositoryClient, RepositoryError};

/// Errors from version resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The coordinate string was malformed; nothing was queried.
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    /// The metadata query failed (transport, auth, server error).
    #[error("failed to resolve latest version of {coordinate}: {source}")]
    Remote {
        /// Coordinate being resolved.
        coordinate: String,
        /// Underlying repository failure.
        #[source]
        source: RepositoryError,
    },

    /// The resolve document could not be interpreted.
    #[error("resolve document for {coordinate} is unusable: {reason}")]
    Metadata {
        /// Coordinate being resolved.
        coordinate: String,
        /// Parse failure detail.
        reason: String,
    },
}

/// Resolve document; only the version element matters here, every other
/// field is ignored.
#[derive(Debug, Deserialize)]
struct ResolveDoc {
    data: ResolveData,
}

#[derive(Debug, Deserialize)]
struct ResolveData {
    version: String,
}

/// Resolve the version field of a coordinate string.
///
/// A literal version is returned as-is with zero network calls. The
/// `latest` alias is resolved against the repository named by `config`.
///
/// # Errors
///
/// - [`ResolveError::Coordinate`] on malformed input, before any I/O
/// - [`ResolveError::Remote`] on transport or server failure
/// - [`ResolveError::Metadata`] when the resolve document is unusable
pub fn resolve_version(
    coordinate: &str,
    config: &RepositoryConfig,
    verify_tls: bool,
) -> Result<String, ResolveError> {
    let parsed = ArtifactCoordinate::parse(coordinate)?;
    if !parsed.is_latest() {
        // Literal versions resolve locally: no client, no network.
        return Ok(parsed.version);
    }

    let client = create_client(config, verify_tls).map_err(|source| ResolveError::Remote {
        coordinate: coordinate.to_string(),
        source,
    })?;
    resolve_with_client(&parsed, client.as_ref())
}

/// Resolve against an already-constructed client.
///
/// Same contract as [`resolve_version`], with the repository capability
/// injected — the seam tests use to avoid network traffic.
pub fn resolve_with_client(
    coordinate: &ArtifactCoordinate,
    client: &dyn RepositoryClient,
) -> Result<String, ResolveError> {
    if !coordinate.is_latest() {
        return Ok(coordinate.version.clone());
    }

    debug!(%coordinate, backend = client.name(), "resolving latest version");
    let document = client
        .artifact_info(coordinate)
        .map_err(|source| ResolveError::Remote {
            coordinate: coordinate.to_string(),
            source,
        })?;

    let doc: ResolveDoc = from_str(&document).map_err(|e| ResolveError::Metadata {
        coordinate: coordinate.to_string(),
        reason: e.to_string(),
    })?;

    debug!(version = %doc.data.version, "resolved latest version");
    Ok(doc.data.version)
}
