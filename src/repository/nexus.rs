//! repository::nexus
//!
//! Nexus repository client over the v2 REST API.
//!
//! # Design
//!
//! Two endpoints cover everything this crate needs:
//!
//! - `service/local/artifact/maven/resolve` — metadata query; returns the
//!   XML resolve document with the concrete version
//! - `service/local/artifact/maven/redirect` — direct download; the client
//!   follows the redirect and streams the body into the destination
//!   directory
//!
//! # Authentication
//!
//! Basic auth with the credentials from [`RepositoryConfig`], when
//! present. Credentials never appear in `Debug` output or error messages.
//!
//! # TLS
//!
//! `verify_tls: false` disables certificate verification for servers with
//! self-signed certificates. That is the operator's accepted risk; the
//! default is to verify.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::traits::{ArtifactFile, RepositoryClient, RepositoryError};
use crate::config::RepositoryConfig;
use crate::coordinate::ArtifactCoordinate;

/// Resolve endpoint, relative to the base URL.
const RESOLVE_PATH: &str = "nexus/service/local/artifact/maven/resolve";

/// Redirect (direct download) endpoint, relative to the base URL.
const REDIRECT_PATH: &str = "nexus/service/local/artifact/maven/redirect";

/// Response header carrying the repository-side SHA-1, when present.
const CHECKSUM_HEADER: &str = "X-Checksum-Sha1";

/// Transport-level timeout; retries and backoff stay with the caller.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Nexus implementation of [`RepositoryClient`].
pub struct NexusClient {
    /// Blocking HTTP client (follows redirects).
    client: Client,
    /// Base URL without trailing slash.
    base_url: String,
    /// Repository name artifacts are served from.
    repository: String,
    /// Basic-auth credentials, if configured.
    username: Option<String>,
    password: Option<String>,
}

// Custom Debug to avoid exposing credentials.
impl std::fmt::Debug for NexusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NexusClient")
            .field("base_url", &self.base_url)
            .field("repository", &self.repository)
            .field("has_credentials", &self.username.is_some())
            .finish()
    }
}

impl NexusClient {
    /// Create a client from resolved repository config.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::NetworkError`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: &RepositoryConfig, verify_tls: bool) -> Result<Self, RepositoryError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(!verify_tls)
            .build()
            .map_err(|e| {
                RepositoryError::NetworkError(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            repository: config.repository.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Build a service URL with the coordinate query parameters.
    fn service_url(&self, path: &str, coordinate: &ArtifactCoordinate) -> String {
        format!(
            "{}/{}?g={}&a={}&v={}&e={}&r={}",
            self.base_url,
            path,
            coordinate.group,
            coordinate.artifact,
            coordinate.version,
            coordinate.extension,
            self.repository
        )
    }

    /// Issue a GET, mapping non-success statuses to errors.
    fn get(&self, url: &str) -> Result<Response, RepositoryError> {
        let mut request = self.client.get(url);
        if let Some(user) = &self.username {
            request = request.basic_auth(user, self.password.as_deref());
        }

        let response = request
            .send()
            .map_err(|e| RepositoryError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        Err(match status {
            StatusCode::UNAUTHORIZED => {
                RepositoryError::AuthFailed("invalid or missing credentials".into())
            }
            StatusCode::FORBIDDEN => RepositoryError::AuthFailed("permission denied".into()),
            StatusCode::NOT_FOUND => RepositoryError::NotFound(url.to_string()),
            _ => RepositoryError::ApiError {
                status: status.as_u16(),
                message: response
                    .text()
                    .unwrap_or_else(|_| "unknown error".to_string()),
            },
        })
    }
}

impl RepositoryClient for NexusClient {
    fn name(&self) -> &'static str {
        "nexus"
    }

    fn artifact_info(&self, coordinate: &ArtifactCoordinate) -> Result<String, RepositoryError> {
        let url = self.service_url(RESOLVE_PATH, coordinate);
        debug!(%coordinate, "querying artifact metadata");

        let response = self.get(&url)?;
        response
            .text()
            .map_err(|e| RepositoryError::NetworkError(e.to_string()))
    }

    fn pull_artifact(
        &self,
        coordinate: &ArtifactCoordinate,
        destination: &Path,
    ) -> Result<ArtifactFile, RepositoryError> {
        let url = self.service_url(REDIRECT_PATH, coordinate);
        debug!(%coordinate, destination = %destination.display(), "pulling artifact");

        let response = self.get(&url)?;
        let remote_sha1 = response
            .headers()
            .get(CHECKSUM_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .map_err(|e| RepositoryError::NetworkError(e.to_string()))?;

        let path = destination.join(coordinate.file_name());
        let mut file = fs::File::create(&path).map_err(|e| {
            RepositoryError::Io(format!("cannot create {}: {}", path.display(), e))
        })?;
        file.write_all(&bytes).map_err(|e| {
            RepositoryError::Io(format!("cannot write {}: {}", path.display(), e))
        })?;
        file.sync_all().map_err(|e| {
            RepositoryError::Io(format!("cannot sync {}: {}", path.display(), e))
        })?;

        Ok(ArtifactFile {
            path,
            size: bytes.len() as u64,
            sha256: hex::encode(Sha256::digest(&bytes)),
            remote_sha1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn test_config() -> RepositoryConfig {
        RepositoryConfig {
            url: "https://nexus.example.com:8081/".to_string(),
            repository: "releases".to_string(),
            username: Some("deploy".to_string()),
            password: Some("s3cr3t".to_string()),
            extra: HashMap::new(),
        }
    }

    #[test]
    fn service_url_includes_all_coordinate_fields() {
        let client = NexusClient::new(&test_config(), true).expect("client");
        let coord = ArtifactCoordinate::parse("com.x:y:1.0:jar").unwrap();

        assert_eq!(
            client.service_url(RESOLVE_PATH, &coord),
            "https://nexus.example.com:8081/nexus/service/local/artifact/maven/resolve\
             ?g=com.x&a=y&v=1.0&e=jar&r=releases"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = NexusClient::new(&test_config(), true).expect("client");
        assert_eq!(client.base_url, "https://nexus.example.com:8081");
    }

    #[test]
    fn debug_does_not_expose_credentials() {
        let client = NexusClient::new(&test_config(), true).expect("client");
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("s3cr3t"));
        assert!(!rendered.contains("deploy"));
        assert!(rendered.contains("has_credentials: true"));
    }
}
