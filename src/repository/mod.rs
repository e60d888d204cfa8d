//! repository
//!
//! Repository client capability and backends.
//!
//! # Design
//!
//! Commands obtain a client through [`create_client`] instead of naming
//! concrete types, keeping the rest of the crate independent of the
//! backend. Nexus is the only production backend today; [`MockRepository`]
//! exists for deterministic tests.
//!
//! A client is created fresh per operation from the resolved
//! [`RepositoryConfig`](crate::config::RepositoryConfig) — no handle is
//! cached across calls.

mod mock;
mod nexus;
mod traits;

pub use mock::{FailOn, MockOperation, MockRepository};
pub use nexus::NexusClient;
pub use traits::{ArtifactFile, RepositoryClient, RepositoryError};

use crate::config::RepositoryConfig;

/// Create a repository client for the given config.
///
/// `verify_tls` controls certificate verification; pass `false` only for
/// servers with self-signed certificates.
///
/// # Errors
///
/// Initialization errors from the backend
/// ([`RepositoryError::NetworkError`]).
pub fn create_client(
    config: &RepositoryConfig,
    verify_tls: bool,
) -> Result<Box<dyn RepositoryClient>, RepositoryError> {
    Ok(Box::new(NexusClient::new(config, verify_tls)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn create_client_builds_nexus_backend() {
        let config = RepositoryConfig {
            url: "https://nexus.example.com:8081".to_string(),
            repository: "releases".to_string(),
            username: None,
            password: None,
            extra: HashMap::new(),
        };

        let client = create_client(&config, true).expect("create client");
        assert_eq!(client.name(), "nexus");
    }
}
