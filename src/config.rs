//! config
//!
//! Per-environment repository configuration resolution.
//!
//! # Design
//!
//! A bag item holds one entry per environment, keyed by environment name,
//! with `"*"` as the wildcard fallback:
//!
//! ```json
//! {
//!   "staging": { "url": "https://nexus-stage.example.com:8081", "repository": "staging" },
//!   "*":       { "url": "https://nexus.example.com:8081", "repository": "releases" }
//! }
//! ```
//!
//! [`ConfigResolver`] loads the item named by the repository key, picks the
//! sub-entry for the target environment (falling back to `"*"`), and
//! deserializes it into [`RepositoryConfig`]. Exactly one store round trip
//! per call; nothing is cached, so every invocation observes the store's
//! current state.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::secrets::{SecretError, SecretStore};

/// Bag that repository config items live in by default.
pub const DEFAULT_BAG: &str = "repositories";

/// Wildcard environment entry used when no exact match exists.
pub const WILDCARD_ENVIRONMENT: &str = "*";

/// Errors from configuration resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The store has no config item for the repository key.
    #[error("no repository config found for '{0}'")]
    NotFound(String),

    /// The item exists but has neither the environment entry nor `"*"`.
    #[error(
        "repository config '{repository}' has no entry for environment \
         '{environment}' and no '*' fallback"
    )]
    EnvironmentNotFound {
        /// The repository key that was looked up.
        repository: String,
        /// The environment that had no entry.
        environment: String,
    },

    /// The selected entry does not deserialize into [`RepositoryConfig`].
    #[error("repository config '{repository}' entry for '{environment}' is malformed: {reason}")]
    Malformed {
        /// The repository key that was looked up.
        repository: String,
        /// The environment whose entry is malformed.
        environment: String,
        /// Deserialization failure detail.
        reason: String,
    },

    /// The store itself failed (network, parse, backend unavailable).
    #[error(transparent)]
    Store(#[from] SecretError),
}

/// Connection data for one artifact repository server.
///
/// Deserialized from a per-environment bag sub-entry. Keys this crate does
/// not interpret are preserved in `extra` for callers.
#[derive(Clone, Deserialize)]
pub struct RepositoryConfig {
    /// Base URL of the repository server, e.g. `https://nexus.example.com:8081`.
    pub url: String,
    /// Repository name artifacts are served from, e.g. `releases`.
    pub repository: String,
    /// Basic-auth username, if the server requires one.
    #[serde(default)]
    pub username: Option<String>,
    /// Basic-auth password.
    #[serde(default)]
    pub password: Option<String>,
    /// Uninterpreted keys from the bag entry.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

// Custom Debug to keep the password out of logs and error chains.
impl std::fmt::Debug for RepositoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryConfig")
            .field("url", &self.url)
            .field("repository", &self.repository)
            .field("username", &self.username)
            .field("has_password", &self.password.is_some())
            .field("extra", &self.extra)
            .finish()
    }
}

/// Resolves per-environment repository configuration from a secret store.
pub struct ConfigResolver {
    store: Box<dyn SecretStore>,
    bag: String,
}

impl ConfigResolver {
    /// Create a resolver over a store, using [`DEFAULT_BAG`].
    pub fn new(store: Box<dyn SecretStore>) -> Self {
        Self {
            store,
            bag: DEFAULT_BAG.to_string(),
        }
    }

    /// Override the bag name items are loaded from.
    pub fn with_bag(mut self, bag: impl Into<String>) -> Self {
        self.bag = bag.into();
        self
    }

    /// Resolve the repository config for `environment`.
    ///
    /// `node` identifies the calling host and only annotates trace output.
    /// One store round trip; no local mutation.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NotFound`] when the store has no item for
    ///   `repository_key`
    /// - [`ConfigError::EnvironmentNotFound`] when the item has neither
    ///   the environment entry nor the `"*"` fallback
    /// - [`ConfigError::Malformed`] when the selected entry does not
    ///   deserialize
    pub fn resolve(
        &self,
        node: &str,
        environment: &str,
        repository_key: &str,
    ) -> Result<RepositoryConfig, ConfigError> {
        debug!(node, environment, repository_key, "loading repository config");

        let item = self
            .store
            .load(&self.bag, repository_key)
            .map_err(|e| match e {
                SecretError::NotFound(_) => ConfigError::NotFound(repository_key.to_string()),
                other => ConfigError::Store(other),
            })?;

        let entry = item
            .get(environment)
            .or_else(|| item.get(WILDCARD_ENVIRONMENT))
            .ok_or_else(|| ConfigError::EnvironmentNotFound {
                repository: repository_key.to_string(),
                environment: environment.to_string(),
            })?;

        serde_json::from_value(entry.clone()).map_err(|e| ConfigError::Malformed {
            repository: repository_key.to_string(),
            environment: environment.to_string(),
            reason: e.to_string(),
        })
    }
}
