//! secrets::traits
//!
//! Secret store capability: named bags of JSON items.
//!
//! # Design
//!
//! Repository connection data (URLs, repository names, credentials) lives
//! in an external secret store organized as *bags* of *items*:
//! `load("repositories", "nexus")` returns one item as a key-value map.
//! The store is injected as a trait object; its transport, encryption, and
//! timeout policy are collaborator concerns this crate does not reimplement.
//!
//! # Security
//!
//! Implementations MUST:
//! - Never log, print, or include credential values in error messages
//! - Be thread-safe (Send + Sync)
//!
//! # Example
//!
//! ```ignore
//! use stevedore::secrets::{SecretStore, SecretError};
//!
//! fn repository_entry(store: &dyn SecretStore) -> Result<(), SecretError> {
//!     let item = store.load("repositories", "nexus")?;
//!     // item is a serde_json map; credential values are never printed
//!     Ok(())
//! }
//! ```

use serde_json::{Map, Value};
use thiserror::Error;

/// A loaded bag item: a JSON object keyed by string.
pub type BagItem = Map<String, Value>;

/// Errors from secret store operations.
///
/// Note: error messages intentionally never include credential values.
#[derive(Debug, Clone, Error)]
pub enum SecretError {
    /// The store has no item with the given name.
    #[error("no config item named '{0}' in the secret store")]
    NotFound(String),

    /// Failed to read from the backing store.
    #[error("failed to read from secret store: {0}")]
    ReadError(String),

    /// The stored item is not a JSON object.
    #[error("secret store item is not a JSON object: {0}")]
    ParseError(String),

    /// Could not reach a remote store.
    #[error("failed to reach secret store: {0}")]
    NetworkError(String),

    /// Store backend not available or misconfigured.
    #[error("secret store not available: {0}")]
    ProviderNotAvailable(String),
}

/// Trait for secret store backends.
///
/// # Keys
///
/// `bag` groups related items (`"repositories"` by default, see
/// [`crate::config::DEFAULT_BAG`]); `item` names one entry within the bag.
/// Implementations store both as-is without interpretation.
pub trait SecretStore: Send + Sync {
    /// Load the item `item` from bag `bag`.
    ///
    /// Returns the item's key-value map. Fails with
    /// [`SecretError::NotFound`] when the store has no such item; every
    /// other failure keeps its own variant so callers can tell a missing
    /// item from a broken store.
    fn load(&self, bag: &str, item: &str) -> Result<BagItem, SecretError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = SecretError::NotFound("nexus".into());
        assert!(err.to_string().contains("nexus"));
        assert!(err.to_string().contains("no config item"));

        let err = SecretError::ReadError("disk full".into());
        assert!(err.to_string().contains("read"));

        let err = SecretError::ParseError("not an object".into());
        assert!(err.to_string().contains("JSON"));

        let err = SecretError::NetworkError("connection refused".into());
        assert!(err.to_string().contains("reach"));

        let err = SecretError::ProviderNotAvailable("managed".into());
        assert!(err.to_string().contains("not available"));
    }
}
