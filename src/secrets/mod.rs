//! secrets
//!
//! Secret store abstraction for repository configuration bags.
//!
//! # Architecture
//!
//! Bag items are loaded through the [`SecretStore`] trait, which has two
//! production backends selected by the process-wide execution mode:
//!
//! - [`FileBagStore`]: plaintext JSON bags on local disk (standalone mode)
//! - [`HttpBagStore`]: bags fetched from a central bag service (managed mode)
//!
//! plus [`MockSecretStore`] for deterministic tests.
//!
//! The execution mode is an explicit [`ExecutionMode`] value handed to
//! [`create_store`]; nothing here reads ambient process state.
//!
//! # Security
//!
//! Credential values are never logged or included in error messages by any
//! backend.
//!
//! # Example
//!
//! ```ignore
//! use stevedore::secrets::{create_store, ExecutionMode};
//!
//! // Standalone host: bags live on local disk
//! let store = create_store(ExecutionMode::Standalone, "/etc/deploy/bags")?;
//!
//! // Managed host: bags come from the bag service
//! let store = create_store(ExecutionMode::Managed, "https://bags.example.com")?;
//! ```

mod file_store;
mod http_store;
mod mock;
mod traits;

pub use file_store::FileBagStore;
pub use http_store::HttpBagStore;
pub use mock::MockSecretStore;
pub use traits::{BagItem, SecretError, SecretStore};

use std::path::PathBuf;

/// How this process retrieves secrets.
///
/// Managed hosts talk to a central bag service; standalone hosts carry
/// their bags on local disk. The flag is process-wide policy decided by
/// the caller at startup and passed down explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Bags are fetched from a central bag service.
    Managed,
    /// Bags are read from local disk.
    Standalone,
}

impl ExecutionMode {
    /// All supported modes.
    pub fn all() -> &'static [ExecutionMode] {
        &[ExecutionMode::Managed, ExecutionMode::Standalone]
    }

    /// The mode name as used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            ExecutionMode::Managed => "managed",
            ExecutionMode::Standalone => "standalone",
        }
    }

    /// Parse a mode from a string, case-insensitive.
    ///
    /// # Example
    ///
    /// ```
    /// use stevedore::secrets::ExecutionMode;
    ///
    /// assert_eq!(ExecutionMode::parse("Managed"), Some(ExecutionMode::Managed));
    /// assert_eq!(ExecutionMode::parse("solo"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "managed" => Some(ExecutionMode::Managed),
            "standalone" => Some(ExecutionMode::Standalone),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Create a secret store for the given execution mode.
///
/// `source` is the bag root directory in standalone mode and the bag
/// service base URL in managed mode.
///
/// # Errors
///
/// Initialization errors from the selected backend
/// ([`SecretError::ProviderNotAvailable`]).
///
/// # Example
///
/// ```
/// use stevedore::secrets::{create_store, ExecutionMode};
///
/// let store = create_store(ExecutionMode::Standalone, "/etc/deploy/bags").unwrap();
/// assert!(store.load("repositories", "nexus").is_err());
/// ```
pub fn create_store(
    mode: ExecutionMode,
    source: &str,
) -> Result<Box<dyn SecretStore>, SecretError> {
    match mode {
        ExecutionMode::Standalone => Ok(Box::new(FileBagStore::with_root(PathBuf::from(source)))),
        ExecutionMode::Managed => Ok(Box::new(HttpBagStore::new(source)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(ExecutionMode::parse("managed"), Some(ExecutionMode::Managed));
        assert_eq!(ExecutionMode::parse("MANAGED"), Some(ExecutionMode::Managed));
        assert_eq!(
            ExecutionMode::parse("Standalone"),
            Some(ExecutionMode::Standalone)
        );
    }

    #[test]
    fn parse_unknown_is_none() {
        assert_eq!(ExecutionMode::parse("solo"), None);
        assert_eq!(ExecutionMode::parse(""), None);
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(format!("{}", ExecutionMode::Managed), "managed");
        assert_eq!(format!("{}", ExecutionMode::Standalone), "standalone");
    }

    #[test]
    fn all_lists_both_modes() {
        let all = ExecutionMode::all();
        assert!(all.contains(&ExecutionMode::Managed));
        assert!(all.contains(&ExecutionMode::Standalone));
    }

    #[test]
    fn create_standalone_store() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        let store = create_store(ExecutionMode::Standalone, temp.path().to_str().unwrap())
            .expect("create store");
        let err = store.load("repositories", "nexus").unwrap_err();
        assert!(matches!(err, SecretError::NotFound(_)));
    }

    #[test]
    fn create_managed_store() {
        let store = create_store(ExecutionMode::Managed, "https://bags.example.com");
        assert!(store.is_ok());
    }
}
