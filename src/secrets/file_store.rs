//! secrets::file_store
//!
//! File-based bag store for standalone mode.
//!
//! # Layout
//!
//! Bags are directories, items are JSON files:
//! `<root>/<bag>/<item>.json`. The default root is `~/.stevedore/bags`.
//! Items are plaintext JSON objects; standalone mode trusts filesystem
//! permissions, there is no store-side encryption.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use super::traits::{BagItem, SecretError, SecretStore};

/// File-based bag store.
///
/// This is the standalone-mode backend: deployment hosts that do not talk
/// to a managed bag service carry their bags on local disk.
///
/// # Example
///
/// ```ignore
/// use stevedore::secrets::{FileBagStore, SecretStore};
///
/// let store = FileBagStore::new()?;
/// let item = store.load("repositories", "nexus")?;
/// ```
#[derive(Debug)]
pub struct FileBagStore {
    /// Directory containing one subdirectory per bag.
    root: PathBuf,
}

impl FileBagStore {
    /// Create a store at the default root, `~/.stevedore/bags`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SecretError> {
        let home = dirs::home_dir()
            .ok_or_else(|| SecretError::ReadError("cannot determine home directory".into()))?;
        Ok(Self {
            root: home.join(".stevedore").join("bags"),
        })
    }

    /// Create a store rooted at a custom directory.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    /// The bag root directory.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn item_path(&self, bag: &str, item: &str) -> PathBuf {
        self.root.join(bag).join(format!("{}.json", item))
    }
}

impl SecretStore for FileBagStore {
    fn load(&self, bag: &str, item: &str) -> Result<BagItem, SecretError> {
        let path = self.item_path(bag, item);
        if !path.exists() {
            return Err(SecretError::NotFound(item.to_string()));
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| SecretError::ReadError(format!("cannot read bag item: {}", e)))?;

        let value: Value = serde_json::from_str(&content)
            .map_err(|e| SecretError::ParseError(format!("cannot parse bag item: {}", e)))?;

        match value {
            Value::Object(map) => Ok(map),
            other => Err(SecretError::ParseError(format!(
                "bag item '{}' is {}, expected an object",
                item,
                json_kind(&other)
            ))),
        }
    }
}

/// Human-readable JSON kind for error messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
