//! secrets::mock
//!
//! In-memory bag store for deterministic testing.
//!
//! # Example
//!
//! ```
//! use stevedore::secrets::{MockSecretStore, SecretStore};
//! use serde_json::json;
//!
//! let store = MockSecretStore::new().with_item(
//!     "repositories",
//!     "nexus",
//!     json!({"*": {"url": "https://nexus.example.com:8081", "repository": "releases"}}),
//! );
//!
//! let item = store.load("repositories", "nexus").unwrap();
//! assert!(item.contains_key("*"));
//! assert_eq!(store.loads().len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::traits::{BagItem, SecretError, SecretStore};

/// In-memory bag store for tests.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockSecretStore {
    inner: Arc<Mutex<MockStoreInner>>,
}

#[derive(Debug, Default)]
struct MockStoreInner {
    /// Items keyed by (bag, item).
    items: HashMap<(String, String), BagItem>,
    /// When set, every load fails with a clone of this error.
    fail_with: Option<SecretError>,
    /// Recorded (bag, item) load calls for verification.
    loads: Vec<(String, String)>,
}

impl MockSecretStore {
    /// Create an empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bag item.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not a JSON object; a bag item is always a map.
    pub fn with_item(self, bag: impl Into<String>, item: impl Into<String>, value: Value) -> Self {
        let map = match value {
            Value::Object(map) => map,
            other => panic!("bag item must be a JSON object, got: {}", other),
        };
        {
            let mut inner = self.inner.lock().unwrap();
            inner.items.insert((bag.into(), item.into()), map);
        }
        self
    }

    /// Make every subsequent load fail with the given error.
    pub fn fail_with(self, error: SecretError) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_with = Some(error);
        }
        self
    }

    /// All recorded load calls, in order.
    pub fn loads(&self) -> Vec<(String, String)> {
        let inner = self.inner.lock().unwrap();
        inner.loads.clone()
    }
}

impl SecretStore for MockSecretStore {
    fn load(&self, bag: &str, item: &str) -> Result<BagItem, SecretError> {
        let mut inner = self.inner.lock().unwrap();
        inner.loads.push((bag.to_string(), item.to_string()));

        if let Some(err) = &inner.fail_with {
            return Err(err.clone());
        }

        inner
            .items
            .get(&(bag.to_string(), item.to_string()))
            .cloned()
            .ok_or_else(|| SecretError::NotFound(item.to_string()))
    }
}
