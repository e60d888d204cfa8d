//! secrets::http_store
//!
//! HTTP-backed bag store for managed mode.
//!
//! # Design
//!
//! Managed hosts fetch bag items from a central bag service instead of
//! local disk: `GET <base>/bags/<bag>/items/<item>` returns the item as a
//! JSON object. Authentication is an optional bearer token. Timeout policy
//! stays transport-level; there is no retry here.
//!
//! # Security
//!
//! The bearer token never appears in `Debug` output or error messages.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use super::traits::{BagItem, SecretError, SecretStore};

/// Transport-level timeout; retries and backoff stay with the caller.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP-backed bag store.
pub struct HttpBagStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

// Custom Debug to avoid exposing the token.
impl std::fmt::Debug for HttpBagStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBagStore")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl HttpBagStore {
    /// Create a store pointed at a bag service.
    ///
    /// # Errors
    ///
    /// [`SecretError::ProviderNotAvailable`] when the HTTP client cannot
    /// be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SecretError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                SecretError::ProviderNotAvailable(format!("cannot build HTTP client: {}", e))
            })?;
        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach a bearer token for authenticated bag services.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn item_url(&self, bag: &str, item: &str) -> String {
        format!("{}/bags/{}/items/{}", self.base_url, bag, item)
    }
}

impl SecretStore for HttpBagStore {
    fn load(&self, bag: &str, item: &str) -> Result<BagItem, SecretError> {
        let url = self.item_url(bag, item);
        debug!(bag, item, "fetching bag item");

        let mut request = self.client.get(&url);
        if let Some(token) = self.token.as_deref() {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| SecretError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SecretError::NotFound(item.to_string()));
        }
        if !status.is_success() {
            return Err(SecretError::ReadError(format!(
                "bag service returned {}",
                status
            )));
        }

        let value: Value = response
            .json()
            .map_err(|e| SecretError::ParseError(format!("cannot parse bag item: {}", e)))?;

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(SecretError::ParseError(format!(
                "bag item '{}' is not a JSON object",
                item
            ))),
        }
    }
}
