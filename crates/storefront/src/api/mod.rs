//! Storefront REST API client.
//!
//! # Architecture
//!
//! - Thin `reqwest` wrapper: base URL, bearer token injection, user agent
//! - Every response is a `{ data, message }` envelope
//! - 401/403 are classified separately from every other failure so stores
//!   can render them as an empty state
//! - No caching and no retries; the backend is the source of truth
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_client::api::{ApiClient, Address};
//!
//! let client = ApiClient::new(&config)?;
//! let response = client.get::<Vec<Address>>("address/get-addresses").await?;
//! let addresses = response.into_data()?;
//! ```

mod resource;
mod types;

pub use resource::{Addresses, IdOf, Orders, Resource};
pub use types::*;

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;

// ─────────────────────────────────────────────────────────────────────────────
// Envelope
// ─────────────────────────────────────────────────────────────────────────────

/// The `{ data, message }` wrapper every endpoint answers with.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    message: Option<String>,
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self {
            data: None,
            message: None,
        }
    }
}

/// A decoded success response.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// The payload, if the server sent one.
    pub data: Option<T>,
    /// Human-readable message from the server (used for notices).
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Take the payload, failing if the server sent none.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingData` if `data` was null or absent.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.data.ok_or(ApiError::MissingData)
    }

    /// Take the payload together with the server message.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingData` if `data` was null or absent.
    pub fn into_parts(self) -> Result<(T, Option<String>), ApiError> {
        match self.data {
            Some(data) => Ok((data, self.message)),
            None => Err(ApiError::MissingData),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// API Client
// ─────────────────────────────────────────────────────────────────────────────

/// Client for the storefront REST API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    authorization: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("authenticated", &self.inner.authorization.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client: builder.build()?,
                base_url: config.base_url.clone(),
                authorization: config.bearer(),
            }),
        })
    }

    /// The base URL endpoint paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Whether requests carry an `Authorization` header.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.authorization.is_some()
    }

    /// `GET` a path.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, ApiError> {
        self.request::<(), T>(Method::GET, path, None).await
    }

    /// `POST` a JSON body to a path.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// `PUT` a JSON body to a path.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// `DELETE` a path.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request::<(), T>(Method::DELETE, path, None).await
    }

    /// Send a request and decode the envelope.
    ///
    /// `path` is relative to the base URL (no leading slash).
    ///
    /// # Errors
    ///
    /// - `ApiError::Unauthorized` for 401/403 responses
    /// - `ApiError::Status` for any other non-success response
    /// - `ApiError::Http` if the request could not be sent
    /// - `ApiError::Parse` if a success body is not a valid envelope
    #[instrument(skip(self, body), fields(method = %method, path = %path))]
    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.inner.base_url.join(path)?;

        let mut request = self
            .inner
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(authorization) = &self.inner.authorization {
            request = request.header(AUTHORIZATION, authorization);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        // Read the body as text first so error envelopes can be inspected
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&text)
                .ok()
                .and_then(|envelope| envelope.message);
            debug!(%status, ?message, "API request failed");
            return Err(ApiError::from_status(status, message));
        }

        let envelope: Envelope<T> = if text.trim().is_empty() {
            Envelope::default()
        } else {
            serde_json::from_str(&text)?
        };

        Ok(ApiResponse {
            data: envelope.data,
            message: envelope.message,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_data() {
        let envelope: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"data":[1,2,3],"message":"ok"}"#).unwrap();
        assert_eq!(envelope.data, Some(vec![1, 2, 3]));
        assert_eq!(envelope.message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_envelope_null_data() {
        let envelope: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"data":null,"message":"Address deleted"}"#).unwrap();
        assert!(envelope.data.is_none());

        let envelope: Envelope<Vec<u32>> = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.is_none());
        assert!(envelope.message.is_none());
    }

    #[test]
    fn test_into_data_requires_payload() {
        let response: ApiResponse<u32> = ApiResponse {
            data: None,
            message: Some("done".to_string()),
        };
        assert!(matches!(response.into_data(), Err(ApiError::MissingData)));
    }

    #[test]
    fn test_client_debug_hides_token() {
        let config = ClientConfig::new("http://localhost:9")
            .unwrap()
            .with_token("tok_live_abcdef");
        let client = ApiClient::new(&config).unwrap();

        let debug_output = format!("{client:?}");
        assert!(debug_output.contains("authenticated: true"));
        assert!(!debug_output.contains("tok_live_abcdef"));
        assert_eq!(client.base_url().as_str(), "http://localhost:9/");
    }
}
