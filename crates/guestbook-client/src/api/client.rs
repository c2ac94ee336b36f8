//! # API Client
//!
//! HTTP client for communicating with `guestbook-node`.

use guestbook_types::{CreateEntryRequest, EntryId, GuestbookEntry};
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::error::{ApiResult, ClientError};

const GUESTBOOK_PATH: &str = "/api/guestbook";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body sent by the node.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP client for the guestbook API.
///
/// The client is cheaply cloneable and can be shared across tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use guestbook_client::api::GuestbookClient;
///
/// # async fn run() -> Result<(), guestbook_client::api::ClientError> {
/// let client = GuestbookClient::new("http://127.0.0.1:8080")?;
/// let entries = client.list_entries().await?;
/// println!("Found {} entries", entries.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct GuestbookClient {
    base_url: String,
    http: Client,
}

impl GuestbookClient {
    /// Creates a new client for the node at `base_url` with a 30 second
    /// request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let http = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self::with_http_client(base_url, http))
    }

    /// Creates a client around a preconfigured [`reqwest::Client`].
    pub fn with_http_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn guestbook_url(&self) -> String {
        format!("{}{}", self.base_url, GUESTBOOK_PATH)
    }

    /// Checks if the node is reachable and healthy.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] if the request fails.
    pub async fn health(&self) -> ApiResult<bool> {
        let res = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(res.status().is_success())
    }

    /// Retrieves all entries, newest first.
    ///
    /// # Errors
    ///
    /// * [`ClientError::Network`] - Network request failed
    /// * [`ClientError::InvalidResponse`] - Node did not answer with JSON
    /// * [`ClientError::Api`] - Node reported a failure
    pub async fn list_entries(&self) -> ApiResult<Vec<GuestbookEntry>> {
        let res = self.http.get(self.guestbook_url()).send().await?;
        decode(res, "Failed to fetch entries.").await
    }

    /// Signs the guestbook.
    ///
    /// Both values are trimmed before sending; the node validates them.
    ///
    /// # Errors
    ///
    /// * [`ClientError::Api`] - Validation failed (400) or the store failed (500)
    /// * [`ClientError::InvalidResponse`] - Node did not answer with JSON
    pub async fn create_entry(&self, name: &str, message: &str) -> ApiResult<GuestbookEntry> {
        let req = CreateEntryRequest::new(name.trim(), message.trim());

        let res = self
            .http
            .post(self.guestbook_url())
            .json(&req)
            .send()
            .await?;
        decode(res, "Failed to post entry.").await
    }

    /// Deletes an entry.
    ///
    /// # Errors
    ///
    /// * [`ClientError::Api`] - Entry not found (404) or the store failed (500)
    /// * [`ClientError::InvalidResponse`] - Node did not answer with JSON
    pub async fn delete_entry(&self, id: &EntryId) -> ApiResult<()> {
        let res = self
            .http
            .delete(self.guestbook_url())
            .query(&[("id", id.to_string())])
            .send()
            .await?;
        decode::<serde_json::Value>(res, "Failed to delete entry.").await?;
        Ok(())
    }
}

fn is_json(res: &Response) -> bool {
    res.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"))
}

/// Decodes a node response, mapping failures the same way for every call.
async fn decode<T: DeserializeOwned>(res: Response, fallback: &str) -> ApiResult<T> {
    if !is_json(&res) {
        tracing::warn!(status = %res.status(), "Node returned a non-JSON response");
        return Err(ClientError::InvalidResponse);
    }

    let status = res.status();
    if !status.is_success() {
        let message = res
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    res.json()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}
