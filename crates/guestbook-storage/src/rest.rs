//! Hosted database adapter.
//!
//! Talks to a PostgREST-compatible endpoint (as exposed by Supabase and
//! similar hosts) under `{url}/rest/v1/{table}`. The table must have the
//! columns `id`, `name`, `message`, and `created_at`, with `id` and
//! `created_at` filled in by the database on insert.

use crate::{BackendKind, EntryStore, Result, StorageError};
use async_trait::async_trait;
use guestbook_types::{GuestbookEntry, NewEntry};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;

/// Default table name.
pub const DEFAULT_TABLE: &str = "guestbook";

const LIST_ORDER: &str = "created_at.desc,id.desc";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Connection settings for [`RestStore`].
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// API key sent as both `apikey` and bearer token.
    pub api_key: String,
    /// Table holding the entries.
    pub table: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RestStoreConfig {
    /// Creates a config with the default table and a 10 second timeout.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct RestErrorBody {
    message: Option<String>,
}

/// Entry store backed by a hosted database.
#[derive(Debug, Clone)]
pub struct RestStore {
    endpoint: String,
    api_key: String,
    http: Client,
}

impl RestStore {
    /// Creates a store from its connection settings.
    pub fn new(config: RestStoreConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StorageError::Unexpected(format!("failed to create HTTP client: {e}")))?;

        let endpoint = format!(
            "{}/rest/v1/{}",
            config.url.trim_end_matches('/'),
            config.table
        );

        Ok(Self {
            endpoint,
            api_key: config.api_key,
            http,
        })
    }

    /// Returns the table endpoint this store talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
    }

    /// Turns a non-success response into a storage error.
    ///
    /// Messages the store reports in its JSON error body are passed
    /// through; anything else is treated as unexpected.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<RestErrorBody>(&text) {
            Ok(RestErrorBody {
                message: Some(message),
            }) => Err(StorageError::Backend(message)),
            _ => Err(StorageError::Unexpected(format!(
                "store responded with {status}: {text}"
            ))),
        }
    }

    async fn rows(response: Response) -> Result<Vec<GuestbookEntry>> {
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| StorageError::Unexpected(format!("invalid rows from store: {e}")))
    }
}

#[async_trait]
impl EntryStore for RestStore {
    async fn insert(&self, entry: NewEntry) -> Result<GuestbookEntry> {
        let response = self
            .authorized(self.http.post(&self.endpoint))
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&[&entry])
            .send()
            .await?;

        Self::rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StorageError::Unexpected("insert returned no row".to_string()))
    }

    async fn list(&self) -> Result<Vec<GuestbookEntry>> {
        let response = self
            .authorized(self.http.get(&self.endpoint))
            .query(&[("select", "*"), ("order", LIST_ORDER)])
            .send()
            .await?;

        Self::rows(response).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let filter = format!("eq.{id}");
        let response = self
            .authorized(self.http.delete(&self.endpoint))
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&[("id", filter.as_str())])
            .send()
            .await?;

        let deleted = Self::rows(response).await?;
        if deleted.is_empty() {
            return Err(StorageError::NotFound(id.to_string()));
        }
        tracing::debug!(id = %id, rows = deleted.len(), "Deleted entry from store");
        Ok(())
    }

    fn backend(&self) -> BackendKind {
        BackendKind::Rest
    }
}
