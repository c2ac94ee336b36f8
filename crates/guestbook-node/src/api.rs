//! HTTP API for the guestbook.
//!
//! | Method | Path | Success | Failure |
//! |--------|------|---------|---------|
//! | GET | `/api/guestbook` | `200` entries, newest first | `500` |
//! | POST | `/api/guestbook` | `201` created entry | `400` validation, `500` |
//! | DELETE | `/api/guestbook?id=<id>` | `200 {"success":true}` | `400` missing id, `404`, `500` |
//!
//! Every failure body is `{"error": "<message>"}`. Store-reported messages
//! are passed through; any other fault becomes a fixed message per
//! operation and the detail only goes to the log.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        DefaultBodyLimit, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use guestbook_storage::{EntryStore, StorageError};
use guestbook_types::{CreateEntryRequest, GuestbookEntry, NewEntry, ValidationError};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::observability::{metrics_handler, metrics_layer, request_id_layer, METRICS};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 16 * 1024;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Entry store, fixed for the lifetime of the process.
    pub store: Arc<dyn EntryStore>,
}

impl AppState {
    /// Creates state around a store.
    pub fn new(store: impl EntryStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Creates state around an already shared store.
    pub fn from_shared(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }
}

/// The guestbook operation a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Listing entries.
    List,
    /// Creating an entry.
    Create,
    /// Deleting an entry.
    Delete,
}

impl Operation {
    /// Fixed message shown when the operation fails unexpectedly.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Failed to fetch guestbook entries",
            Self::Create => "Failed to create guestbook entry",
            Self::Delete => "Failed to delete guestbook entry",
        }
    }
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid request body")]
    InvalidBody(String),
    #[error("Entry ID is required")]
    MissingId,
    #[error("Entry not found")]
    NotFound(String),
    #[error("{0}")]
    Backend(String),
    #[error("{}", .operation.failure_message())]
    Unexpected { operation: Operation, detail: String },
}

impl ApiError {
    /// Translates a storage failure for the given operation.
    pub fn storage(operation: Operation, err: StorageError) -> Self {
        match err {
            StorageError::NotFound(id) => Self::NotFound(id),
            StorageError::Backend(message) => Self::Backend(message),
            StorageError::Unexpected(detail) => Self::Unexpected { operation, detail },
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidBody(_) | Self::MissingId => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Backend(_) | Self::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Unexpected { operation, detail } => {
                tracing::error!(?operation, error = %detail, "Guestbook operation failed");
            }
            Self::Backend(message) => {
                tracing::warn!(error = %message, "Store reported an error");
            }
            Self::InvalidBody(detail) => {
                tracing::debug!(error = %detail, "Rejected request body");
            }
            _ => {}
        }

        (
            self.status(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body returned by a successful delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Query parameters for delete.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route(
            "/api/guestbook",
            get(list_entries).post(create_entry).delete(delete_entry),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(metrics_layer())
        .layer(request_id_layer())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "backend": state.store.backend(),
    }))
}

/// Lists all entries, newest first.
async fn list_entries(
    State(state): State<AppState>,
) -> Result<Json<Vec<GuestbookEntry>>, ApiError> {
    let entries = state
        .store
        .list()
        .await
        .map_err(|e| ApiError::storage(Operation::List, e))?;

    Ok(Json(entries))
}

/// Creates an entry.
async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

    let entry = NewEntry::parse(request).inspect_err(|e| {
        METRICS.validation_failures.inc();
        tracing::debug!(reason = %e, "Rejected guestbook entry");
    })?;

    let created = state
        .store
        .insert(entry)
        .await
        .map_err(|e| ApiError::storage(Operation::Create, e))?;

    METRICS.entries_created.inc();
    tracing::info!(
        id = %created.id,
        backend = %state.store.backend(),
        "Guestbook entry created"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// Deletes an entry by id.
async fn delete_entry(
    State(state): State<AppState>,
    params: Result<Query<DeleteParams>, QueryRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = params
        .ok()
        .and_then(|Query(p)| p.id)
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::MissingId)?;

    state
        .store
        .delete(&id)
        .await
        .map_err(|e| ApiError::storage(Operation::Delete, e))?;

    METRICS.entries_deleted.inc();
    tracing::info!(id = %id, backend = %state.store.backend(), "Guestbook entry deleted");

    Ok(Json(DeleteResponse { success: true }))
}

/// Converts a handler panic into a generic 500.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: INTERNAL_ERROR_MESSAGE.to_string(),
        }),
    )
        .into_response()
}
