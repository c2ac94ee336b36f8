//! # Guestbook Node
//!
//! HTTP node serving the guestbook API.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                   Guestbook Node                     │
//! ├──────────────────────────────────────────────────────┤
//! │  HTTP API Layer                                      │
//! │  • GET/POST/DELETE /api/guestbook                    │
//! │  • /health, /metrics                                 │
//! │  • request ids, tracing, panic guard                 │
//! ├──────────────────────────────────────────────────────┤
//! │  Validation (guestbook-types)                        │
//! ├──────────────────────────────────────────────────────┤
//! │  EntryStore, chosen once at startup                  │
//! │  • RestStore   (hosted database)                     │
//! │  • MemoryStore (demo mode, single instance)          │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Router, handlers, and error mapping
//! - [`config`] - Layered node configuration and backend selection
//! - [`observability`] - Structured logging, metrics, and request ids
//!
//! ## Example: Serving a demo node
//!
//! ```rust,no_run
//! use guestbook_node::api::{create_router, AppState};
//! use guestbook_storage::MemoryStore;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let state = AppState::new(MemoryStore::with_welcome_entry());
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, create_router(state)).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod observability;
