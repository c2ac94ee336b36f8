//! Entry storage for the guestbook.
//!
//! The node talks to exactly one [`EntryStore`] for its whole lifetime.
//! Two implementations are provided:
//!
//! - [`MemoryStore`]: process-local list used in demo mode when no
//!   database is configured. Not durable, single instance only.
//! - [`RestStore`]: adapter for a hosted PostgREST-compatible database.
//!
//! Both return entries newest first (by `created_at`, ties broken by
//! insertion order) and both report [`StorageError::NotFound`] when asked
//! to delete an id that does not exist.

mod error;
mod memory;
mod rest;
mod traits;

pub use error::StorageError;
pub use memory::{MemoryStore, WELCOME_ENTRY_ID};
pub use rest::{RestStore, RestStoreConfig, DEFAULT_TABLE};
pub use traits::{BackendKind, EntryStore};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
