//! Storage backend trait.
//!
//! Defines the interface every entry store implements so the node can be
//! handed either backend (or a fake one in tests) at startup.

use crate::Result;
use async_trait::async_trait;
use guestbook_types::{GuestbookEntry, NewEntry};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Which kind of backend is serving entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Process-local demo store.
    Memory,
    /// Hosted database reached over REST.
    Rest,
}

impl BackendKind {
    /// Returns the backend name as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Rest => "rest",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for guestbook entry storage backends.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Stores a validated entry, assigning its id and timestamp.
    async fn insert(&self, entry: NewEntry) -> Result<GuestbookEntry>;

    /// Returns all entries, newest first.
    async fn list(&self) -> Result<Vec<GuestbookEntry>>;

    /// Permanently removes the entry with the given raw id.
    ///
    /// Returns [`crate::StorageError::NotFound`] if no such entry exists.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Reports which backend this is.
    fn backend(&self) -> BackendKind;
}

#[async_trait]
impl<T: EntryStore + ?Sized> EntryStore for Arc<T> {
    async fn insert(&self, entry: NewEntry) -> Result<GuestbookEntry> {
        (**self).insert(entry).await
    }

    async fn list(&self) -> Result<Vec<GuestbookEntry>> {
        (**self).list().await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        (**self).delete(id).await
    }

    fn backend(&self) -> BackendKind {
        (**self).backend()
    }
}
