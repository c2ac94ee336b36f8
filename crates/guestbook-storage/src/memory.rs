//! In-memory entry store for demo mode.

use crate::{BackendKind, EntryStore, Result, StorageError};
use async_trait::async_trait;
use chrono::Utc;
use guestbook_types::{EntryId, GuestbookEntry, NewEntry};
use parking_lot::RwLock;
use uuid::Uuid;

/// Id of the entry a seeded store starts with.
pub const WELCOME_ENTRY_ID: &str = "demo-1";

const WELCOME_NAME: &str = "Demo User";
const WELCOME_MESSAGE: &str =
    "Welcome to the guestbook! Configure a database for persistent storage.";

/// Process-local entry store.
///
/// Entries are kept newest first. Every mutation holds the write lock, so
/// concurrent creates and deletes are serialized within one process. The
/// data is lost on restart and is not shared between instances.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Vec<GuestbookEntry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the demo welcome entry.
    pub fn with_welcome_entry() -> Self {
        let welcome = GuestbookEntry {
            id: EntryId::from(WELCOME_ENTRY_ID),
            name: WELCOME_NAME.to_string(),
            message: WELCOME_MESSAGE.to_string(),
            created_at: Utc::now(),
        };
        Self {
            entries: RwLock::new(vec![welcome]),
        }
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Inserts a fully formed entry at the position its timestamp dictates.
    ///
    /// Among equal timestamps the newly inserted entry goes first.
    fn insert_ordered(&self, entry: GuestbookEntry) {
        let mut entries = self.entries.write();
        let pos = entries
            .iter()
            .position(|e| e.created_at <= entry.created_at)
            .unwrap_or(entries.len());
        entries.insert(pos, entry);
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn insert(&self, entry: NewEntry) -> Result<GuestbookEntry> {
        let (name, message) = entry.into_parts();
        let entry = GuestbookEntry {
            id: EntryId::Text(format!("demo-{}", Uuid::new_v4())),
            name,
            message,
            created_at: Utc::now(),
        };
        self.insert_ordered(entry.clone());
        tracing::debug!(id = %entry.id, "Stored entry in memory");
        Ok(entry)
    }

    async fn list(&self) -> Result<Vec<GuestbookEntry>> {
        Ok(self.entries.read().clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut entries = self.entries.write();
        let index = entries
            .iter()
            .position(|e| e.id.matches(id))
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        entries.remove(index);
        Ok(())
    }

    fn backend(&self) -> BackendKind {
        BackendKind::Memory
    }
}
