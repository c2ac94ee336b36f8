//! # Guestbook Controller
//!
//! Drives a [`GuestbookState`] with requests to the node.
//!
//! All methods take `&self`, so interactions can overlap the way they do in
//! a UI: a refresh started while another is in flight is neither coalesced
//! nor cancelled, and whichever response arrives last overwrites the cache.
//! Mutations never patch the cache locally; they re-fetch the full list.

use guestbook_types::EntryId;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

use crate::api::GuestbookClient;
use crate::state::GuestbookState;

/// Guestbook view controller.
#[derive(Clone)]
pub struct Guestbook {
    client: GuestbookClient,
    state: Arc<Mutex<GuestbookState>>,
}

impl Guestbook {
    /// Creates a controller with a fresh (loading) view state.
    pub fn new(client: GuestbookClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(GuestbookState::new())),
        }
    }

    /// Returns a copy of the current view state.
    #[must_use]
    pub fn snapshot(&self) -> GuestbookState {
        self.state.lock().clone()
    }

    /// True while the "posted" indicator should be shown.
    #[must_use]
    pub fn is_success_visible(&self) -> bool {
        self.state.lock().is_success_visible(Instant::now())
    }

    /// Initial fetch when the view is first shown.
    pub async fn mount(&self) {
        self.refresh().await;
    }

    /// Re-fetches the full list.
    pub async fn refresh(&self) {
        self.state.lock().begin_fetch();
        let result = self
            .client
            .list_entries()
            .await
            .map_err(|e| e.to_string());
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Failed to fetch guestbook entries");
        }
        self.state.lock().finish_fetch(result);
    }

    /// Updates the name input.
    pub fn set_name(&self, name: impl Into<String>) {
        self.state.lock().name = name.into();
    }

    /// Updates the message input.
    pub fn set_message(&self, message: impl Into<String>) {
        self.state.lock().message = message.into();
    }

    /// Posts the current form.
    ///
    /// Returns false without sending anything if a field is blank or a
    /// post is already outstanding. On success the form is cleared, the
    /// indicator is shown, and the list is re-fetched.
    pub async fn submit(&self) -> bool {
        let Some((name, message)) = self.state.lock().begin_submit() else {
            return false;
        };

        match self.client.create_entry(&name, &message).await {
            Ok(entry) => {
                tracing::info!(id = %entry.id, "Signed the guestbook");
                self.state.lock().submit_succeeded(Instant::now());
                self.refresh().await;
                self.state.lock().end_submit();
                true
            }
            Err(e) => {
                self.state.lock().submit_failed(e.to_string());
                false
            }
        }
    }

    /// First tap on an entry's delete control.
    pub fn request_delete(&self, id: EntryId) {
        self.state.lock().arm_delete(id);
    }

    /// Cancels a pending delete confirmation.
    pub fn cancel_delete(&self) {
        self.state.lock().disarm_delete();
    }

    /// Second tap: deletes `id` if it is the armed entry.
    ///
    /// Returns true if the entry was deleted. On failure the error is
    /// surfaced and the cached list is left as it was.
    pub async fn confirm_delete(&self, id: &EntryId) -> bool {
        if !self.state.lock().begin_delete(id) {
            return false;
        }

        match self.client.delete_entry(id).await {
            Ok(()) => {
                tracing::info!(id = %id, "Deleted guestbook entry");
                self.state.lock().delete_succeeded(id);
                self.refresh().await;
                self.state.lock().end_delete(id);
                true
            }
            Err(e) => {
                self.state.lock().delete_failed(id, e.to_string());
                false
            }
        }
    }
}
