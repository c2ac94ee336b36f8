//! # View State
//!
//! Everything the guestbook view needs to render, plus the transitions the
//! controller applies around each request. Nothing here does I/O, so the
//! interaction rules can be exercised without a node.

use guestbook_types::{EntryId, GuestbookEntry};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// How long the "posted" indicator stays visible after a successful post.
pub const SUCCESS_BANNER_DURATION: Duration = Duration::from_secs(3);

/// Local view of the guestbook.
///
/// `entries` is a cached copy of the node's list and may be stale; it is
/// only replaced by a full re-fetch.
#[derive(Debug, Clone)]
pub struct GuestbookState {
    /// Cached entries, newest first.
    pub entries: Vec<GuestbookEntry>,
    /// Name input.
    pub name: String,
    /// Message input.
    pub message: String,
    /// A list fetch is outstanding (true until the first response).
    pub is_loading: bool,
    /// A create request is outstanding.
    pub is_submitting: bool,
    /// Entries with a delete request outstanding.
    pub deleting: HashSet<EntryId>,
    /// Entry armed for deletion by the first tap.
    pub confirm_delete_id: Option<EntryId>,
    /// Last error to show, if any.
    pub error: Option<String>,
    success_until: Option<Instant>,
}

impl Default for GuestbookState {
    fn default() -> Self {
        Self::new()
    }
}

impl GuestbookState {
    /// Creates the state a freshly mounted view starts with.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            name: String::new(),
            message: String::new(),
            is_loading: true,
            is_submitting: false,
            deleting: HashSet::new(),
            confirm_delete_id: None,
            error: None,
            success_until: None,
        }
    }

    // ==================== Fetching ====================

    /// Marks a list fetch as started.
    pub fn begin_fetch(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Applies a list response. A failure leaves the cache untouched.
    pub fn finish_fetch(&mut self, result: Result<Vec<GuestbookEntry>, String>) {
        match result {
            Ok(entries) => self.entries = entries,
            Err(message) => self.error = Some(message),
        }
        self.is_loading = false;
    }

    /// True while the spinner should replace the (empty) list.
    pub fn shows_spinner(&self) -> bool {
        self.is_loading && self.entries.is_empty()
    }

    // ==================== Submitting ====================

    /// True if the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting && !self.name.trim().is_empty() && !self.message.trim().is_empty()
    }

    /// Starts a submission, returning the trimmed fields to send, or `None`
    /// if the form is not submittable.
    pub fn begin_submit(&mut self) -> Option<(String, String)> {
        if !self.can_submit() {
            return None;
        }
        self.is_submitting = true;
        self.error = None;
        self.success_until = None;
        Some((
            self.name.trim().to_string(),
            self.message.trim().to_string(),
        ))
    }

    /// Records a successful post: clears the form and shows the indicator.
    ///
    /// The submission stays in progress until [`Self::end_submit`], which
    /// the controller calls after re-fetching.
    pub fn submit_succeeded(&mut self, now: Instant) {
        self.name.clear();
        self.message.clear();
        self.success_until = Some(now + SUCCESS_BANNER_DURATION);
    }

    /// Records a failed post. The form keeps its contents.
    pub fn submit_failed(&mut self, message: String) {
        self.error = Some(message);
        self.is_submitting = false;
    }

    /// Ends a submission.
    pub fn end_submit(&mut self) {
        self.is_submitting = false;
    }

    /// True while the "posted" indicator should be shown.
    pub fn is_success_visible(&self, now: Instant) -> bool {
        self.success_until.is_some_and(|until| now < until)
    }

    // ==================== Deleting ====================

    /// First tap: arms deletion of `id`, replacing any other armed entry.
    pub fn arm_delete(&mut self, id: EntryId) {
        self.confirm_delete_id = Some(id);
    }

    /// Cancel: disarms any pending confirmation.
    pub fn disarm_delete(&mut self) {
        self.confirm_delete_id = None;
    }

    /// True if `id` is armed for deletion.
    pub fn is_armed(&self, id: &EntryId) -> bool {
        self.confirm_delete_id.as_ref() == Some(id)
    }

    /// True if a delete for `id` is outstanding.
    pub fn is_deleting(&self, id: &EntryId) -> bool {
        self.deleting.contains(id)
    }

    /// Second tap: starts deleting `id` if it is armed and not already
    /// being deleted. Returns false if the tap should be ignored.
    pub fn begin_delete(&mut self, id: &EntryId) -> bool {
        if !self.is_armed(id) || self.is_deleting(id) {
            return false;
        }
        self.deleting.insert(id.clone());
        self.error = None;
        true
    }

    /// Records a successful delete and disarms the confirmation.
    ///
    /// The entry stays busy until [`Self::end_delete`].
    pub fn delete_succeeded(&mut self, id: &EntryId) {
        if self.is_armed(id) {
            self.confirm_delete_id = None;
        }
    }

    /// Records a failed delete. The cache is left as is.
    pub fn delete_failed(&mut self, id: &EntryId, message: String) {
        self.error = Some(message);
        self.deleting.remove(id);
    }

    /// Ends a delete.
    pub fn end_delete(&mut self, id: &EntryId) {
        self.deleting.remove(id);
    }

    // ==================== Display helpers ====================

    /// "1 entry" or "N entries".
    pub fn entry_count_label(&self) -> String {
        match self.entries.len() {
            1 => "1 entry".to_string(),
            n => format!("{n} entries"),
        }
    }

    /// Finds a cached entry by the raw id a user typed.
    pub fn find_entry(&self, raw: &str) -> Option<&GuestbookEntry> {
        self.entries.iter().find(|e| e.id.matches(raw))
    }
}
