//! Common types used throughout the guestbook.
//!
//! Both the node and the client speak in terms of these types, so the
//! validation rules for a new entry live here rather than in either of them.

mod entry;
mod validation;

pub use entry::{EntryId, GuestbookEntry};
pub use validation::{
    CreateEntryRequest, NewEntry, ValidationError, MAX_MESSAGE_LENGTH, MAX_NAME_LENGTH,
};
