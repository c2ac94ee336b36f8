//! Plain-text rendering of the guestbook view.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;
use std::time::Instant;

use crate::state::GuestbookState;

/// Shown when the list is empty.
pub const EMPTY_MESSAGE: &str = "No entries yet. Be the first to sign the guestbook!";
/// Shown while the first fetch is outstanding.
pub const LOADING_MESSAGE: &str = "Loading entries...";
/// Shown while the success indicator is visible.
pub const SUCCESS_MESSAGE: &str = "Message posted successfully!";

/// Formats a timestamp as `Oct 16, 2026, 03:04 PM` in the local time zone.
pub fn format_date(created_at: &DateTime<Utc>) -> String {
    format_date_in(created_at, &Local)
}

/// Formats a timestamp as `Oct 16, 2026, 03:04 PM` in `tz`.
pub fn format_date_in<Tz>(created_at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    created_at
        .with_timezone(tz)
        .format("%b %-d, %Y, %I:%M %p")
        .to_string()
}

/// Renders the whole view as text.
pub fn render_view(state: &GuestbookState, now: Instant) -> String {
    render_view_in(state, now, &Local)
}

/// Renders the whole view as text with timestamps in `tz`.
///
/// The success indicator comes first, then any error, then the list.
pub fn render_view_in<Tz>(state: &GuestbookState, now: Instant, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    if state.is_success_visible(now) {
        out.push_str(SUCCESS_MESSAGE);
        out.push('\n');
    }
    if let Some(error) = &state.error {
        out.push_str(&format!("error: {error}\n"));
    }
    out.push_str(&render_list_in(state, tz));
    out
}

/// Renders the entry count and the cached list.
pub fn render_list(state: &GuestbookState) -> String {
    render_list_in(state, &Local)
}

/// Renders the entry count and the cached list with timestamps in `tz`.
pub fn render_list_in<Tz>(state: &GuestbookState, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = format!("{}\n", state.entry_count_label());

    if state.shows_spinner() {
        out.push_str(LOADING_MESSAGE);
        out.push('\n');
        return out;
    }
    if state.entries.is_empty() {
        out.push_str(EMPTY_MESSAGE);
        out.push('\n');
        return out;
    }

    for entry in &state.entries {
        let marker = if state.is_deleting(&entry.id) {
            " [deleting...]"
        } else if state.is_armed(&entry.id) {
            " [confirm delete?]"
        } else {
            ""
        };
        out.push_str(&format!(
            "\n{}  ·  {}  ·  #{}{}\n  {}\n",
            entry.name,
            format_date_in(&entry.created_at, tz),
            entry.id,
            marker,
            entry.message
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use guestbook_types::{EntryId, GuestbookEntry};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, hour, minute, 5).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date_in(&at(15, 4), &Utc), "Oct 16, 2026, 03:04 PM");
        assert_eq!(format_date_in(&at(9, 30), &Utc), "Oct 16, 2026, 09:30 AM");
    }

    #[test]
    fn test_render_loading_and_empty() {
        let mut state = GuestbookState::new();
        let text = render_view_in(&state, Instant::now(), &Utc);
        assert!(text.contains(LOADING_MESSAGE));

        state.finish_fetch(Ok(vec![]));
        let text = render_view_in(&state, Instant::now(), &Utc);
        assert!(text.contains("0 entries"));
        assert!(text.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_render_entries_with_markers() {
        let mut state = GuestbookState::new();
        state.finish_fetch(Ok(vec![
            GuestbookEntry {
                id: EntryId::Int(2),
                name: "Bo".into(),
                message: "Second".into(),
                created_at: at(15, 4),
            },
            GuestbookEntry {
                id: EntryId::Int(1),
                name: "Ana".into(),
                message: "First".into(),
                created_at: at(9, 30),
            },
        ]));
        state.arm_delete(EntryId::Int(1));
        state.error = Some("Entry not found".into());

        let text = render_view_in(&state, Instant::now(), &Utc);
        assert!(text.starts_with("error: Entry not found"));
        assert!(text.contains("2 entries"));
        assert!(text.contains("Bo  ·  Oct 16, 2026, 03:04 PM  ·  #2\n  Second"));
        assert!(text.contains("#1 [confirm delete?]"));
        assert!(text.find("Bo").unwrap() < text.find("Ana").unwrap());
    }

    #[test]
    fn test_success_shown_before_error() {
        let mut state = GuestbookState::new();
        state.name = "Ana".into();
        state.message = "Hi!".into();
        state.begin_submit().unwrap();
        let now = Instant::now();
        state.submit_succeeded(now);
        state.finish_fetch(Err("Failed to fetch entries.".into()));

        let text = render_view_in(&state, now, &Utc);
        let expected = format!("{SUCCESS_MESSAGE}\nerror: Failed to fetch entries.\n");
        assert!(text.starts_with(&expected));
        assert!(!render_list_in(&state, &Utc).contains("error"));
    }
}
