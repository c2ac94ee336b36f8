//! Interaction tests for the guestbook controller against a mocked node.

use guestbook_client::api::INVALID_RESPONSE_MESSAGE;
use guestbook_client::{Guestbook, GuestbookClient};
use guestbook_types::EntryId;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn entry(id: i64, name: &str, message: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "message": message,
        "created_at": format!("2026-10-16T15:04:{:02}Z", id % 60),
    })
}

async fn mock_list(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/guestbook"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn guestbook(server: &MockServer) -> Guestbook {
    Guestbook::new(GuestbookClient::new(server.uri()).unwrap())
}

#[tokio::test]
async fn test_mount_loads_entries() {
    let server = MockServer::start().await;
    mock_list(&server, json!([entry(2, "Bo", "Second"), entry(1, "Ana", "First")])).await;

    let gb = guestbook(&server);
    assert!(gb.snapshot().is_loading);

    gb.mount().await;

    let state = gb.snapshot();
    assert!(!state.is_loading);
    assert!(state.error.is_none());
    assert_eq!(state.entries.len(), 2);
    assert_eq!(state.entries[0].name, "Bo");
}

#[tokio::test]
async fn test_submit_clears_form_and_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/guestbook"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/guestbook"))
        .respond_with(ResponseTemplate::new(201).set_body_json(entry(7, "Ana", "Hi!")))
        .expect(1)
        .mount(&server)
        .await;
    mock_list(&server, json!([entry(7, "Ana", "Hi!")])).await;

    let gb = guestbook(&server);
    gb.mount().await;
    assert!(gb.snapshot().entries.is_empty());

    gb.set_name("  Ana ");
    gb.set_message("Hi!");
    assert!(gb.submit().await);

    let state = gb.snapshot();
    assert!(state.name.is_empty());
    assert!(state.message.is_empty());
    assert!(!state.is_submitting);
    assert!(gb.is_success_visible());
    assert_eq!(state.entries.len(), 1);
    assert_eq!(state.entries[0].id, EntryId::Int(7));
}

#[tokio::test]
async fn test_submit_succeeds_when_refetch_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/guestbook"))
        .respond_with(ResponseTemplate::new(201).set_body_json(entry(7, "Ana", "Hi!")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/guestbook"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"error": "Failed to fetch guestbook entries"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gb = guestbook(&server);
    gb.set_name("Ana");
    gb.set_message("Hi!");
    assert!(gb.submit().await);

    let state = gb.snapshot();
    assert!(gb.is_success_visible());
    assert!(state.name.is_empty());
    assert!(state.message.is_empty());
    assert!(!state.is_submitting);
    assert_eq!(
        state.error.as_deref(),
        Some("Failed to fetch guestbook entries")
    );
}

#[tokio::test]
async fn test_blank_form_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/guestbook"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let gb = guestbook(&server);
    gb.set_name("Ana");
    gb.set_message("   ");
    assert!(!gb.submit().await);
    assert!(!gb.snapshot().is_submitting);
}

#[tokio::test]
async fn test_failed_submit_keeps_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/guestbook"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "Message must be 500 characters or less"})),
        )
        .mount(&server)
        .await;

    let gb = guestbook(&server);
    gb.set_name("Ana");
    gb.set_message("Hi!");
    assert!(!gb.submit().await);

    let state = gb.snapshot();
    assert_eq!(state.name, "Ana");
    assert_eq!(state.message, "Hi!");
    assert!(!state.is_submitting);
    assert_eq!(
        state.error.as_deref(),
        Some("Message must be 500 characters or less")
    );
    assert!(!gb.is_success_visible());
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let server = MockServer::start().await;
    mock_list(&server, json!([entry(1, "Ana", "First")])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/guestbook"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    let gb = guestbook(&server);
    gb.mount().await;

    let id = EntryId::Int(1);
    assert!(!gb.confirm_delete(&id).await);

    gb.request_delete(id.clone());
    gb.cancel_delete();
    assert!(!gb.confirm_delete(&id).await);
    assert_eq!(gb.snapshot().entries.len(), 1);
}

#[tokio::test]
async fn test_confirmed_delete_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/guestbook"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([entry(2, "Bo", "Second"), entry(1, "Ana", "First")])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/guestbook"))
        .and(query_param("id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    mock_list(&server, json!([entry(1, "Ana", "First")])).await;

    let gb = guestbook(&server);
    gb.mount().await;

    let id = EntryId::Int(2);
    gb.request_delete(id.clone());
    assert!(gb.confirm_delete(&id).await);

    let state = gb.snapshot();
    assert!(state.confirm_delete_id.is_none());
    assert!(!state.is_deleting(&id));
    assert_eq!(state.entries.len(), 1);
    assert_eq!(state.entries[0].id, EntryId::Int(1));
}

#[tokio::test]
async fn test_failed_delete_keeps_cache() {
    let server = MockServer::start().await;
    mock_list(&server, json!([entry(1, "Ana", "First")])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/guestbook"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Entry not found"})))
        .mount(&server)
        .await;

    let gb = guestbook(&server);
    gb.mount().await;

    let id = EntryId::Int(1);
    gb.request_delete(id.clone());
    assert!(!gb.confirm_delete(&id).await);

    let state = gb.snapshot();
    assert_eq!(state.error.as_deref(), Some("Entry not found"));
    assert_eq!(state.entries.len(), 1);
    assert!(!state.is_deleting(&id));
}

#[tokio::test]
async fn test_last_response_wins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/guestbook"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([entry(1, "Slow", "A")]))
                .set_delay(Duration::from_millis(500)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mock_list(&server, json!([entry(2, "Fast", "B")])).await;

    let gb = guestbook(&server);

    let slow = {
        let gb = gb.clone();
        tokio::spawn(async move { gb.refresh().await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    gb.refresh().await;
    assert_eq!(gb.snapshot().entries[0].name, "Fast");

    slow.await.unwrap();
    assert_eq!(gb.snapshot().entries[0].name, "Slow");
}

#[tokio::test]
async fn test_non_json_response_reports_configuration_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/guestbook"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<!doctype html>", "text/html"))
        .mount(&server)
        .await;

    let gb = guestbook(&server);
    gb.mount().await;

    let state = gb.snapshot();
    assert!(!state.is_loading);
    assert!(state.entries.is_empty());
    assert_eq!(state.error.as_deref(), Some(INVALID_RESPONSE_MESSAGE));
}
