use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, TimeZone, Utc};
use quicknotes::api::{self, AppState};
use quicknotes_core::{Database, ManualClock, Note, NoteService, SqliteNoteStore};
use serde_json::{json, Value};

fn setup_server() -> (TestServer, Arc<ManualClock>) {
    let db = Database::open_in_memory().expect("Failed to create test database");
    db.migrate().expect("Failed to create schema");
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    ));
    let store = SqliteNoteStore::with_clock(db, clock.clone());
    let app = api::router(AppState::new(NoteService::new(store)));
    (TestServer::new(app).unwrap(), clock)
}

async fn create(server: &TestServer, body: Value) -> Note {
    let response = server.post("/notes/").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Note>()
}

fn detail(response: &axum_test::TestResponse) -> String {
    response.json::<Value>()["detail"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn root_reports_server_status() {
    let (server, _clock) = setup_server();

    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "Server work" }));
}

#[tokio::test]
async fn create_returns_full_note_shape() {
    let (server, _clock) = setup_server();

    let response = server
        .post("/notes/")
        .json(&json!({ "title": "Test note", "content": "Body of the test note." }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert!(body["id"].is_i64());
    assert_eq!(body["title"], "Test note");
    assert_eq!(body["content"], "Body of the test note.");
    assert!(body["created_at"].is_string());
    assert_eq!(body["created_at"], body["updated_at"]);
}

#[tokio::test]
async fn create_without_title_is_unprocessable() {
    let (server, _clock) = setup_server();

    let response = server
        .post("/notes/")
        .json(&json!({ "content": "No title here." }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(detail(&response).contains("title"));

    let empty = server.post("/notes/").json(&json!({ "title": "" })).await;
    empty.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let listed = server.get("/notes/").await.json::<Vec<Note>>();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn create_accepts_whitespace_title() {
    let (server, _clock) = setup_server();

    let note = create(&server, json!({ "title": "   " })).await;
    assert_eq!(note.title, "   ");
}

#[tokio::test]
async fn malformed_bodies_are_unprocessable() {
    let (server, _clock) = setup_server();

    let not_json = server.post("/notes/").text("{title").await;
    not_json.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let wrong_type = server.post("/notes/").json(&json!({ "title": 7 })).await;
    wrong_type.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn list_uses_defaults_and_paginates() {
    let (server, _clock) = setup_server();
    for i in 1..=3 {
        create(&server, json!({ "title": format!("Test Note {i}") })).await;
    }

    let all = server.get("/notes/").await;
    all.assert_status_ok();
    let titles: Vec<String> = all
        .json::<Vec<Note>>()
        .into_iter()
        .map(|note| note.title)
        .collect();
    assert_eq!(titles, vec!["Test Note 1", "Test Note 2", "Test Note 3"]);

    let page = server
        .get("/notes/")
        .add_query_param("skip", 1)
        .add_query_param("limit", 1)
        .await;
    page.assert_status_ok();
    let notes = page.json::<Vec<Note>>();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Test Note 2");

    let no_slash = server.get("/notes").await;
    no_slash.assert_status_ok();
    assert_eq!(no_slash.json::<Vec<Note>>().len(), 3);
}

#[tokio::test]
async fn list_with_huge_skip_is_an_empty_page() {
    let (server, _clock) = setup_server();
    create(&server, json!({ "title": "Only one" })).await;

    let response = server
        .get("/notes/")
        .add_query_param("skip", 4_294_967_296_i64)
        .await;
    response.assert_status_ok();
    assert!(response.json::<Vec<Note>>().is_empty());
}

#[tokio::test]
async fn list_rejects_out_of_range_params() {
    let (server, _clock) = setup_server();

    for (skip, limit) in [("-1", "10"), ("0", "0"), ("0", "101"), ("zero", "10")] {
        let response = server
            .get("/notes/")
            .add_query_param("skip", skip)
            .add_query_param("limit", limit)
            .await;
        assert_eq!(
            response.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "skip={skip} limit={limit}"
        );
    }
}

#[tokio::test]
async fn get_by_id_matches_created_note() {
    let (server, _clock) = setup_server();
    let created = create(
        &server,
        json!({ "title": "Fetch me", "content": "Fetched content" }),
    )
    .await;

    let response = server.get(&format!("/notes/{}", created.id)).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Note>(), created);
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let (server, _clock) = setup_server();
    let expected = "Note with id 99999 not found";

    let get = server.get("/notes/99999").await;
    get.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(detail(&get), expected);

    let put = server
        .put("/notes/99999")
        .json(&json!({ "title": "New title" }))
        .await;
    put.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(detail(&put), expected);

    let delete = server.delete("/notes/99999").await;
    delete.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(detail(&delete), expected);
}

#[tokio::test]
async fn non_numeric_id_is_unprocessable() {
    let (server, _clock) = setup_server();

    let response = server.get("/notes/abc").await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn update_title_only_keeps_content() {
    let (server, clock) = setup_server();
    let created = create(
        &server,
        json!({ "title": "Old title", "content": "Old content" }),
    )
    .await;

    clock.advance(Duration::seconds(30));
    let response = server
        .put(&format!("/notes/{}", created.id))
        .json(&json!({ "title": "New title" }))
        .await;

    response.assert_status_ok();
    let updated = response.json::<Note>();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "New title");
    assert_eq!(updated.content.as_deref(), Some("Old content"));
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.updated_at, created.updated_at + Duration::seconds(30));
}

#[tokio::test]
async fn update_content_only_keeps_title() {
    let (server, clock) = setup_server();
    let created = create(
        &server,
        json!({ "title": "Old title", "content": "Old content" }),
    )
    .await;

    clock.advance(Duration::seconds(1));
    let response = server
        .put(&format!("/notes/{}", created.id))
        .json(&json!({ "content": "New content" }))
        .await;

    response.assert_status_ok();
    let updated = response.json::<Note>();
    assert_eq!(updated.title, "Old title");
    assert_eq!(updated.content.as_deref(), Some("New content"));
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn update_without_fields_is_unprocessable() {
    let (server, _clock) = setup_server();
    let created = create(&server, json!({ "title": "Old", "content": "Old" })).await;
    let path = format!("/notes/{}", created.id);

    let nulls = server
        .put(&path)
        .json(&json!({ "title": null, "content": null }))
        .await;
    nulls.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let empty = server.put(&path).json(&json!({})).await;
    empty.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let null_and_missing = server.put(&path).json(&json!({ "content": null })).await;
    null_and_missing.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let unchanged = server.get(&path).await.json::<Note>();
    assert_eq!(unchanged, created);
}

#[tokio::test]
async fn update_with_null_beside_a_value_leaves_the_null_field_alone() {
    let (server, clock) = setup_server();
    let created = create(&server, json!({ "title": "Old", "content": "Old" })).await;
    let path = format!("/notes/{}", created.id);

    clock.advance(Duration::seconds(1));
    let response = server
        .put(&path)
        .json(&json!({ "title": null, "content": "new" }))
        .await;

    response.assert_status_ok();
    let updated = response.json::<Note>();
    assert_eq!(updated.title, "Old");
    assert_eq!(updated.content.as_deref(), Some("new"));

    let response = server
        .put(&path)
        .json(&json!({ "title": "Fine", "content": null }))
        .await;

    response.assert_status_ok();
    let updated = response.json::<Note>();
    assert_eq!(updated.title, "Fine");
    assert_eq!(updated.content.as_deref(), Some("new"));
}

#[tokio::test]
async fn delete_returns_no_content_then_not_found() {
    let (server, _clock) = setup_server();
    let created = create(&server, json!({ "title": "Delete me" })).await;
    let path = format!("/notes/{}", created.id);

    server.get(&path).await.assert_status_ok();

    let response = server.delete(&path).await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());

    server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn note_lifecycle() {
    let (server, clock) = setup_server();

    let created = server.post("/notes/").json(&json!({ "title": "A" })).await;
    created.assert_status(StatusCode::CREATED);
    let body = created.json::<Value>();
    assert_eq!(body["content"], Value::Null);
    let note: Note = serde_json::from_value(body).unwrap();
    let path = format!("/notes/{}", note.id);

    assert_eq!(server.get(&path).await.json::<Note>(), note);

    clock.advance(Duration::seconds(1));
    let updated = server.put(&path).json(&json!({ "content": "B" })).await;
    updated.assert_status_ok();
    let updated = updated.json::<Note>();
    assert_eq!(updated.title, "A");
    assert_eq!(updated.content.as_deref(), Some("B"));
    assert!(updated.updated_at > note.updated_at);

    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
}
