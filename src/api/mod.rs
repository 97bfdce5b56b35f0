//! HTTP surface for notes.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use quicknotes_core::{Database, NoteService, ServiceResult, SqliteNoteStore};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

mod error;
mod notes;

pub use error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct AppState {
    notes: Arc<NoteService<SqliteNoteStore>>,
}

impl AppState {
    pub fn new(service: NoteService<SqliteNoteStore>) -> Self {
        Self {
            notes: Arc::new(service),
        }
    }

    /// Runs a service call on the blocking pool; SQLite calls block.
    async fn run<T, F>(&self, op: F) -> ApiResult<T>
    where
        F: FnOnce(&NoteService<SqliteNoteStore>) -> ServiceResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let notes = Arc::clone(&self.notes);
        let result = tokio::task::spawn_blocking(move || op(&notes)).await?;
        Ok(result?)
    }
}

pub fn create_router(db: Database) -> Router {
    router(AppState::new(NoteService::new(SqliteNoteStore::new(db))))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route("/notes/", get(notes::list_notes).post(notes::create_note))
        .route(
            "/notes/{id}",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "Server work" }))
}
