use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use quicknotes_core::{CreateNoteInput, ListNotesQuery, Note, NoteId, UpdateNoteInput};

use super::{ApiResult, AppState};

// POST /notes/
pub async fn create_note(
    State(state): State<AppState>,
    body: Result<Json<CreateNoteInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let Json(input) = body?;
    let note = state.run(move |notes| notes.create(input)).await?;
    tracing::info!(note_id = note.id, "created note");
    Ok((StatusCode::CREATED, Json(note)))
}

// GET /notes/?skip=&limit=
pub async fn list_notes(
    State(state): State<AppState>,
    query: Result<Query<ListNotesQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Note>>> {
    let Query(query) = query?;
    let notes = state.run(move |notes| notes.list(query)).await?;
    Ok(Json(notes))
}

// GET /notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    id: Result<Path<NoteId>, PathRejection>,
) -> ApiResult<Json<Note>> {
    let Path(id) = id?;
    let note = state.run(move |notes| notes.get(id)).await?;
    Ok(Json(note))
}

// PUT /notes/{id}
pub async fn update_note(
    State(state): State<AppState>,
    id: Result<Path<NoteId>, PathRejection>,
    body: Result<Json<UpdateNoteInput>, JsonRejection>,
) -> ApiResult<Json<Note>> {
    let Path(id) = id?;
    let Json(input) = body?;
    let note = state.run(move |notes| notes.update(id, input)).await?;
    tracing::info!(note_id = id, "updated note");
    Ok(Json(note))
}

// DELETE /notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    id: Result<Path<NoteId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.run(move |notes| notes.delete(id)).await?;
    tracing::info!(note_id = id, "deleted note");
    Ok(StatusCode::NO_CONTENT)
}
