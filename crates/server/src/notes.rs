//! Notes routes, backed by one file per note.
//!
//! Endpoints:
//! - `POST   /notes`      — create
//! - `GET    /notes`      — list
//! - `GET    /notes/{id}` — fetch
//! - `PUT    /notes/{id}` — replace
//! - `DELETE /notes/{id}` — remove

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use satchel_core::domain::note::validate_title;
use satchel_core::Note;
use satchel_store::NoteStore;

use crate::error::ApiError;

#[derive(Clone)]
pub struct NotesState {
    notes: Arc<NoteStore>,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub title: String,
    pub content: String,
}

pub fn router(notes: Arc<NoteStore>) -> Router {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/{id}", get(get_note).put(update_note).delete(delete_note))
        .with_state(NotesState { notes })
}

/// Note ids on the wire are UUIDs we generated; anything else is a plain
/// 404 without touching the filesystem.
fn parse_note_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("note `{raw}` not found")))
}

pub async fn create_note(
    State(state): State<NotesState>,
    Json(request): Json<NoteRequest>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    validate_title(&request.title)?;

    let note = state.notes.create(request.title, request.content)?;
    info!(event_name = "api.notes.created", note_id = %note.id, "note created");
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn get_note(
    State(state): State<NotesState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    let id = parse_note_id(&id)?;
    state
        .notes
        .get(id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("note `{id}` not found")))
}

pub async fn list_notes(State(state): State<NotesState>) -> Json<Vec<Note>> {
    Json(state.notes.list())
}

pub async fn update_note(
    State(state): State<NotesState>,
    Path(id): Path<String>,
    Json(request): Json<NoteRequest>,
) -> Result<Json<Note>, ApiError> {
    let id = parse_note_id(&id)?;
    validate_title(&request.title)?;

    match state.notes.update(id, request.title, request.content)? {
        Some(note) => {
            info!(event_name = "api.notes.updated", note_id = %note.id, "note updated");
            Ok(Json(note))
        }
        None => Err(ApiError::NotFound(format!("note `{id}` not found"))),
    }
}

pub async fn delete_note(
    State(state): State<NotesState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_note_id(&id)?;
    if state.notes.delete(id)? {
        info!(event_name = "api.notes.deleted", note_id = %id, "note deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("note `{id}` not found")))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::Json;
    use satchel_store::NoteStore;
    use tempfile::TempDir;

    use crate::error::ApiError;

    use super::{create_note, delete_note, get_note, update_note, NoteRequest, NotesState};

    fn state(dir: &TempDir) -> NotesState {
        NotesState { notes: Arc::new(NoteStore::new(dir.path().join("notes"))) }
    }

    fn request(title: &str, content: &str) -> NoteRequest {
        NoteRequest { title: title.to_string(), content: content.to_string() }
    }

    #[tokio::test]
    async fn create_then_fetch_round_trips() {
        let dir = TempDir::new().expect("tempdir");
        let state = state(&dir);

        let (status, Json(note)) =
            create_note(State(state.clone()), Json(request("groceries", "milk")))
                .await
                .expect("create");
        assert_eq!(status, StatusCode::CREATED);

        let fetched = get_note(State(state), Path(note.id.to_string())).await.expect("get").0;
        assert_eq!(fetched, note);
    }

    #[tokio::test]
    async fn blank_title_is_unprocessable() {
        let dir = TempDir::new().expect("tempdir");

        let error = create_note(State(state(&dir)), Json(request(" ", "body")))
            .await
            .expect_err("blank title");
        assert!(matches!(error, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn malformed_id_reads_as_not_found() {
        let dir = TempDir::new().expect("tempdir");

        let error = get_note(State(state(&dir)), Path("../escape".to_string()))
            .await
            .expect_err("malformed id");
        assert!(matches!(error, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_and_delete_miss_for_unknown_note() {
        let dir = TempDir::new().expect("tempdir");
        let state = state(&dir);
        let ghost = uuid::Uuid::new_v4().to_string();

        let error = update_note(
            State(state.clone()),
            Path(ghost.clone()),
            Json(request("t", "c")),
        )
        .await
        .expect_err("missing note");
        assert!(matches!(error, ApiError::NotFound(_)));

        let error = delete_note(State(state), Path(ghost)).await.expect_err("missing note");
        assert!(matches!(error, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_the_note() {
        let dir = TempDir::new().expect("tempdir");
        let state = state(&dir);

        let (_, Json(note)) = create_note(State(state.clone()), Json(request("t", "c")))
            .await
            .expect("create");

        let status = delete_note(State(state.clone()), Path(note.id.to_string()))
            .await
            .expect("delete");
        assert_eq!(status, StatusCode::NO_CONTENT);

        let error = get_note(State(state), Path(note.id.to_string()))
            .await
            .expect_err("deleted note");
        assert!(matches!(error, ApiError::NotFound(_)));
    }
}
