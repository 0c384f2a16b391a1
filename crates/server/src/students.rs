//! Student record routes.
//!
//! Endpoints:
//! - `POST   /students`        — create (409 on duplicate name)
//! - `GET    /students`        — list
//! - `GET    /students/{name}` — fetch by name (case-insensitive)
//! - `PUT    /students/{name}` — replace (400 on path/payload name mismatch)
//! - `DELETE /students/{name}` — remove

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use satchel_core::Student;
use satchel_store::StudentStore;

use crate::error::ApiError;

#[derive(Clone)]
pub struct StudentsState {
    students: Arc<StudentStore>,
}

#[derive(Debug, Deserialize)]
pub struct StudentRequest {
    pub name: String,
    pub subject_scores: BTreeMap<String, f64>,
}

pub fn router(students: Arc<StudentStore>) -> Router {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{name}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .with_state(StudentsState { students })
}

pub async fn create_student(
    State(state): State<StudentsState>,
    Json(request): Json<StudentRequest>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let student = Student::from_scores(request.name, request.subject_scores)?;
    let created = state.students.create(student)?;

    info!(event_name = "api.students.created", student = %created.name, "student created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_student(
    State(state): State<StudentsState>,
    Path(name): Path<String>,
) -> Result<Json<Student>, ApiError> {
    state
        .students
        .get(&name)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("student `{}` not found", name.to_lowercase())))
}

pub async fn list_students(State(state): State<StudentsState>) -> Json<Vec<Student>> {
    Json(state.students.list())
}

pub async fn update_student(
    State(state): State<StudentsState>,
    Path(name): Path<String>,
    Json(request): Json<StudentRequest>,
) -> Result<Json<Student>, ApiError> {
    if request.name.to_lowercase() != name.to_lowercase() {
        return Err(ApiError::BadRequest("name mismatch".to_string()));
    }

    let student = Student::from_scores(request.name, request.subject_scores)?;
    let updated = state.students.update(&name, student)?;

    info!(event_name = "api.students.updated", student = %updated.name, "student updated");
    Ok(Json(updated))
}

pub async fn delete_student(
    State(state): State<StudentsState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.students.delete(&name)?;
    info!(event_name = "api.students.deleted", student = %name, "student deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::Json;
    use satchel_store::StudentStore;
    use tempfile::TempDir;

    use crate::error::ApiError;

    use super::{
        create_student, delete_student, get_student, update_student, StudentRequest, StudentsState,
    };

    fn state(dir: &TempDir) -> StudentsState {
        StudentsState { students: Arc::new(StudentStore::open(dir.path().join("students.json"))) }
    }

    fn request(name: &str, score: f64) -> StudentRequest {
        StudentRequest {
            name: name.to_string(),
            subject_scores: BTreeMap::from([("math".to_string(), score)]),
        }
    }

    #[tokio::test]
    async fn create_derives_grade_and_returns_201() {
        let dir = TempDir::new().expect("tempdir");

        let (status, Json(student)) =
            create_student(State(state(&dir)), Json(request("Ada", 92.0)))
                .await
                .expect("create");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(student.grade, "A");
        assert_eq!(student.average, 92.0);
    }

    #[tokio::test]
    async fn duplicate_create_conflicts() {
        let dir = TempDir::new().expect("tempdir");
        let state = state(&dir);

        create_student(State(state.clone()), Json(request("Ada", 92.0))).await.expect("create");
        let error = create_student(State(state), Json(request("ada", 50.0)))
            .await
            .expect_err("duplicate");

        assert!(matches!(error, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn invalid_score_is_unprocessable() {
        let dir = TempDir::new().expect("tempdir");

        let error = create_student(State(state(&dir)), Json(request("Ada", 120.0)))
            .await
            .expect_err("invalid score");
        assert!(matches!(error, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn update_rejects_name_mismatch() {
        let dir = TempDir::new().expect("tempdir");
        let state = state(&dir);

        create_student(State(state.clone()), Json(request("Ada", 90.0))).await.expect("create");
        let error = update_student(
            State(state),
            Path("ada".to_string()),
            Json(request("Grace", 90.0)),
        )
        .await
        .expect_err("mismatch");

        assert!(matches!(error, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn get_and_delete_miss_for_unknown_student() {
        let dir = TempDir::new().expect("tempdir");
        let state = state(&dir);

        let error = get_student(State(state.clone()), Path("nobody".to_string()))
            .await
            .expect_err("missing");
        assert!(matches!(error, ApiError::NotFound(_)));

        let error = delete_student(State(state), Path("nobody".to_string()))
            .await
            .expect_err("missing");
        assert!(matches!(error, ApiError::NotFound(_)));
    }
}
