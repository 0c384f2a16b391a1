//! Job-application tracker routes.
//!
//! Endpoints:
//! - `POST /applications`      — create (id and date_applied are assigned)
//! - `GET  /applications`      — list
//! - `GET  /applications/{id}` — fetch by id

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use satchel_core::domain::application::validate_fields;
use satchel_core::{ApplicationStatus, JobApplication};
use satchel_store::ApplicationStore;

use crate::error::ApiError;

#[derive(Clone)]
pub struct ApplicationsState {
    applications: Arc<ApplicationStore>,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationRequest {
    pub company: String,
    pub title: String,
    #[serde(default)]
    pub status: ApplicationStatus,
}

pub fn router(applications: Arc<ApplicationStore>) -> Router {
    Router::new()
        .route("/applications", get(list_applications).post(create_application))
        .route("/applications/{id}", get(get_application))
        .with_state(ApplicationsState { applications })
}

pub async fn create_application(
    State(state): State<ApplicationsState>,
    Json(request): Json<ApplicationRequest>,
) -> Result<(StatusCode, Json<JobApplication>), ApiError> {
    validate_fields(&request.company, &request.title)?;

    let application =
        state.applications.create(request.company, request.title, request.status);

    info!(
        event_name = "api.applications.created",
        id = application.id,
        company = %application.company,
        "application created"
    );
    Ok((StatusCode::CREATED, Json(application)))
}

pub async fn list_applications(
    State(state): State<ApplicationsState>,
) -> Json<Vec<JobApplication>> {
    Json(state.applications.list())
}

pub async fn get_application(
    State(state): State<ApplicationsState>,
    Path(id): Path<u32>,
) -> Result<Json<JobApplication>, ApiError> {
    state
        .applications
        .get(id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("application `{id}` not found")))
}
