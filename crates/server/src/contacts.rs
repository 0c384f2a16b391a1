//! Contact routes over the in-memory contact store.
//!
//! Endpoints:
//! - `POST   /contacts`            — create
//! - `GET    /contacts/{id}`       — fetch by id
//! - `GET    /contacts/search?name=` — substring search over names
//! - `PUT    /contacts/{id}`       — replace
//! - `DELETE /contacts/{id}`       — remove

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use satchel_core::domain::contact::validate_fields;
use satchel_core::Contact;
use satchel_store::ContactStore;

use crate::error::ApiError;

#[derive(Clone)]
pub struct ContactsState {
    contacts: Arc<ContactStore>,
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: String,
}

pub fn router(contacts: Arc<ContactStore>) -> Router {
    Router::new()
        .route("/contacts", post(create_contact))
        .route("/contacts/search", get(search_contacts))
        .route(
            "/contacts/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .with_state(ContactsState { contacts })
}

pub async fn create_contact(
    State(state): State<ContactsState>,
    Json(request): Json<ContactRequest>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    validate_fields(&request.name, &request.email)?;

    let contact = state.contacts.create(request.name, request.email);
    info!(event_name = "api.contacts.created", id = contact.id, "contact created");
    Ok((StatusCode::CREATED, Json(contact)))
}

pub async fn get_contact(
    State(state): State<ContactsState>,
    Path(id): Path<u32>,
) -> Result<Json<Contact>, ApiError> {
    state
        .contacts
        .get(id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("contact `{id}` not found")))
}

pub async fn search_contacts(
    State(state): State<ContactsState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Contact>> {
    Json(state.contacts.search(&params.name))
}

pub async fn update_contact(
    State(state): State<ContactsState>,
    Path(id): Path<u32>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<Contact>, ApiError> {
    validate_fields(&request.name, &request.email)?;

    let contact = state.contacts.update(id, request.name, request.email)?;
    info!(event_name = "api.contacts.updated", id = contact.id, "contact updated");
    Ok(Json(contact))
}

pub async fn delete_contact(
    State(state): State<ContactsState>,
    Path(id): Path<u32>,
) -> Result<StatusCode, ApiError> {
    state.contacts.delete(id)?;
    info!(event_name = "api.contacts.deleted", id, "contact deleted");
    Ok(StatusCode::NO_CONTENT)
}
