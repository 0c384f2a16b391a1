use std::path::PathBuf;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use satchel_core::Catalog;

#[derive(Clone)]
pub struct HealthState {
    catalog: Arc<Catalog>,
    data_dir: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub catalog: HealthCheck,
    pub storage: HealthCheck,
    pub checked_at: String,
}

pub fn router(catalog: Arc<Catalog>, data_dir: PathBuf) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { catalog, data_dir })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let catalog = catalog_check(&state.catalog);
    let storage = storage_check(&state.data_dir);
    let ready = catalog.status == "ready" && storage.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        catalog,
        storage,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn catalog_check(catalog: &Catalog) -> HealthCheck {
    if catalog.is_empty() {
        HealthCheck { status: "degraded", detail: "catalog holds no products".to_string() }
    } else {
        HealthCheck {
            status: "ready",
            detail: format!("catalog holds {} products", catalog.len()),
        }
    }
}

fn storage_check(data_dir: &std::path::Path) -> HealthCheck {
    match std::fs::metadata(data_dir) {
        Ok(metadata) if metadata.is_dir() => HealthCheck {
            status: "ready",
            detail: format!("data directory `{}` is available", data_dir.display()),
        },
        Ok(_) => HealthCheck {
            status: "degraded",
            detail: format!("`{}` exists but is not a directory", data_dir.display()),
        },
        Err(error) => HealthCheck {
            status: "degraded",
            detail: format!("data directory `{}` is unavailable: {error}", data_dir.display()),
        },
    }
}
