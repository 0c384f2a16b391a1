use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tracing::info;

use satchel_core::config::{AppConfig, ConfigError, LoadOptions};
use satchel_core::Catalog;
use satchel_store::{
    load_catalog, ApplicationStore, CartStore, ContactStore, NoteStore, StoreError, StudentStore,
    StoragePaths,
};

/// Everything the server needs, built once at startup. The stores are the
/// explicit state objects handlers receive; nothing global, nothing
/// mutable outside them.
pub struct Application {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
    pub cart: Arc<CartStore>,
    pub students: Arc<StudentStore>,
    pub applications: Arc<ApplicationStore>,
    pub notes: Arc<NoteStore>,
    pub contacts: Arc<ContactStore>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("catalog load failed: {0}")]
    Catalog(#[source] StoreError),
    #[error("notes directory init failed: {0}")]
    NotesDir(#[source] StoreError),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

/// The catalog is required reference data: a missing, corrupt, or empty
/// catalog fails startup. The mutable stores fall back to empty state on
/// their own, so they cannot fail here.
pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");

    let paths = StoragePaths::new(&config.storage.data_dir);

    let catalog = load_catalog(&paths.products).map_err(BootstrapError::Catalog)?;

    let cart = CartStore::open(paths.cart);
    let students = StudentStore::open(paths.students);
    let applications = ApplicationStore::open(paths.applications);
    let notes = NoteStore::new(paths.notes_dir);
    notes.ensure_dir().map_err(BootstrapError::NotesDir)?;
    let contacts = ContactStore::new();

    info!(
        event_name = "system.bootstrap.stores_ready",
        products = catalog.len(),
        cart_lines = cart.len(),
        students = students.len(),
        applications = applications.len(),
        "stores loaded"
    );

    Ok(Application {
        config,
        catalog: Arc::new(catalog),
        cart: Arc::new(cart),
        students: Arc::new(students),
        applications: Arc::new(applications),
        notes: Arc::new(notes),
        contacts: Arc::new(contacts),
    })
}

impl Application {
    /// One router per service, merged into the single HTTP surface.
    pub fn router(&self) -> Router {
        Router::new()
            .merge(crate::shop::router(self.catalog.clone(), self.cart.clone()))
            .merge(crate::students::router(self.students.clone()))
            .merge(crate::applications::router(self.applications.clone()))
            .merge(crate::notes::router(self.notes.clone()))
            .merge(crate::contacts::router(self.contacts.clone()))
            .merge(crate::health::router(
                self.catalog.clone(),
                self.config.storage.data_dir.clone(),
            ))
    }
}
