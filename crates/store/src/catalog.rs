use std::fs;
use std::path::Path;

use tracing::{info, warn};

use satchel_core::{Catalog, Product};

use crate::json_file::StoreError;

/// Load the catalog file. Unlike the mutable stores, a missing or corrupt
/// catalog fails startup: the cart cannot operate without reference data.
/// Individually invalid entries are skipped with a warning; only a file
/// that yields zero valid products is fatal.
pub fn load_catalog(path: &Path) -> Result<Catalog, StoreError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| StoreError::Read { path: path.to_path_buf(), source })?;

    let entries: Vec<serde_json::Value> = serde_json::from_str(&raw)
        .map_err(|source| StoreError::Parse { path: path.to_path_buf(), source })?;

    let mut products = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Product>(entry).map_err(|error| error.to_string()) {
            Ok(product) => match product.validate() {
                Ok(()) => products.push(product),
                Err(error) => {
                    warn!(
                        event_name = "store.catalog.invalid_entry",
                        index,
                        error = %error,
                        "skipping invalid catalog entry"
                    );
                }
            },
            Err(error) => {
                warn!(
                    event_name = "store.catalog.invalid_entry",
                    index,
                    error = %error,
                    "skipping malformed catalog entry"
                );
            }
        }
    }

    if products.is_empty() {
        return Err(StoreError::NoValidProducts { path: path.to_path_buf() });
    }

    info!(event_name = "store.catalog.loaded", products = products.len(), "catalog loaded");
    Ok(Catalog::new(products))
}
