use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::warn;

use satchel_core::{price_lines, CartLine, Catalog, CheckoutSummary, DomainError, ProductId};

use crate::json_file;

/// The active shopping cart: one line per product, keyed by the product id
/// in string form (the on-disk key format), guarded by a mutex so
/// concurrent requests serialize instead of racing.
///
/// Persistence is synchronous on every mutation. A failed write is logged
/// and swallowed: in-memory state stays authoritative and disk may lag
/// behind until the next successful write.
pub struct CartStore {
    path: PathBuf,
    lines: Mutex<BTreeMap<String, CartLine>>,
}

impl CartStore {
    /// Open the cart file, falling back to an empty cart if it is missing
    /// or corrupt.
    pub fn open(path: PathBuf) -> Self {
        let lines = json_file::read_json_or_empty(&path, "cart");
        Self { path, lines: Mutex::new(lines) }
    }

    /// Merge `quantity` of a catalog product into the cart and persist.
    /// Fails without touching the cart when the product is not in the
    /// catalog.
    pub fn add(
        &self,
        product_id: ProductId,
        quantity: u32,
        catalog: &Catalog,
    ) -> Result<CartLine, DomainError> {
        let product = catalog
            .find(product_id)
            .ok_or_else(|| DomainError::not_found("product", product_id.to_string()))?;

        let mut lines = self.lock();
        let line = lines
            .entry(product_id.to_string())
            .and_modify(|line| {
                line.quantity = line.quantity.saturating_add(quantity);
                line.last_updated = Utc::now();
            })
            .or_insert_with(|| CartLine {
                product_id,
                quantity,
                name: product.name.clone(),
                price: product.price,
                last_updated: Utc::now(),
            })
            .clone();

        self.persist(&lines);
        Ok(line)
    }

    /// Price the cart against the catalog without mutating it. Lines whose
    /// product has left the catalog are skipped and logged.
    pub fn checkout(&self, catalog: &Catalog) -> CheckoutSummary {
        let lines = self.lock();
        let (summary, stale) = price_lines(lines.values(), catalog);
        for product_id in stale {
            warn!(
                event_name = "store.cart.stale_line",
                product_id = %product_id,
                "skipping cart line; product no longer in catalog"
            );
        }
        summary
    }

    /// Empty the cart and persist the empty state.
    pub fn clear(&self) {
        let mut lines = self.lock();
        lines.clear();
        self.persist(&lines);
    }

    /// Cart contents as the on-disk map shape.
    pub fn lines_map(&self) -> BTreeMap<String, CartLine> {
        self.lock().clone()
    }

    /// Cart contents as a list.
    pub fn lines(&self) -> Vec<CartLine> {
        self.lock().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, CartLine>> {
        // A poisoned lock means a panic mid-operation; the map itself is
        // still usable.
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, lines: &BTreeMap<String, CartLine>) {
        if let Err(error) = json_file::write_json_atomic(&self.path, lines) {
            warn!(
                event_name = "store.cart.persist_failed",
                error = %error,
                "cart state not persisted; disk is behind memory"
            );
        }
    }
}
