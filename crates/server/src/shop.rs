//! Shopping routes: the product catalog and the active cart.
//!
//! Endpoints:
//! - `GET    /products`      — list catalog products
//! - `POST   /cart/add`      — add a product to the cart (query params)
//! - `GET    /cart`          — cart contents as a map keyed by product id
//! - `GET    /cart/items`    — cart contents as a list
//! - `GET    /cart/checkout` — price the cart, then clear it
//! - `DELETE /cart`          — empty the cart

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use satchel_core::{CartLine, Catalog, LineSnapshot, Product, ProductId};
use satchel_store::CartStore;

use crate::error::ApiError;

#[derive(Clone)]
pub struct ShopState {
    catalog: Arc<Catalog>,
    cart: Arc<CartStore>,
}

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AddToCartParams {
    pub product_id: u32,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Serialize)]
pub struct CartOperationResponse {
    pub message: String,
    pub action: &'static str,
    pub current_quantity: u32,
    pub product_id: u32,
    pub product_name: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub total_cost: Decimal,
    pub items: Vec<LineSnapshot>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router(catalog: Arc<Catalog>, cart: Arc<CartStore>) -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/cart/add", post(add_to_cart))
        .route("/cart", get(view_cart).delete(empty_cart))
        .route("/cart/items", get(view_cart_items))
        .route("/cart/checkout", get(checkout))
        .with_state(ShopState { catalog, cart })
}

pub async fn list_products(State(state): State<ShopState>) -> Json<Vec<Product>> {
    Json(state.catalog.products().cloned().collect())
}

pub async fn add_to_cart(
    State(state): State<ShopState>,
    Query(params): Query<AddToCartParams>,
) -> Result<Json<CartOperationResponse>, ApiError> {
    if params.product_id == 0 {
        return Err(ApiError::Validation("product_id must be a positive integer".to_string()));
    }
    if params.quantity == 0 {
        return Err(ApiError::Validation("quantity must be a positive integer".to_string()));
    }

    let line =
        state.cart.add(ProductId(params.product_id), params.quantity, &state.catalog)?;

    let action = if line.quantity > params.quantity { "updated" } else { "added" };
    info!(
        event_name = "api.cart.add",
        product_id = params.product_id,
        quantity = params.quantity,
        total_quantity = line.quantity,
        action,
        "cart line merged"
    );

    Ok(Json(CartOperationResponse {
        message: format!("Product {} {action} to cart", params.product_id),
        action,
        current_quantity: line.quantity,
        product_id: params.product_id,
        product_name: line.name,
    }))
}

pub async fn view_cart(State(state): State<ShopState>) -> Json<BTreeMap<String, CartLine>> {
    Json(state.cart.lines_map())
}

pub async fn view_cart_items(State(state): State<ShopState>) -> Json<Vec<CartLine>> {
    Json(state.cart.lines())
}

/// Price the cart and clear it. The two steps are not atomic; a crash in
/// between leaves a priced-but-uncleared cart.
pub async fn checkout(
    State(state): State<ShopState>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    if state.cart.is_empty() {
        warn!(event_name = "api.cart.empty_checkout", "checkout attempted on an empty cart");
        return Err(ApiError::BadRequest("cannot checkout an empty cart".to_string()));
    }

    let summary = state.cart.checkout(&state.catalog);
    state.cart.clear();

    info!(
        event_name = "api.cart.checkout",
        total = %summary.total,
        items = summary.items.len(),
        "cart checked out and cleared"
    );
    Ok(Json(CheckoutResponse { total_cost: summary.total, items: summary.items }))
}

pub async fn empty_cart(State(state): State<ShopState>) -> StatusCode {
    state.cart.clear();
    info!(event_name = "api.cart.cleared", "cart emptied");
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::{Query, State};
    use rust_decimal::Decimal;
    use satchel_core::{Catalog, Product, ProductId};
    use satchel_store::CartStore;
    use tempfile::TempDir;

    use crate::error::ApiError;

    use super::{add_to_cart, checkout, empty_cart, AddToCartParams, ShopState};

    fn state(dir: &TempDir) -> ShopState {
        let catalog = Catalog::new(vec![
            Product { id: ProductId(1), name: "Pen".to_string(), price: Decimal::new(150, 2) },
            Product { id: ProductId(2), name: "Pad".to_string(), price: Decimal::new(475, 2) },
        ]);
        ShopState {
            catalog: Arc::new(catalog),
            cart: Arc::new(CartStore::open(dir.path().join("cart.json"))),
        }
    }

    fn add_params(product_id: u32, quantity: u32) -> Query<AddToCartParams> {
        Query(AddToCartParams { product_id, quantity })
    }

    #[tokio::test]
    async fn add_reports_added_then_updated() {
        let dir = TempDir::new().expect("tempdir");
        let state = state(&dir);

        let first = add_to_cart(State(state.clone()), add_params(1, 2))
            .await
            .expect("first add")
            .0;
        assert_eq!(first.action, "added");
        assert_eq!(first.current_quantity, 2);

        let second = add_to_cart(State(state), add_params(1, 3)).await.expect("second add").0;
        assert_eq!(second.action, "updated");
        assert_eq!(second.current_quantity, 5);
    }

    #[tokio::test]
    async fn add_rejects_unknown_product() {
        let dir = TempDir::new().expect("tempdir");
        let state = state(&dir);

        let error = add_to_cart(State(state.clone()), add_params(99, 1))
            .await
            .expect_err("unknown product");
        assert!(matches!(error, ApiError::NotFound(_)));
        assert!(state.cart.is_empty());
    }

    #[tokio::test]
    async fn add_rejects_zero_quantity() {
        let dir = TempDir::new().expect("tempdir");
        let state = state(&dir);

        let error =
            add_to_cart(State(state), add_params(1, 0)).await.expect_err("zero quantity");
        assert!(matches!(error, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn checkout_prices_then_clears() {
        let dir = TempDir::new().expect("tempdir");
        let state = state(&dir);

        add_to_cart(State(state.clone()), add_params(1, 2)).await.expect("add pen");
        add_to_cart(State(state.clone()), add_params(2, 1)).await.expect("add pad");

        let response = checkout(State(state.clone())).await.expect("checkout").0;

        assert_eq!(response.total_cost, Decimal::new(775, 2));
        assert_eq!(response.items.len(), 2);
        assert!(state.cart.is_empty(), "checkout clears the cart");
    }

    #[tokio::test]
    async fn checkout_on_empty_cart_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let state = state(&dir);

        let error = checkout(State(state)).await.expect_err("empty cart");
        assert!(matches!(error, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn delete_empties_the_cart() {
        let dir = TempDir::new().expect("tempdir");
        let state = state(&dir);

        add_to_cart(State(state.clone()), add_params(1, 1)).await.expect("add");
        let status = empty_cart(State(state.clone())).await;

        assert_eq!(status, axum::http::StatusCode::NO_CONTENT);
        assert!(state.cart.is_empty());
    }
}
