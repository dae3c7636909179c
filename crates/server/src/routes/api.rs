//! JSON API: read-only product listing.

use axum::{Json, extract::State};

use crate::models::Product;
use crate::state::AppState;

/// GET /api/products - all products as a flat JSON array.
///
/// Degrades to an empty array on repository failure, matching the
/// HTML listing.
pub async fn products(State(state): State<AppState>) -> Json<Vec<Product>> {
    match state.catalog().all_products().await {
        Ok(products) => Json(products),
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch products for api");
            Json(Vec::new())
        }
    }
}
