//! HTTP route handlers for the catalog.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Redirect to the catalog
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (verifies DB)
//!
//! # Catalog (public)
//! GET  /products                      - Product listing
//! GET  /products/search               - Filtered listing
//!                                       (?searchTerm=&category=&minPrice=&maxPrice=)
//! GET  /products/{id}                 - Product detail (bad/unknown id
//!                                       redirects to the listing)
//! GET  /api/products                  - Product listing as a JSON array
//! GET  /images/{id}.jpg               - Uploaded product images (static)
//!
//! # Registration
//! GET  /register                      - Registration form
//! POST /register                      - Create customer (+ user, cart,
//!                                       ROLE_USER authority, one transaction)
//!
//! # Admin
//! GET  /admin/products/new            - Empty add-product form
//! POST /admin/products/new            - Create product (multipart, optional image)
//! GET  /admin/products/{id}/edit      - Edit form
//! POST /admin/products/{id}/edit      - Full overwrite (image untouched)
//! POST /admin/products/{id}/delete    - Delete image (best effort), then row.
//!                                       POST on purpose: the destructive
//!                                       delete must not be reachable from a
//!                                       plain link or prefetch.
//! GET  /admin/customers               - Customer listing
//! ```

pub mod admin;
pub mod api;
pub mod products;
pub mod register;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    response::Redirect,
    routing::{get, post},
};

use crate::services::images::MAX_IMAGE_BYTES;
use crate::state::AppState;

/// Create the public product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/search", get(products::search))
        .route("/{id}", get(products::show))
}

/// Create the admin routes router.
///
/// Uploads are capped at the transport layer to the image ceiling.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products/new",
            get(admin::new_product_form).post(admin::create_product),
        )
        .route(
            "/products/{id}/edit",
            get(admin::edit_product_form).post(admin::update_product),
        )
        .route("/products/{id}/delete", post(admin::delete_product))
        .route("/customers", get(admin::customers))
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/products", get(api::products))
}

/// Create all routes for the catalog server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/products") }))
        .nest("/products", product_routes())
        .nest("/admin", admin_routes())
        .nest("/api", api_routes())
        .route("/register", get(register::form).post(register::submit))
}
