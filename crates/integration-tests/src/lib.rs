//! Integration test helpers for the Shopkart catalog.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p shopkart-cli -- migrate
//!
//! # Start the server
//! cargo run -p shopkart-server
//!
//! # Run integration tests
//! cargo test -p shopkart-integration-tests -- --ignored
//! ```
//!
//! All tests talk to a running server over HTTP; nothing is mocked.
//! The base URL defaults to `http://localhost:3000` and can be
//! overridden with `SHOPKART_BASE_URL`.

use reqwest::Client;

/// Base URL for the catalog server (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SHOPKART_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A client with a cookie store, following redirects.
///
/// Cookies carry the session so flash messages survive the redirect
/// into the next page load.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A client that does not follow redirects, for asserting on the
/// redirect responses themselves.
#[must_use]
pub fn no_redirect_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique product id for this test run.
#[must_use]
pub fn unique_product_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}

/// A unique email address for this test run.
#[must_use]
pub fn unique_email() -> String {
    format!("integration-test-{}@example.com", uuid::Uuid::new_v4())
}

/// Create a product through the admin form (no image).
///
/// # Panics
///
/// Panics if the request fails or the server rejects the product.
pub async fn create_product(client: &Client, id: &str, name: &str, category: &str, price: &str) {
    let form = reqwest::multipart::Form::new()
        .text("id", id.to_string())
        .text("name", name.to_string())
        .text("category", category.to_string())
        .text("price", price.to_string())
        .text("description", "created by integration tests");

    let resp = client
        .post(format!("{}/admin/products/new", base_url()))
        .multipart(form)
        .send()
        .await
        .expect("Failed to create product");

    assert!(
        resp.status().is_success() || resp.status().is_redirection(),
        "Product creation failed: {}",
        resp.status()
    );
}

/// Delete a product through the admin endpoint. Best effort cleanup.
pub async fn delete_product(client: &Client, id: &str) {
    let _ = client
        .post(format!("{}/admin/products/{id}/delete", base_url()))
        .send()
        .await;
}
