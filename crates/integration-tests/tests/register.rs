//! Integration tests for customer registration.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The catalog server running (cargo run -p shopkart-server)
//!
//! Run with: cargo test -p shopkart-integration-tests -- --ignored

use reqwest::StatusCode;

use shopkart_integration_tests::{base_url, client, no_redirect_client, unique_email};

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_register_form_renders() {
    let client = client();
    let resp = client
        .get(format!("{}/register", base_url()))
        .send()
        .await
        .expect("Failed to fetch register form");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("name=\"email\""));
}

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_register_new_customer() {
    let client = no_redirect_client();
    let base_url = base_url();
    let email = unique_email();

    let resp = client
        .post(format!("{base_url}/register"))
        .form(&[("email", email.as_str())])
        .send()
        .await
        .expect("Failed to register");

    // Success redirects to the catalog
    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/products");

    // The customer appears in the admin listing with a cart
    let body = client
        .get(format!("{base_url}/admin/customers"))
        .send()
        .await
        .expect("Failed to fetch customers")
        .text()
        .await
        .expect("Failed to read body");
    assert!(body.contains(&email));
}

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_register_duplicate_email_redisplays_form() {
    let client = client();
    let base_url = base_url();
    let email = unique_email();

    let resp = client
        .post(format!("{base_url}/register"))
        .form(&[("email", email.as_str())])
        .send()
        .await
        .expect("Failed to register");
    assert!(resp.status().is_success());

    // Same email again re-renders the form with an error, no redirect
    let resp = client
        .post(format!("{base_url}/register"))
        .form(&[("email", email.as_str())])
        .send()
        .await
        .expect("Failed to register twice");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("already registered"));
}

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_register_invalid_email_redisplays_form() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/register"))
        .form(&[("email", "not-an-email")])
        .send()
        .await
        .expect("Failed to submit form");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("must contain an @ symbol"));
    // The submitted value is echoed back into the form
    assert!(body.contains("not-an-email"));
}
