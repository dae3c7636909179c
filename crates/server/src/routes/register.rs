//! Customer registration.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use shopkart_core::Email;

use crate::db::RepositoryError;
use crate::error::AppError;
use crate::filters;
use crate::middleware::FlashMessage;
use crate::middleware::flash;
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub email: String,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
}

/// GET /register - empty registration form.
pub async fn form() -> RegisterTemplate {
    RegisterTemplate {
        email: String::new(),
        error: None,
    }
}

/// POST /register - create the customer with its user, ROLE_USER
/// authority, and empty cart in one transaction.
///
/// Validation failures and duplicate emails re-render the form with
/// the submitted value; success redirects to the catalog with a flash.
///
/// # Errors
///
/// Returns [`AppError`] on repository failures other than a duplicate
/// registration.
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(e) => {
            return Ok(RegisterTemplate {
                email: form.email,
                error: Some(e.to_string()),
            }
            .into_response());
        }
    };

    // Friendly pre-check; the unique constraint on users.email is the
    // real guard against a concurrent registration.
    if state.customers().customer_by_email(&email).await?.is_some() {
        return Ok(already_registered(form.email));
    }

    match state.customers().add_customer(&email).await {
        Ok(customer) => {
            tracing::info!(customer_id = %customer.id, "customer registered");
            flash::set(&session, FlashMessage::success("Welcome! Your account is ready.")).await;
            Ok(Redirect::to("/products").into_response())
        }
        Err(RepositoryError::Conflict(_)) => Ok(already_registered(form.email)),
        Err(e) => Err(e.into()),
    }
}

fn already_registered(email: String) -> Response {
    RegisterTemplate {
        email,
        error: Some("This email address is already registered".to_owned()),
    }
    .into_response()
}
