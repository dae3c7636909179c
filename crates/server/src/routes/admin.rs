//! Admin pages: product CRUD with image upload, customer listing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    body::Bytes,
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use shopkart_core::{Price, ProductId};

use crate::db::RepositoryError;
use crate::error::AppError;
use crate::filters;
use crate::middleware::FlashMessage;
use crate::middleware::flash;
use crate::models::product::{CATEGORIES, DEFAULT_CATEGORY};
use crate::models::{Customer, Product, ProductInput};
use crate::services::images::ImageStore;
use crate::state::AppState;

/// Raw product form fields, echoed back verbatim on validation errors.
#[derive(Debug, Clone, Default)]
pub struct ProductFormData {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub description: String,
}

impl ProductFormData {
    /// An empty form with the default category pre-selected.
    fn empty() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_owned(),
            ..Self::default()
        }
    }

    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
        }
    }

    /// Validate the raw fields into a [`ProductInput`].
    ///
    /// # Errors
    ///
    /// Returns a user-facing message for the first failing field.
    fn validate(&self) -> Result<ProductInput, String> {
        let id = ProductId::parse(&self.id).map_err(|e| format!("Product id: {e}"))?;

        let name = self.name.trim();
        if name.is_empty() {
            return Err("Product name is required".to_owned());
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err("Category is required".to_owned());
        }

        let price = Price::parse(&self.price).map_err(|e| format!("Price: {e}"))?;

        Ok(ProductInput {
            id,
            name: name.to_owned(),
            category: category.to_owned(),
            price,
            description: self.description.trim().to_owned(),
        })
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/add_product.html")]
pub struct AddProductTemplate {
    pub form: ProductFormData,
    pub categories: &'static [&'static str],
    pub error: Option<String>,
}

impl AddProductTemplate {
    /// Whether a category option should render as selected.
    fn is_selected(&self, category: &str) -> bool {
        self.form.category == category
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/edit_product.html")]
pub struct EditProductTemplate {
    pub form: ProductFormData,
    pub categories: &'static [&'static str],
    pub error: Option<String>,
}

impl EditProductTemplate {
    fn is_selected(&self, category: &str) -> bool {
        self.form.category == category
    }
}

/// A customer row as rendered by the admin listing.
pub struct CustomerView {
    pub id: i32,
    pub email: String,
    pub enabled: bool,
    pub cart_id: i32,
}

impl From<&Customer> for CustomerView {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.as_i32(),
            email: customer.user.email.to_string(),
            enabled: customer.user.enabled,
            cart_id: customer.cart.id.as_i32(),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/customers.html")]
pub struct CustomersTemplate {
    pub customers: Vec<CustomerView>,
}

/// GET /admin/products/new - empty add-product form.
pub async fn new_product_form() -> AddProductTemplate {
    AddProductTemplate {
        form: ProductFormData::empty(),
        categories: CATEGORIES,
        error: None,
    }
}

/// An uploaded image part, held in memory until the row is saved.
struct ImageUpload {
    content_type: Option<String>,
    bytes: Bytes,
}

/// POST /admin/products/new - create a product from a multipart form.
///
/// The row is inserted first; the image (when present) is validated
/// and written afterwards. An image failure keeps the already-saved
/// row and reports the partial outcome in the flash.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] for malformed multipart bodies.
pub async fn create_product(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let (form, image) = read_product_form(&mut multipart).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(message) => return Ok(add_form_error(form, message)),
    };

    match state.catalog().add_product(&input).await {
        Ok(_) => {}
        Err(RepositoryError::Conflict(_)) => {
            return Ok(add_form_error(
                form,
                "A product with this id already exists".to_owned(),
            ));
        }
        Err(e) => {
            tracing::error!(product_id = %input.id, error = %e, "failed to add product");
            flash::set(&session, FlashMessage::error("Failed to add product")).await;
            return Ok(Redirect::to("/products").into_response());
        }
    }

    if let Some(upload) = image {
        if let Err(e) = ImageStore::validate(upload.content_type.as_deref(), upload.bytes.len()) {
            flash::set(
                &session,
                FlashMessage::error(format!("Product saved, but the image was rejected: {e}")),
            )
            .await;
            return Ok(Redirect::to("/products").into_response());
        }

        if let Err(e) = state.images().save(&input.id, &upload.bytes).await {
            tracing::error!(product_id = %input.id, error = %e, "failed to store product image");
            flash::set(
                &session,
                FlashMessage::error("Product saved, but storing the image failed"),
            )
            .await;
            return Ok(Redirect::to("/products").into_response());
        }
    }

    flash::set(&session, FlashMessage::success("Product added successfully")).await;
    Ok(Redirect::to("/products").into_response())
}

/// GET /admin/products/{id}/edit - edit form pre-filled from the row.
///
/// Malformed and unknown ids redirect back to the listing.
pub async fn edit_product_form(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Response {
    let Ok(id) = ProductId::parse(&raw_id) else {
        tracing::warn!(id = raw_id, "rejected malformed product id");
        return Redirect::to("/products").into_response();
    };

    match state.catalog().product_by_id(&id).await {
        Ok(Some(product)) => EditProductTemplate {
            form: ProductFormData::from_product(&product),
            categories: CATEGORIES,
            error: None,
        }
        .into_response(),
        Ok(None) => {
            tracing::warn!(product_id = %id, "product to edit not found");
            Redirect::to("/products").into_response()
        }
        Err(e) => {
            tracing::error!(product_id = %id, error = %e, "failed to fetch product for edit");
            Redirect::to("/products").into_response()
        }
    }
}

/// Editable product fields. The id comes from the path and the image
/// is untouched by edits.
#[derive(Debug, Deserialize)]
pub struct EditProductForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub description: String,
}

/// POST /admin/products/{id}/edit - full overwrite of an existing row.
///
/// Validation failures redisplay the form; everything else, including
/// the row having disappeared, ends in a flash and a redirect.
pub async fn update_product(
    State(state): State<AppState>,
    session: Session,
    Path(raw_id): Path<String>,
    Form(edit): Form<EditProductForm>,
) -> Response {
    let form = ProductFormData {
        id: raw_id,
        name: edit.name,
        category: edit.category,
        price: edit.price,
        description: edit.description,
    };

    let input = match form.validate() {
        Ok(input) => input,
        Err(message) => {
            return EditProductTemplate {
                form,
                categories: CATEGORIES,
                error: Some(message),
            }
            .into_response();
        }
    };

    match state.catalog().edit_product(&input).await {
        Ok(_) => {
            flash::set(&session, FlashMessage::success("Product updated successfully")).await;
        }
        Err(RepositoryError::NotFound) => {
            flash::set(&session, FlashMessage::error("Product not found")).await;
        }
        Err(e) => {
            tracing::error!(product_id = %input.id, error = %e, "failed to update product");
            flash::set(&session, FlashMessage::error("Failed to update product")).await;
        }
    }
    Redirect::to("/products").into_response()
}

/// POST /admin/products/{id}/delete - remove the image, then the row.
///
/// Image removal is best effort and never blocks the row delete.
/// Deleting a missing row is reported as success.
pub async fn delete_product(
    State(state): State<AppState>,
    session: Session,
    Path(raw_id): Path<String>,
) -> Response {
    let Ok(id) = ProductId::parse(&raw_id) else {
        flash::set(&session, FlashMessage::error("Invalid product id")).await;
        return Redirect::to("/products").into_response();
    };

    if let Err(e) = state.images().remove(&id).await {
        tracing::error!(product_id = %id, error = %e, "failed to remove product image");
    }

    match state.catalog().delete_product(&id).await {
        Ok(_) => {
            flash::set(&session, FlashMessage::success("Product deleted successfully")).await;
        }
        Err(e) => {
            tracing::error!(product_id = %id, error = %e, "failed to delete product");
            flash::set(&session, FlashMessage::error("Failed to delete product")).await;
        }
    }

    Redirect::to("/products").into_response()
}

/// GET /admin/customers - all registered customers.
pub async fn customers(State(state): State<AppState>) -> CustomersTemplate {
    let customers = match state.customers().all_customers().await {
        Ok(customers) => customers.iter().map(CustomerView::from).collect(),
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch customers");
            Vec::new()
        }
    };

    CustomersTemplate { customers }
}

/// Drain the multipart stream into form fields and an optional image.
///
/// Unknown parts are ignored; an empty image part counts as no image.
async fn read_product_form(
    multipart: &mut Multipart,
) -> Result<(ProductFormData, Option<ImageUpload>), AppError> {
    let mut form = ProductFormData::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart request: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "id" => form.id = read_text(field).await?,
            "name" => form.name = read_text(field).await?,
            "category" => form.category = read_text(field).await?,
            "price" => form.price = read_text(field).await?,
            "description" => form.description = read_text(field).await?,
            "image" => {
                let content_type = field.content_type().map(ToOwned::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read image: {e}")))?;
                if !bytes.is_empty() {
                    image = Some(ImageUpload {
                        content_type,
                        bytes,
                    });
                }
            }
            _ => {}
        }
    }

    Ok((form, image))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart field: {e}")))
}

fn add_form_error(form: ProductFormData, message: String) -> Response {
    AddProductTemplate {
        form,
        categories: CATEGORIES,
        error: Some(message),
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProductFormData {
        ProductFormData {
            id: "pixel-9".to_owned(),
            name: "Pixel 9".to_owned(),
            category: "Android".to_owned(),
            price: "799.99".to_owned(),
            description: "  Flagship phone  ".to_owned(),
        }
    }

    #[test]
    fn test_validate_accepts_valid_form() {
        let input = valid_form().validate().expect("valid form");
        assert_eq!(input.id.as_str(), "pixel-9");
        assert_eq!(input.description, "Flagship phone");
    }

    #[test]
    fn test_validate_rejects_blank_id() {
        let mut form = valid_form();
        form.id = "   ".to_owned();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut form = valid_form();
        form.name = String::new();
        assert_eq!(
            form.validate().unwrap_err(),
            "Product name is required"
        );
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let mut form = valid_form();
        form.price = "-1".to_owned();
        assert!(form.validate().unwrap_err().starts_with("Price:"));
    }

    #[test]
    fn test_empty_form_preselects_default_category() {
        let form = ProductFormData::empty();
        assert_eq!(form.category, DEFAULT_CATEGORY);
        assert!(form.id.is_empty());
    }
}
