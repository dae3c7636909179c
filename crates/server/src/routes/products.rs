//! Public catalog pages: listing, search, and product detail.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use shopkart_core::ProductId;

use crate::filters;
use crate::middleware::FlashMessage;
use crate::middleware::flash;
use crate::models::product::{ALL_CATEGORIES, CATEGORIES};
use crate::models::{Product, SearchFilter};
use crate::state::AppState;

/// A product as rendered by the catalog templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub description: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct CatalogTemplate {
    pub products: Vec<ProductView>,
    pub categories: &'static [&'static str],
    pub search_term: String,
    pub selected_category: String,
    pub min_price: String,
    pub max_price: String,
    pub flash: Option<FlashMessage>,
}

impl CatalogTemplate {
    /// Whether a category option should render as selected.
    fn is_selected(&self, category: &str) -> bool {
        self.selected_category == category
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductPageTemplate {
    pub product: ProductView,
    pub has_image: bool,
}

/// Raw search query parameters, named as the catalog form submits them.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
}

/// GET /products - full catalog listing.
pub async fn index(State(state): State<AppState>, session: Session) -> CatalogTemplate {
    let flash = flash::take(&session).await;
    CatalogTemplate {
        products: load_all(&state).await,
        categories: CATEGORIES,
        search_term: String::new(),
        selected_category: ALL_CATEGORIES.to_owned(),
        min_price: String::new(),
        max_price: String::new(),
        flash,
    }
}

/// GET /products/search - conjunctive filtered listing.
///
/// An empty filter renders the full listing; an inverted price range
/// renders an empty one. Raw inputs are echoed back into the form.
pub async fn search(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> CatalogTemplate {
    let flash = flash::take(&session).await;

    let filter = SearchFilter::from_query(
        query.search_term.as_deref(),
        query.category.as_deref(),
        query.min_price.as_deref(),
        query.max_price.as_deref(),
    );

    let products = if filter.is_empty() {
        load_all(&state).await
    } else {
        match state.catalog().search_products(&filter).await {
            Ok(products) => products.iter().map(ProductView::from).collect(),
            Err(e) => {
                tracing::error!(error = %e, "product search failed");
                Vec::new()
            }
        }
    };

    CatalogTemplate {
        products,
        categories: CATEGORIES,
        search_term: query.search_term.unwrap_or_default(),
        selected_category: query
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| ALL_CATEGORIES.to_owned()),
        min_price: query.min_price.unwrap_or_default(),
        max_price: query.max_price.unwrap_or_default(),
        flash,
    }
}

/// GET /products/{id} - product detail page.
///
/// Malformed and unknown ids both redirect back to the listing.
pub async fn show(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let Ok(id) = ProductId::parse(&raw_id) else {
        tracing::warn!(id = raw_id, "rejected malformed product id");
        return Redirect::to("/products").into_response();
    };

    match state.catalog().product_by_id(&id).await {
        Ok(Some(product)) => {
            let has_image = state.images().exists(&product.id).await;
            ProductPageTemplate {
                product: ProductView::from(&product),
                has_image,
            }
            .into_response()
        }
        Ok(None) => {
            tracing::warn!(product_id = %id, "product not found");
            Redirect::to("/products").into_response()
        }
        Err(e) => {
            tracing::error!(product_id = %id, error = %e, "failed to fetch product");
            Redirect::to("/products").into_response()
        }
    }
}

/// Fetch all products, degrading to an empty listing on failure.
async fn load_all(state: &AppState) -> Vec<ProductView> {
    match state.catalog().all_products().await {
        Ok(products) => products.iter().map(ProductView::from).collect(),
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch products");
            Vec::new()
        }
    }
}
