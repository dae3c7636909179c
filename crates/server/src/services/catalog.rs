//! Catalog service: pass-through over the product repository.

use sqlx::PgPool;

use shopkart_core::ProductId;

use crate::db::{ProductRepository, RepositoryError};
use crate::models::{Product, ProductInput, SearchFilter};

/// Product operations exposed to the web layer.
///
/// Each method delegates to [`ProductRepository`] over the shared
/// pool; single queries carry their own implicit transaction.
#[derive(Clone)]
pub struct CatalogService {
    pool: PgPool,
}

impl CatalogService {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all products.
    ///
    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn all_products(&self) -> Result<Vec<Product>, RepositoryError> {
        ProductRepository::new(&self.pool).list_all().await
    }

    /// Get a product by id; `Ok(None)` when missing.
    ///
    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn product_by_id(
        &self,
        id: &ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        ProductRepository::new(&self.pool).get_by_id(id).await
    }

    /// Persist a new product.
    ///
    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn add_product(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        ProductRepository::new(&self.pool).create(input).await
    }

    /// Fully overwrite an existing product.
    ///
    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn edit_product(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        ProductRepository::new(&self.pool).update(input).await
    }

    /// Delete a product; missing rows are a no-op returning `false`.
    ///
    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn delete_product(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        ProductRepository::new(&self.pool).delete(id).await
    }

    /// Search products with the composed filter.
    ///
    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn search_products(
        &self,
        filter: &SearchFilter,
    ) -> Result<Vec<Product>, RepositoryError> {
        ProductRepository::new(&self.pool).search(filter).await
    }
}
