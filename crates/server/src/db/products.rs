//! Product repository for database operations.
//!
//! Queries use the runtime-checked sqlx API; each method issues one
//! query against the shared pool.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use shopkart_core::{Price, ProductId};

use super::RepositoryError;
use crate::models::{Product, ProductInput, SearchFilter};

const PRODUCT_COLUMNS: &str = "id, name, category, price, description, created_at, updated_at";

/// Internal row type for `PostgreSQL` product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    category: String,
    price: Decimal,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let id = ProductId::parse(&row.id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid product id in database: {e}"))
        })?;

        let price = Price::new(row.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Self {
            id,
            name: row.name,
            category: row.category,
            price,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product ORDER BY created_at"
        ))
        .fetch_all(self.pool)
        .await?;

        tracing::debug!(count = rows.len(), "retrieved products");
        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a product by its id.
    ///
    /// `Ok(None)` is the not-found signal, distinct from `Err`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        if row.is_none() {
            tracing::debug!(product_id = %id, "product not found");
        }

        row.map(TryInto::try_into).transpose()
    }

    /// Persist a new product row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO product (id, name, category, price, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(input.id.as_str())
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.price.as_decimal())
        .bind(&input.description)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("product id already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        tracing::info!(product_id = %input.id, "product added");
        row.try_into()
    }

    /// Full-record overwrite keyed by id. The image file is untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE product
             SET name = $2, category = $3, price = $4, description = $5, updated_at = NOW()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(input.id.as_str())
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.price.as_decimal())
        .bind(&input.description)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        tracing::info!(product_id = %input.id, "product updated");
        row.try_into()
    }

    /// Delete a product row.
    ///
    /// A missing row is a logged no-op, not an error. Returns whether
    /// a row was actually deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::warn!(product_id = %id, "product not found for deletion");
            return Ok(false);
        }

        tracing::info!(product_id = %id, "product deleted");
        Ok(true)
    }

    /// Search products with conjunctive optional predicates.
    ///
    /// No predicates is equivalent to [`Self::list_all`]. An inverted
    /// price range returns an empty result without querying.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn search(&self, filter: &SearchFilter) -> Result<Vec<Product>, RepositoryError> {
        if filter.is_unsatisfiable() {
            tracing::warn!(?filter, "inverted price range, returning empty result");
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE TRUE"
        ));

        if let Some(term) = &filter.term {
            query.push(" AND name ILIKE ");
            query.push_bind(format!("%{term}%"));
        }

        if let Some(category) = &filter.category {
            query.push(" AND category = ");
            query.push_bind(category.as_str());
        }

        if let Some(min_price) = filter.min_price {
            query.push(" AND price >= ");
            query.push_bind(min_price);
        }

        if let Some(max_price) = filter.max_price {
            query.push(" AND price <= ");
            query.push_bind(max_price);
        }

        query.push(" ORDER BY created_at");

        let rows = query
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool)
            .await?;

        tracing::debug!(count = rows.len(), ?filter, "search completed");
        rows.into_iter().map(TryInto::try_into).collect()
    }
}
