//! Customer service: pass-through over the customer repository.

use sqlx::PgPool;

use shopkart_core::Email;

use crate::db::{CustomerRepository, RepositoryError};
use crate::models::Customer;

/// Customer operations exposed to the web layer.
#[derive(Clone)]
pub struct CustomerService {
    pool: PgPool,
}

impl CustomerService {
    /// Create a new customer service.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a customer (user + authority + cart, one transaction).
    ///
    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository, including
    /// `Conflict` for an already-registered email.
    pub async fn add_customer(&self, email: &Email) -> Result<Customer, RepositoryError> {
        CustomerRepository::new(&self.pool).create(email).await
    }

    /// List all customers.
    ///
    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn all_customers(&self) -> Result<Vec<Customer>, RepositoryError> {
        CustomerRepository::new(&self.pool).list_all().await
    }

    /// Look up a customer by email; `Ok(None)` when missing.
    ///
    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn customer_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Customer>, RepositoryError> {
        CustomerRepository::new(&self.pool).get_by_email(email).await
    }
}
