//! Customer repository for database operations.
//!
//! Customer creation writes the user, its `ROLE_USER` authority, the
//! customer row, and an empty cart in one transaction, so partial
//! creation cannot be observed.

use sqlx::PgPool;

use shopkart_core::{CartId, CustomerId, Email, Role};

use super::RepositoryError;
use crate::models::{Cart, Customer, User};

/// Internal row type for customer queries (customer joined with its
/// user and cart).
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i32,
    email: String,
    enabled: bool,
    cart_id: i32,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: CustomerId::new(row.id),
            user: User {
                email,
                enabled: row.enabled,
            },
            cart: Cart {
                id: CartId::new(row.cart_id),
            },
        })
    }
}

const CUSTOMER_SELECT: &str = "SELECT c.id, u.email, u.enabled, k.id AS cart_id
     FROM customer c
     JOIN users u ON u.email = c.user_email
     JOIN cart k ON k.customer_id = c.id";

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a customer with its user, `ROLE_USER` authority, and an
    /// empty cart, all in one transaction.
    ///
    /// The user is marked enabled as part of creation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already
    /// registered. Returns `RepositoryError::Database` for other
    /// database errors; the transaction rolls back in full.
    pub async fn create(&self, email: &Email) -> Result<Customer, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO users (email, enabled) VALUES ($1, TRUE)")
            .bind(email.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict("email already registered".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        sqlx::query("INSERT INTO authorities (email, authority) VALUES ($1, $2)")
            .bind(email.as_str())
            .bind(Role::User.as_str())
            .execute(&mut *tx)
            .await?;

        let customer_id: i32 =
            sqlx::query_scalar("INSERT INTO customer (user_email) VALUES ($1) RETURNING id")
                .bind(email.as_str())
                .fetch_one(&mut *tx)
                .await?;

        let cart_id: i32 =
            sqlx::query_scalar("INSERT INTO cart (customer_id) VALUES ($1) RETURNING id")
                .bind(customer_id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        tracing::info!(email = %email, customer_id, "customer added");

        Ok(Customer {
            id: CustomerId::new(customer_id),
            user: User {
                email: email.clone(),
                enabled: true,
            },
            cart: Cart {
                id: CartId::new(cart_id),
            },
        })
    }

    /// List all customers with their user and cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            "{CUSTOMER_SELECT} ORDER BY c.created_at"
        ))
        .fetch_all(self.pool)
        .await?;

        tracing::debug!(count = rows.len(), "retrieved customers");
        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Look up a customer by its user's email address.
    ///
    /// `Ok(None)` when either the user or its customer row is missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "{CUSTOMER_SELECT} WHERE u.email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        if row.is_none() {
            tracing::debug!(email = %email, "customer not found");
        }

        row.map(TryInto::try_into).transpose()
    }
}
