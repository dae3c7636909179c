//! Customer, user, and cart domain types.

use shopkart_core::{CartId, CustomerId, Email};

/// A login identity, keyed by email address.
#[derive(Debug, Clone)]
pub struct User {
    /// Email address (primary key of the users table).
    pub email: Email,
    /// Whether the account is enabled. Set at registration.
    pub enabled: bool,
}

/// A shopping cart, owned by exactly one customer.
///
/// Created empty alongside its customer; cart contents are out of
/// scope for the catalog.
#[derive(Debug, Clone, Copy)]
pub struct Cart {
    pub id: CartId,
}

/// A registered customer.
///
/// Invariant: every customer wraps exactly one [`User`] and owns
/// exactly one [`Cart`], created together in one transaction.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub user: User,
    pub cart: Cart,
}
