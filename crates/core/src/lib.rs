//! Shared domain types for Shopkart.
//!
//! This crate contains the validated value types used across the
//! workspace: product identifiers, email addresses, prices, serial
//! entity IDs, and authority roles. Enable the `postgres` feature to
//! get sqlx `Type`/`Encode`/`Decode` implementations for all of them.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::email::{Email, EmailError};
pub use types::id::{CartId, CustomerId};
pub use types::price::{Price, PriceError};
pub use types::product_id::{ProductId, ProductIdError};
pub use types::role::Role;
