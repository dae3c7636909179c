//! Domain models.
//!
//! These types represent validated domain objects separate from
//! database row types.

pub mod customer;
pub mod product;

pub use customer::{Cart, Customer, User};
pub use product::{Product, ProductInput, SearchFilter};
