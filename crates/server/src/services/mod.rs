//! Service layer.
//!
//! `CatalogService` and `CustomerService` are thin pass-throughs over
//! the repositories; no business rule lives here beyond what the
//! repositories already enforce. `images` handles the filesystem
//! side-channel for product images.

pub mod catalog;
pub mod customers;
pub mod images;

pub use catalog::CatalogService;
pub use customers::CustomerService;
pub use images::ImageStore;
