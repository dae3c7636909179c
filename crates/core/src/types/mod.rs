//! Core type definitions.
//!
//! Each submodule defines one validated value type. Types parse at the
//! boundary and stay valid for their whole lifetime.

pub mod email;
pub mod id;
pub mod price;
pub mod product_id;
pub mod role;
