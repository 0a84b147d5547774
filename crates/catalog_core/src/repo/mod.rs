//! Product store abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the read-all/save contract the catalog service consumes.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Read failures surface as `StoreError::Unavailable`.
//! - Write failures surface as `StoreError::WriteFailed`.

pub mod memory_repo;
pub mod product_repo;
