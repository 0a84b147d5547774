//! Catalog domain model.
//!
//! # Responsibility
//! - Define the record shape exchanged between the catalog service and stores.
//!
//! # Invariants
//! - A product is identified by a store-assigned `ProductId` once persisted.
//! - The model carries no validation; constraints live in the store.

pub mod product;
