//! Catalog use-case services.
//!
//! # Responsibility
//! - Expose catalog operations over an injected product store.
//! - Keep CLI and embedding callers decoupled from storage details.

pub mod catalog_service;
