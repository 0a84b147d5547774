//! Product catalog: `CatalogService` over a pluggable `ProductStore`, with a
//! SQLite store, an in-memory store, and the bootstrap the `catalog` binary
//! needs (config, logging, migrations).

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{CatalogConfig, ConfigError};
pub use logging::{default_log_level, init_logging, parse_level, LoggingError};
pub use model::product::{Product, ProductId};
pub use repo::memory_repo::InMemoryProductStore;
pub use repo::product_repo::{
    ProductStore, SqliteProductStore, StoreError, StoreFault, StoreResult,
};
pub use service::catalog_service::CatalogService;

/// Crate version stamped into log lines and `catalog version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
