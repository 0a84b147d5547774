//! Product store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the two persistence operations the catalog depends on.
//! - Map backend failures onto the read/write error taxonomy.
//!
//! # Invariants
//! - `save` performs one write and returns the record as persisted.
//! - Read paths reject undecodable rows instead of masking them.

use crate::db::migrations::latest_version;
use crate::db::{schema_version, DbError};
use crate::model::product::{Product, ProductId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PRODUCT_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    price_cents
FROM products";

pub type StoreResult<T> = Result<T, StoreError>;

/// Backend failure carried by `StoreError::Unavailable` and
/// `StoreError::WriteFailed`.
#[derive(Debug)]
pub enum StoreFault {
    Db(DbError),
    Rejected(String),
}

impl Display for StoreFault {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Rejected(message) => write!(f, "{message}"),
        }
    }
}

impl Error for StoreFault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Rejected(_) => None,
        }
    }
}

impl From<DbError> for StoreFault {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreFault {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Error surfaced by product stores.
#[derive(Debug)]
pub enum StoreError {
    /// The store could not serve a read.
    Unavailable(StoreFault),
    /// The store rejected or failed a write.
    WriteFailed(StoreFault),
    /// A persisted row could not be decoded into a `Product`.
    InvalidData(String),
    /// The connection has not been migrated to the catalog schema.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl StoreError {
    /// Wraps a read-path backend failure.
    pub fn read(fault: impl Into<StoreFault>) -> Self {
        Self::Unavailable(fault.into())
    }

    /// Wraps a write-path backend failure.
    pub fn write(fault: impl Into<StoreFault>) -> Self {
        Self::WriteFailed(fault.into())
    }

    /// Stable, content-free code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "store_unavailable",
            Self::WriteFailed(_) => "store_write_failed",
            Self::InvalidData(_) => "store_invalid_data",
            Self::UninitializedConnection { .. } => "store_uninitialized",
            Self::MissingRequiredTable(_) => "store_missing_table",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(fault) => write!(f, "product store unavailable: {fault}"),
            Self::WriteFailed(fault) => write!(f, "product store write failed: {fault}"),
            Self::InvalidData(message) => write!(f, "invalid persisted product data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is older than required {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(fault) | Self::WriteFailed(fault) => Some(fault),
            Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_) => None,
        }
    }
}

/// Persistence contract consumed by the catalog service.
pub trait ProductStore {
    /// Returns every product held by the store, in store-defined order.
    fn find_all(&self) -> StoreResult<Vec<Product>>;
    /// Persists one product and returns it as stored.
    fn save(&self, product: &Product) -> StoreResult<Product>;
}

impl<S: ProductStore + ?Sized> ProductStore for &S {
    fn find_all(&self) -> StoreResult<Vec<Product>> {
        (**self).find_all()
    }

    fn save(&self, product: &Product) -> StoreResult<Product> {
        (**self).save(product)
    }
}

/// SQLite-backed product store.
///
/// Products are listed by ascending id. Saving a product without an id
/// inserts a new row; saving one with an id upserts that row.
pub struct SqliteProductStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductStore<'conn> {
    /// Creates a store over a connection opened by `db::open_db*`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when the `products` table is absent.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let actual_version = schema_version(conn).map_err(StoreError::read)?;
        let expected_version = latest_version();
        if actual_version < expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let has_table: bool = conn
            .query_row(
                "SELECT EXISTS(
                    SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'products'
                );",
                [],
                |row| row.get(0),
            )
            .map_err(StoreError::read)?;
        if !has_table {
            return Err(StoreError::MissingRequiredTable("products"));
        }

        Ok(Self { conn })
    }
}

impl ProductStore for SqliteProductStore<'_> {
    fn find_all(&self) -> StoreResult<Vec<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} ORDER BY id ASC;"))
            .map_err(StoreError::read)?;
        let mut rows = stmt.query([]).map_err(StoreError::read)?;
        let mut products = Vec::new();

        while let Some(row) = rows.next().map_err(StoreError::read)? {
            products.push(parse_product_row(row)?);
        }

        Ok(products)
    }

    fn save(&self, product: &Product) -> StoreResult<Product> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(StoreError::write)?;

        tx.execute(
            "INSERT INTO products (id, name, description, price_cents)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                price_cents = excluded.price_cents,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                product.id,
                product.name.as_str(),
                product.description.as_deref(),
                product.price_cents,
            ],
        )
        .map_err(StoreError::write)?;

        let id = product.id.unwrap_or_else(|| tx.last_insert_rowid());
        let saved = find_by_id(&tx, id)?.ok_or_else(|| {
            StoreError::write(StoreFault::Rejected(format!(
                "product {id} missing after write"
            )))
        })?;

        tx.commit().map_err(StoreError::write)?;
        Ok(saved)
    }
}

fn find_by_id(conn: &Connection, id: ProductId) -> StoreResult<Option<Product>> {
    let mut stmt = conn
        .prepare(&format!("{PRODUCT_SELECT_SQL} WHERE id = ?1;"))
        .map_err(StoreError::write)?;
    let row = stmt
        .query_row([id], |row| Ok(parse_product_row(row)))
        .optional()
        .map_err(StoreError::write)?;
    row.transpose()
}

fn parse_product_row(row: &Row<'_>) -> StoreResult<Product> {
    let id: ProductId = row.get("id").map_err(decode_error)?;
    let price_cents: i64 = row.get("price_cents").map_err(decode_error)?;
    if price_cents < 0 {
        return Err(StoreError::InvalidData(format!(
            "negative price `{price_cents}` in products.price_cents for id {id}"
        )));
    }

    Ok(Product {
        id: Some(id),
        name: row.get("name").map_err(decode_error)?,
        description: row.get("description").map_err(decode_error)?,
        price_cents,
    })
}

fn decode_error(err: rusqlite::Error) -> StoreError {
    match err {
        rusqlite::Error::InvalidColumnType(_, column, kind) => {
            StoreError::InvalidData(format!("unexpected {kind} value in products.{column}"))
        }
        rusqlite::Error::FromSqlConversionFailure(_, kind, cause) => {
            StoreError::InvalidData(format!("cannot decode {kind} value: {cause}"))
        }
        other => StoreError::read(other),
    }
}
