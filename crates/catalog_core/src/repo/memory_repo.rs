//! List-backed product store.
//!
//! # Responsibility
//! - Provide a dependency-free `ProductStore` for tests and embedding.
//! - Allow read/write fault injection to exercise error propagation.
//!
//! # Invariants
//! - `find_all` returns products in insertion order.
//! - A failed write leaves stored records untouched.
//! - Enforces the same constraints as the SQLite schema: non-blank name and
//!   non-negative price.

use crate::model::product::{Product, ProductId};
use crate::repo::product_repo::{ProductStore, StoreError, StoreFault, StoreResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct Records {
    products: Vec<Product>,
    next_id: ProductId,
}

/// In-memory product store guarded by a mutex.
#[derive(Debug)]
pub struct InMemoryProductStore {
    records: Mutex<Records>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductStore {
    /// Creates an empty store; the first assigned id is `1`.
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Records {
                products: Vec::new(),
                next_id: 1,
            }),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Makes subsequent `find_all` calls fail with `Unavailable`.
    pub fn fail_reads(&self, enabled: bool) {
        self.fail_reads.store(enabled, Ordering::SeqCst);
    }

    /// Makes subsequent `save` calls fail with `WriteFailed`.
    pub fn fail_writes(&self, enabled: bool) {
        self.fail_writes.store(enabled, Ordering::SeqCst);
    }

    /// Returns the number of stored products.
    pub fn len(&self) -> StoreResult<usize> {
        let records = self.lock().map_err(StoreError::read)?;
        Ok(records.products.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        self.len().map(|len| len == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records>, StoreFault> {
        self.records
            .lock()
            .map_err(|_| StoreFault::Rejected("in-memory product store lock poisoned".to_string()))
    }
}

impl ProductStore for InMemoryProductStore {
    fn find_all(&self) -> StoreResult<Vec<Product>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::read(StoreFault::Rejected(
                "injected read failure".to_string(),
            )));
        }

        let records = self.lock().map_err(StoreError::read)?;
        Ok(records.products.clone())
    }

    fn save(&self, product: &Product) -> StoreResult<Product> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::write(StoreFault::Rejected(
                "injected write failure".to_string(),
            )));
        }
        check_constraints(product).map_err(StoreError::write)?;

        let mut records = self.lock().map_err(StoreError::write)?;
        let id = product.id.unwrap_or(records.next_id);
        // Computed before any mutation so a rejected id leaves records intact.
        let next_id = if id < records.next_id {
            records.next_id
        } else {
            id.checked_add(1).ok_or_else(|| {
                StoreError::write(StoreFault::Rejected(format!(
                    "product id space exhausted at {id}"
                )))
            })?
        };
        let saved = Product {
            id: Some(id),
            ..product.clone()
        };

        match records
            .products
            .iter()
            .position(|existing| existing.id == Some(id))
        {
            Some(index) => records.products[index] = saved.clone(),
            None => records.products.push(saved.clone()),
        }
        records.next_id = next_id;

        Ok(saved)
    }
}

fn check_constraints(product: &Product) -> Result<(), StoreFault> {
    if product.name.trim().is_empty() {
        return Err(StoreFault::Rejected(
            "constraint failed: products.name must not be blank".to_string(),
        ));
    }
    if product.price_cents < 0 {
        return Err(StoreFault::Rejected(format!(
            "constraint failed: products.price_cents must be >= 0, got {}",
            product.price_cents
        )));
    }
    Ok(())
}
