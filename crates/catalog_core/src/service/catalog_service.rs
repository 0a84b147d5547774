//! Catalog use-case service.
//!
//! # Responsibility
//! - Provide the list/create entry points for catalog callers.
//! - Delegate persistence to a `ProductStore` implementation.
//!
//! # Invariants
//! - Store results and errors are returned unchanged.
//! - One store call per operation; no retry, no local state.

use crate::model::product::Product;
use crate::repo::product_repo::{ProductStore, StoreResult};
use log::{debug, warn};

/// Facade over a product store.
pub struct CatalogService<S: ProductStore> {
    store: S,
}

impl<S: ProductStore> CatalogService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists every product held by the store, in store order.
    pub fn list_all_products(&self) -> StoreResult<Vec<Product>> {
        match self.store.find_all() {
            Ok(products) => {
                debug!(
                    "event=product_list module=catalog status=ok count={}",
                    products.len()
                );
                Ok(products)
            }
            Err(err) => {
                warn!(
                    "event=product_list module=catalog status=error error_code={}",
                    err.code()
                );
                Err(err)
            }
        }
    }

    /// Persists a new product and returns it as stored.
    ///
    /// The returned value may differ from the input, e.g. by carrying a
    /// store-assigned id.
    pub fn create_product(&self, product: &Product) -> StoreResult<Product> {
        match self.store.save(product) {
            Ok(saved) => {
                debug!(
                    "event=product_create module=catalog status=ok id={}",
                    saved.id.map_or_else(|| "none".to_string(), |id| id.to_string())
                );
                Ok(saved)
            }
            Err(err) => {
                warn!(
                    "event=product_create module=catalog status=error error_code={}",
                    err.code()
                );
                Err(err)
            }
        }
    }

    /// Releases the service and returns its store.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::CatalogService;
    use crate::model::product::Product;
    use crate::repo::product_repo::{ProductStore, StoreError, StoreFault, StoreResult};
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingStore {
        saves: Cell<usize>,
    }

    impl ProductStore for CountingStore {
        fn find_all(&self) -> StoreResult<Vec<Product>> {
            Err(StoreError::read(StoreFault::Rejected("offline".to_string())))
        }

        fn save(&self, product: &Product) -> StoreResult<Product> {
            self.saves.set(self.saves.get() + 1);
            Err(StoreError::write(StoreFault::Rejected(format!(
                "duplicate name {}",
                product.name
            ))))
        }
    }

    #[test]
    fn create_calls_store_once_without_retry() {
        let store = CountingStore::default();
        let service = CatalogService::new(&store);

        let err = service.create_product(&Product::new("Widget")).unwrap_err();

        assert!(matches!(
            err,
            StoreError::WriteFailed(StoreFault::Rejected(ref message))
                if message == "duplicate name Widget"
        ));
        assert_eq!(store.saves.get(), 1);
    }

    #[test]
    fn list_propagates_store_error_unchanged() {
        let service = CatalogService::new(CountingStore::default());

        let err = service.list_all_products().unwrap_err();
        assert!(matches!(
            err,
            StoreError::Unavailable(StoreFault::Rejected(ref message)) if message == "offline"
        ));
    }
}
