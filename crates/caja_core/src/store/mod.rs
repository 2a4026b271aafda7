//! In-memory catalog store.
//!
//! The store keeps products and sales behind a single `RwLock`. Reads
//! take the shared guard; every write takes the exclusive guard, which
//! makes each operation a small serialized transaction. Sale
//! application in particular validates everything it needs before the
//! first mutation, so a rejected record leaves no partial stock
//! deduction behind.

mod products;
mod sales;

use crate::product::Product;
use crate::sale::Sale;
use crate::types::ProductId;
use crate::validate::Violations;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use uuid::Uuid;

/// The catalog store.
///
/// Cheap to share: wrap it in an `Arc` and hand clones of that to the
/// service and the reconciler.
pub struct Store {
    inner: RwLock<StoreInner>,
}

/// All state guarded by the store lock.
struct StoreInner {
    products: BTreeMap<ProductId, Product>,
    sales: BTreeMap<Uuid, Sale>,
    next_product_id: u32,
}

/// Result of applying one sale record.
#[derive(Debug, Clone)]
pub enum SaleOutcome {
    /// The record was validated, stock was deducted, and the sale
    /// persisted.
    Created(Sale),
    /// A sale with this uuid already exists; nothing was changed.
    /// Client retries land here instead of double-deducting stock.
    AlreadySynced(Sale),
    /// The record was rejected; no state was touched.
    Rejected(Violations),
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                products: BTreeMap::new(),
                sales: BTreeMap::new(),
                next_product_id: 1,
            }),
        }
    }

    /// Returns the number of active products.
    pub fn product_count(&self) -> usize {
        self.inner
            .read()
            .products
            .values()
            .filter(|product| product.active)
            .count()
    }

    /// Returns the number of active sales.
    pub fn sale_count(&self) -> usize {
        self.inner
            .read()
            .sales
            .values()
            .filter(|sale| sale.active)
            .count()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("Store")
            .field("products", &inner.products.len())
            .field("sales", &inner.sales.len())
            .finish()
    }
}
