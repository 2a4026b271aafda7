//! Store fixtures and catalog helpers.
//!
//! Provides convenience functions for setting up seeded stores and
//! common sale scenarios.

use caja_core::{ManualClock, ProductDraft, ProductId, SaleDraft, SaleItemDraft, Store};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

/// The instant all fixtures start from.
pub fn epoch() -> DateTime<Utc> {
    "2024-01-01T00:00:00Z".parse().expect("valid timestamp")
}

/// Parses a decimal literal.
pub fn dec(value: &str) -> Decimal {
    value.parse().expect("valid decimal")
}

/// A seeded store with a controllable clock.
pub struct TestCatalog {
    /// The store under test.
    pub store: Arc<Store>,
    /// Clock shared with whatever drives the store.
    pub clock: Arc<ManualClock>,
    /// Ids of the seeded products, in creation order.
    pub product_ids: Vec<ProductId>,
}

impl TestCatalog {
    /// Creates an empty catalog at the fixture epoch.
    pub fn empty() -> Self {
        Self {
            store: Arc::new(Store::new()),
            clock: Arc::new(ManualClock::new(epoch())),
            product_ids: Vec::new(),
        }
    }

    /// Creates a catalog seeded with `count` products, each priced at
    /// 10.00 with 100 units of stock, created one second apart.
    pub fn with_products(count: usize) -> Self {
        Self::with_products_stocked(count, 100)
    }

    /// Like [`with_products`](Self::with_products), but with a chosen
    /// stock level so tests can force stock to run out.
    pub fn with_products_stocked(count: usize, stock: i64) -> Self {
        let mut catalog = Self::empty();
        for i in 0..count {
            let created = catalog
                .store
                .insert_product(
                    ProductDraft {
                        name: format!("Product {i}"),
                        description: None,
                        qr_code: None,
                        price: dec("10.00"),
                        stock,
                    },
                    epoch() + Duration::seconds(i as i64),
                )
                .expect("fixture product is valid");
            catalog.product_ids.push(created.id);
        }
        catalog
    }

    /// Builds a one-line sale draft for a seeded product. The total is
    /// consistent with the fixture price, so the draft passes shape
    /// validation.
    pub fn sale_draft_for(&self, product: ProductId, quantity: i64) -> SaleDraft {
        let total = dec("10.00") * Decimal::from(quantity);
        SaleDraft {
            uuid: Uuid::new_v4(),
            total,
            items: vec![SaleItemDraft {
                product_id: product,
                quantity,
                total_price: total,
            }],
        }
    }

    /// Advances the fixture clock.
    pub fn tick(&self, seconds: i64) {
        self.clock.advance(Duration::seconds(seconds));
    }
}
