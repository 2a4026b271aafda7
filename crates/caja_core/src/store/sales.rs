//! Sale operations on the store.
//!
//! [`Store::apply_sale`] is the transactional heart of the system: one
//! write guard covers validation, stock deduction, and persistence, so
//! a record either applies completely or not at all, and concurrent
//! batches over the same products cannot race the decrements.

use super::{SaleOutcome, Store, StoreInner};
use crate::error::{CoreError, CoreResult};
use crate::sale::{Sale, SaleDraft, SaleItem};
use crate::types::{Page, ProductId};
use crate::validate::{Violation, Violations};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

impl Store {
    /// Applies one sale record against the catalog.
    ///
    /// Validation order: record shape first (totals, quantities, item
    /// sum), then catalog checks (product exists and is active, stock
    /// suffices). A sale may list the same product on several lines, so
    /// stock is checked against the combined demand per product, not
    /// line by line. Every failure is collected before returning, and
    /// nothing is mutated unless all checks pass.
    ///
    /// A duplicate uuid is not an error: the existing sale is returned
    /// as [`SaleOutcome::AlreadySynced`] so client retries stay
    /// idempotent.
    pub fn apply_sale(
        &self,
        draft: &SaleDraft,
        synced_from_device: bool,
        now: DateTime<Utc>,
    ) -> SaleOutcome {
        let mut violations = draft.validate();
        let mut inner = self.inner.write();

        if let Some(existing) = inner.sales.get(&draft.uuid) {
            tracing::debug!(sale = %draft.uuid, "sale already synced, skipping");
            return SaleOutcome::AlreadySynced(existing.clone());
        }

        // Catalog checks only make sense for items whose shape is fine.
        if violations.is_empty() {
            let demand =
                demand_per_product(draft.items.iter().map(|item| (item.product_id, item.quantity)));
            violations.extend(catalog_violations(&inner, &demand));
        }

        if !violations.is_empty() {
            tracing::warn!(
                sale = %draft.uuid,
                failures = violations.len(),
                "sale record rejected"
            );
            return SaleOutcome::Rejected(violations);
        }

        // All checks passed: deduct and persist under the same guard.
        for item in &draft.items {
            if let Some(product) = inner.products.get_mut(&item.product_id) {
                product.stock -= item.quantity;
                product.updated_at = now;
            }
        }

        let sale = Sale {
            uuid: draft.uuid,
            total: draft.total,
            created_at: now,
            updated_at: now,
            synced_from_device,
            active: true,
            items: draft
                .items
                .iter()
                .map(|item| SaleItem {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    total_price: item.total_price,
                })
                .collect(),
        };
        inner.sales.insert(sale.uuid, sale.clone());
        tracing::debug!(sale = %sale.uuid, items = sale.items.len(), "sale applied");
        SaleOutcome::Created(sale)
    }

    /// Returns an active sale by uuid.
    pub fn get_sale(&self, uuid: Uuid) -> CoreResult<Sale> {
        self.inner
            .read()
            .sales
            .get(&uuid)
            .filter(|sale| sale.active)
            .cloned()
            .ok_or(CoreError::SaleNotFound { uuid })
    }

    /// Lists active sales, newest first, windowed by `page`.
    ///
    /// The returned count is the total number of active sales, not the
    /// size of the window.
    pub fn list_sales(&self, page: Page) -> (usize, Vec<Sale>) {
        let inner = self.inner.read();
        let mut sales: Vec<Sale> = inner
            .sales
            .values()
            .filter(|sale| sale.active)
            .cloned()
            .collect();
        sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let count = sales.len();
        let window = sales
            .into_iter()
            .skip(page.offset())
            .take(page.size as usize)
            .collect();
        (count, window)
    }

    /// Soft-deletes a sale and restores the stock it had deducted.
    pub fn soft_delete_sale(&self, uuid: Uuid, now: DateTime<Utc>) -> CoreResult<()> {
        let mut inner = self.inner.write();
        let sale = inner
            .sales
            .get(&uuid)
            .filter(|sale| sale.active)
            .cloned()
            .ok_or(CoreError::SaleNotFound { uuid })?;

        for item in &sale.items {
            if let Some(product) = inner.products.get_mut(&item.product_id) {
                product.stock += item.quantity;
                product.updated_at = now;
            }
        }
        if let Some(sale) = inner.sales.get_mut(&uuid) {
            sale.active = false;
            sale.updated_at = now;
        }
        tracing::debug!(sale = %uuid, "sale soft-deleted, stock restored");
        Ok(())
    }

    /// Reactivates a soft-deleted sale, deducting its stock again.
    ///
    /// Returns the sale unchanged if it is already active. Fails with a
    /// rejection if the stock restored by the deletion has been sold in
    /// the meantime.
    pub fn reactivate_sale(&self, uuid: Uuid, now: DateTime<Utc>) -> CoreResult<Sale> {
        let mut inner = self.inner.write();
        let sale = inner
            .sales
            .get(&uuid)
            .cloned()
            .ok_or(CoreError::SaleNotFound { uuid })?;
        if sale.active {
            return Ok(sale);
        }

        let demand =
            demand_per_product(sale.items.iter().map(|item| (item.product_id, item.quantity)));
        let violations = catalog_violations(&inner, &demand);
        if !violations.is_empty() {
            return Err(CoreError::Rejected(violations));
        }

        for item in &sale.items {
            if let Some(product) = inner.products.get_mut(&item.product_id) {
                product.stock -= item.quantity;
                product.updated_at = now;
            }
        }
        let reactivated = {
            // Sale was cloned from the map above, so the entry exists.
            let entry = inner
                .sales
                .get_mut(&uuid)
                .ok_or(CoreError::SaleNotFound { uuid })?;
            entry.active = true;
            entry.updated_at = now;
            entry.clone()
        };
        tracing::debug!(sale = %uuid, "sale reactivated, stock re-deducted");
        Ok(reactivated)
    }
}

/// Sums the requested quantity per product across all line items.
fn demand_per_product<I>(items: I) -> BTreeMap<ProductId, i64>
where
    I: IntoIterator<Item = (ProductId, i64)>,
{
    let mut demand = BTreeMap::new();
    for (product_id, quantity) in items {
        *demand.entry(product_id).or_insert(0) += quantity;
    }
    demand
}

/// Checks the aggregated demand against the catalog: every product must
/// exist, be active, and hold enough stock for its combined quantity.
fn catalog_violations(inner: &StoreInner, demand: &BTreeMap<ProductId, i64>) -> Violations {
    let mut violations = Violations::new();
    for (&product_id, &quantity) in demand {
        match inner.products.get(&product_id) {
            Some(product) if product.active => {
                if product.stock < quantity {
                    violations.push(Violation::new(
                        "items_data",
                        format!(
                            "insufficient stock for product {product_id}: requested {quantity}, available {}",
                            product.stock
                        ),
                    ));
                }
            }
            _ => violations.push(Violation::new(
                "items_data",
                format!("product {product_id} does not exist or is inactive"),
            )),
        }
    }
    violations
}
