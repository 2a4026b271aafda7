//! Product operations on the store.

use super::{Store, StoreInner};
use crate::error::{CoreError, CoreResult};
use crate::product::{Product, ProductDraft, ProductPatch, ProductUpsert};
use crate::types::ProductId;
use crate::validate::Violation;
use crate::watermark;
use chrono::{DateTime, Utc};

impl Store {
    /// Inserts a new product, allocating the next free id.
    pub fn insert_product(&self, draft: ProductDraft, now: DateTime<Utc>) -> CoreResult<Product> {
        let mut violations = draft.validate();
        let mut inner = self.inner.write();
        if let Some(qr) = draft.qr_code.as_deref() {
            if qr_taken(&inner, qr, None) {
                violations.push(Violation::new("qr_code", "qr_code is already in use"));
            }
        }
        if !violations.is_empty() {
            return Err(CoreError::Rejected(violations));
        }

        let id = ProductId::new(inner.next_product_id);
        inner.next_product_id += 1;
        let product = Product {
            id,
            name: draft.name,
            description: draft.description,
            qr_code: draft.qr_code,
            price: draft.price,
            stock: draft.stock,
            updated_at: now,
            active: true,
        };
        inner.products.insert(id, product.clone());
        tracing::debug!(product = %id, "product created");
        Ok(product)
    }

    /// Returns an active product by id.
    pub fn get_product(&self, id: ProductId) -> CoreResult<Product> {
        self.inner
            .read()
            .products
            .get(&id)
            .filter(|product| product.active)
            .cloned()
            .ok_or(CoreError::ProductNotFound { id })
    }

    /// Fully replaces an active product.
    pub fn replace_product(
        &self,
        id: ProductId,
        draft: ProductDraft,
        now: DateTime<Utc>,
    ) -> CoreResult<Product> {
        let mut violations = draft.validate();
        let mut inner = self.inner.write();
        if !inner.products.get(&id).is_some_and(|p| p.active) {
            return Err(CoreError::ProductNotFound { id });
        }
        if let Some(qr) = draft.qr_code.as_deref() {
            if qr_taken(&inner, qr, Some(id)) {
                violations.push(Violation::new("qr_code", "qr_code is already in use"));
            }
        }
        if !violations.is_empty() {
            return Err(CoreError::Rejected(violations));
        }

        let product = Product {
            id,
            name: draft.name,
            description: draft.description,
            qr_code: draft.qr_code,
            price: draft.price,
            stock: draft.stock,
            updated_at: now,
            active: true,
        };
        inner.products.insert(id, product.clone());
        Ok(product)
    }

    /// Applies a partial update to an active product.
    pub fn patch_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
        now: DateTime<Utc>,
    ) -> CoreResult<Product> {
        let current = self.get_product(id)?;
        self.replace_product(id, patch.apply_to(&current), now)
    }

    /// Soft-deletes a product. Its row is retained so existing sales
    /// keep a valid reference, but it disappears from listings and can
    /// no longer be sold.
    pub fn soft_delete_product(&self, id: ProductId, now: DateTime<Utc>) -> CoreResult<()> {
        let mut inner = self.inner.write();
        let product = inner
            .products
            .get_mut(&id)
            .filter(|product| product.active)
            .ok_or(CoreError::ProductNotFound { id })?;
        product.active = false;
        product.updated_at = now;
        tracing::debug!(product = %id, "product soft-deleted");
        Ok(())
    }

    /// Returns a product's display name, including soft-deleted rows.
    /// Sale line items keep pointing at deleted products, and their
    /// names should still render.
    pub fn product_name(&self, id: ProductId) -> Option<String> {
        self.inner
            .read()
            .products
            .get(&id)
            .map(|product| product.name.clone())
    }

    /// Lists active products whose `updated_at` is strictly after the
    /// watermark (all of them when no watermark is given), newest
    /// first.
    pub fn list_products(&self, updated_after: Option<DateTime<Utc>>) -> Vec<Product> {
        let inner = self.inner.read();
        let mut results: Vec<Product> = inner
            .products
            .values()
            .filter(|product| product.active)
            .filter(|product| watermark::is_after(product.updated_at, updated_after))
            .cloned()
            .collect();
        results.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        results
    }

    /// Upserts a client-pushed product record, keyed by the client's
    /// id. The record's own `updated_at` and `active` flag are kept.
    pub fn upsert_product(&self, record: ProductUpsert) -> CoreResult<Product> {
        let mut violations = record.validate();
        let mut inner = self.inner.write();
        if let Some(qr) = record.qr_code.as_deref() {
            if qr_taken(&inner, qr, Some(record.id)) {
                violations.push(Violation::new("qr_code", "qr_code is already in use"));
            }
        }
        if !violations.is_empty() {
            return Err(CoreError::Rejected(violations));
        }

        let product = Product {
            id: record.id,
            name: record.name,
            description: record.description,
            qr_code: record.qr_code,
            price: record.price,
            stock: record.stock,
            updated_at: record.updated_at,
            active: record.active,
        };
        // Keep server-side id allocation ahead of client-assigned ids.
        if record.id.get() >= inner.next_product_id {
            inner.next_product_id = record.id.get() + 1;
        }
        inner.products.insert(record.id, product.clone());
        tracing::debug!(product = %record.id, "product upserted from device");
        Ok(product)
    }
}

/// Returns true if an active product other than `exclude` already uses
/// this QR code.
fn qr_taken(inner: &StoreInner, qr: &str, exclude: Option<ProductId>) -> bool {
    inner
        .products
        .values()
        .filter(|product| product.active && Some(product.id) != exclude)
        .any(|product| product.qr_code.as_deref() == Some(qr))
}
