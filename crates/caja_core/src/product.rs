//! Product entity and its write shapes.

use crate::types::ProductId;
use crate::validate::{Violation, Violations};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A catalog product.
///
/// Products are never physically deleted: `active` flips to false and
/// the row is retained so that old sales keep a valid reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Catalog id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional QR code, unique among active products.
    pub qr_code: Option<String>,
    /// Unit price, always positive.
    pub price: Decimal,
    /// Units in stock, never negative.
    pub stock: i64,
    /// Last modification time (server clock).
    pub updated_at: DateTime<Utc>,
    /// Soft-delete flag.
    pub active: bool,
}

/// Fields accepted when creating or fully replacing a product.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    /// Display name.
    pub name: String,
    /// Optional description; blank input is normalized to `None`.
    pub description: Option<String>,
    /// Optional QR code; blank input is normalized to `None`.
    pub qr_code: Option<String>,
    /// Unit price.
    pub price: Decimal,
    /// Initial stock.
    pub stock: i64,
}

impl ProductDraft {
    /// Collects every field-level failure in this draft.
    pub fn validate(&self) -> Violations {
        let mut violations = Violations::new();
        if self.name.trim().is_empty() {
            violations.push(Violation::new("name", "name is required"));
        }
        if self.price <= Decimal::ZERO {
            violations.push(Violation::new("price", "price must be greater than 0"));
        }
        if self.stock < 0 {
            violations.push(Violation::new("stock", "stock cannot be negative"));
        }
        violations
    }
}

/// Partial update applied by `PATCH`.
///
/// Absent fields keep their current value. Optional text fields can be
/// updated but not cleared through a patch; a full `PUT` clears them.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    /// New display name, if given.
    pub name: Option<String>,
    /// New description, if given.
    pub description: Option<String>,
    /// New QR code, if given.
    pub qr_code: Option<String>,
    /// New unit price, if given.
    pub price: Option<Decimal>,
    /// New stock level, if given.
    pub stock: Option<i64>,
}

impl ProductPatch {
    /// Returns the draft that results from applying this patch to an
    /// existing product.
    pub fn apply_to(&self, current: &Product) -> ProductDraft {
        ProductDraft {
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            description: self
                .description
                .clone()
                .or_else(|| current.description.clone()),
            qr_code: self.qr_code.clone().or_else(|| current.qr_code.clone()),
            price: self.price.unwrap_or(current.price),
            stock: self.stock.unwrap_or(current.stock),
        }
    }
}

/// A client-pushed product record for the product sync endpoint.
///
/// Keyed by the client-assigned id; existing products are replaced,
/// unknown ids are inserted. The client's `updated_at` is kept so the
/// device stays the author of record for its own catalog edits.
#[derive(Debug, Clone)]
pub struct ProductUpsert {
    /// Client-assigned catalog id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional QR code.
    pub qr_code: Option<String>,
    /// Unit price.
    pub price: Decimal,
    /// Stock level as counted on the device.
    pub stock: i64,
    /// Client-side modification time.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete flag as set on the device.
    pub active: bool,
}

impl ProductUpsert {
    /// Collects every field-level failure in this record.
    pub fn validate(&self) -> Violations {
        let mut violations = Violations::new();
        if self.name.trim().is_empty() {
            violations.push(Violation::new("name", "name is required"));
        }
        if self.price <= Decimal::ZERO {
            violations.push(Violation::new("price", "price must be greater than 0"));
        }
        if self.stock < 0 {
            violations.push(Violation::new("stock", "stock cannot be negative"));
        }
        violations
    }
}
