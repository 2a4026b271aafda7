//! Product wire types.

use caja_core::{Product, ProductDraft, ProductId, ProductPatch, ProductUpsert};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product as it appears in responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBody {
    /// Catalog id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-text description, null when absent.
    pub description: Option<String>,
    /// QR code, null when absent.
    pub qr_code: Option<String>,
    /// Unit price as a decimal string.
    pub price: Decimal,
    /// Units in stock.
    pub stock: i64,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete flag.
    pub active: bool,
}

impl From<Product> for ProductBody {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            qr_code: product.qr_code,
            price: product.price,
            stock: product.stock,
            updated_at: product.updated_at,
            active: product.active,
        }
    }
}

/// Request body for `POST` and `PUT` on products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductWrite {
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional QR code.
    #[serde(default)]
    pub qr_code: Option<String>,
    /// Unit price.
    pub price: Decimal,
    /// Stock level.
    pub stock: i64,
}

impl ProductWrite {
    /// Converts into a core draft, normalizing blank optional text to
    /// `None`.
    pub fn into_draft(self) -> ProductDraft {
        ProductDraft {
            name: self.name,
            description: normalize(self.description),
            qr_code: normalize(self.qr_code),
            price: self.price,
            stock: self.stock,
        }
    }
}

/// Request body for `PATCH` on products. Absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatchBody {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New QR code.
    #[serde(default)]
    pub qr_code: Option<String>,
    /// New unit price.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// New stock level.
    #[serde(default)]
    pub stock: Option<i64>,
}

impl ProductPatchBody {
    /// Converts into a core patch.
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: self.name,
            description: normalize(self.description),
            qr_code: normalize(self.qr_code),
            price: self.price,
            stock: self.stock,
        }
    }
}

/// Envelope for `GET /api/products/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    /// Number of products in `results`.
    pub count: usize,
    /// Matching products, newest first.
    pub results: Vec<ProductBody>,
    /// Server time at evaluation; use as the next `updated_after`.
    pub sync_timestamp: DateTime<Utc>,
}

/// One product record in a `POST /api/sync/products/` batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSyncEntry {
    /// Client-assigned catalog id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional QR code.
    #[serde(default)]
    pub qr_code: Option<String>,
    /// Unit price.
    pub price: Decimal,
    /// Stock level as counted on the device.
    pub stock: i64,
    /// Client-side modification time.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete flag, defaults to active.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl ProductSyncEntry {
    /// Converts into a core upsert record.
    pub fn into_upsert(self) -> ProductUpsert {
        ProductUpsert {
            id: self.id,
            name: self.name,
            description: normalize(self.description),
            qr_code: normalize(self.qr_code),
            price: self.price,
            stock: self.stock,
            updated_at: self.updated_at,
            active: self.active,
        }
    }
}

/// Request body for `POST /api/sync/products/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSyncRequest {
    /// Product records to upsert, in submission order.
    pub products: Vec<ProductSyncEntry>,
}

fn default_active() -> bool {
    true
}

fn normalize(text: Option<String>) -> Option<String> {
    text.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
