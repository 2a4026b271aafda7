//! Sync batch envelopes.
//!
//! Both sync endpoints share the same reporting policy: records are
//! processed independently, but the envelope's `success` flag is true
//! only when every record was accepted. The `errors` collection always
//! carries one field-error map per submitted record, in submission
//! order, with empty maps for accepted slots.

use crate::errors::FieldErrors;
use crate::sale::{SaleBody, SaleItemWrite};
use caja_core::{SaleDraft, SaleItemDraft};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One sale record in a `POST /api/sync/sales/` batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleSyncEntry {
    /// Device-generated sale uuid; resubmitting it is idempotent.
    pub uuid: Uuid,
    /// Claimed sale total.
    pub total: Decimal,
    /// Line items.
    pub items_data: Vec<SaleItemWrite>,
}

impl SaleSyncEntry {
    /// Converts into a core draft.
    pub fn into_draft(self) -> SaleDraft {
        SaleDraft {
            uuid: self.uuid,
            total: self.total,
            items: self
                .items_data
                .into_iter()
                .map(|item| SaleItemDraft {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    total_price: item.total_price,
                })
                .collect(),
        }
    }
}

/// Request body for `POST /api/sync/sales/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleSyncRequest {
    /// Sale records to merge, in submission order.
    pub sales: Vec<SaleSyncEntry>,
}

/// Per-record errors for a sale sync batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleSyncErrors {
    /// One error map per submitted record, in submission order.
    pub sales: Vec<FieldErrors>,
}

/// Response envelope for `POST /api/sync/sales/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleSyncResponse {
    /// True only if every record in the batch was accepted.
    pub success: bool,
    /// Number of records now present on the server (newly created plus
    /// idempotent duplicates).
    pub synced_count: usize,
    /// The accepted sales; omitted when any record was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales: Option<Vec<SaleBody>>,
    /// Per-record field errors; omitted on full success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<SaleSyncErrors>,
    /// Server time at evaluation; use as the next poll watermark.
    pub sync_timestamp: DateTime<Utc>,
}

impl SaleSyncResponse {
    /// Builds the full-success envelope.
    pub fn accepted(sales: Vec<SaleBody>, sync_timestamp: DateTime<Utc>) -> Self {
        Self {
            success: true,
            synced_count: sales.len(),
            sales: Some(sales),
            errors: None,
            sync_timestamp,
        }
    }

    /// Builds the envelope for a batch with at least one rejection.
    pub fn rejected(
        synced_count: usize,
        per_record: Vec<FieldErrors>,
        sync_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            success: false,
            synced_count,
            sales: None,
            errors: Some(SaleSyncErrors { sales: per_record }),
            sync_timestamp,
        }
    }
}

/// Per-record errors for a product sync batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSyncErrors {
    /// One error map per submitted record, in submission order.
    pub products: Vec<FieldErrors>,
}

/// Response envelope for `POST /api/sync/products/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSyncResponse {
    /// True only if every record in the batch was accepted.
    pub success: bool,
    /// Number of records upserted.
    pub synced_count: usize,
    /// Per-record field errors; omitted on full success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ProductSyncErrors>,
    /// Server time at evaluation.
    pub sync_timestamp: DateTime<Utc>,
}

impl ProductSyncResponse {
    /// Builds the full-success envelope.
    pub fn accepted(synced_count: usize, sync_timestamp: DateTime<Utc>) -> Self {
        Self {
            success: true,
            synced_count,
            errors: None,
            sync_timestamp,
        }
    }

    /// Builds the envelope for a batch with at least one rejection.
    pub fn rejected(
        synced_count: usize,
        per_record: Vec<FieldErrors>,
        sync_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            success: false,
            synced_count,
            errors: Some(ProductSyncErrors {
                products: per_record,
            }),
            sync_timestamp,
        }
    }
}
