//! Batch reconciliation of device-created records.
//!
//! Devices record sales while offline and push them in batches once
//! connectivity returns. The reconciler applies each record
//! independently against the catalog, so one bad record never blocks
//! the rest of the batch, and reports per-record field errors aligned
//! with submission order.

use crate::config::ServerConfig;
use crate::error::{ApiError, ApiResult};
use caja_core::{Clock, SaleOutcome, Store};
use caja_protocol::{
    FieldErrors, ProductSyncRequest, ProductSyncResponse, SaleBody, SaleSyncRequest,
    SaleSyncResponse,
};
use std::sync::Arc;

/// Merges device-pushed batches into the catalog.
#[derive(Clone)]
pub struct SyncReconciler {
    store: Arc<Store>,
    clock: Arc<dyn Clock>,
    max_batch: usize,
}

impl SyncReconciler {
    /// Creates a reconciler over the given store and clock.
    pub fn new(store: Arc<Store>, clock: Arc<dyn Clock>, config: &ServerConfig) -> Self {
        Self {
            store,
            clock,
            max_batch: config.max_sync_batch,
        }
    }

    /// Merges a batch of device-created sales.
    ///
    /// Each record is applied on its own: accepted records deduct stock
    /// and persist even when a sibling record is rejected. Resubmitted
    /// uuids count as synced without touching stock again. The
    /// response's `success` flag is true only when every record was
    /// accepted.
    pub fn sync_sales(&self, request: SaleSyncRequest) -> ApiResult<SaleSyncResponse> {
        self.check_batch(request.sales.len(), "sales")?;
        let now = self.clock.now();

        let mut bodies: Vec<SaleBody> = Vec::with_capacity(request.sales.len());
        let mut slots: Vec<FieldErrors> = Vec::with_capacity(request.sales.len());
        let mut synced_count = 0;

        for entry in request.sales {
            let draft = entry.into_draft();
            match self.store.apply_sale(&draft, true, now) {
                SaleOutcome::Created(sale) | SaleOutcome::AlreadySynced(sale) => {
                    synced_count += 1;
                    bodies.push(SaleBody::from_sale(sale, |id| self.store.product_name(id)));
                    slots.push(FieldErrors::new());
                }
                SaleOutcome::Rejected(violations) => {
                    slots.push(FieldErrors::from_violations(&violations));
                }
            }
        }

        let rejected = slots.iter().filter(|slot| !slot.is_empty()).count();
        tracing::info!(
            synced = synced_count,
            rejected,
            "sale sync batch processed"
        );

        if rejected == 0 {
            Ok(SaleSyncResponse::accepted(bodies, now))
        } else {
            Ok(SaleSyncResponse::rejected(synced_count, slots, now))
        }
    }

    /// Merges a batch of device-edited products, keyed by client id.
    pub fn sync_products(&self, request: ProductSyncRequest) -> ApiResult<ProductSyncResponse> {
        self.check_batch(request.products.len(), "products")?;
        let now = self.clock.now();

        let mut slots: Vec<FieldErrors> = Vec::with_capacity(request.products.len());
        let mut synced_count = 0;

        for entry in request.products {
            match self.store.upsert_product(entry.into_upsert()) {
                Ok(_) => {
                    synced_count += 1;
                    slots.push(FieldErrors::new());
                }
                Err(caja_core::CoreError::Rejected(violations)) => {
                    slots.push(FieldErrors::from_violations(&violations));
                }
                Err(other) => return Err(other.into()),
            }
        }

        let rejected = slots.iter().filter(|slot| !slot.is_empty()).count();
        tracing::info!(
            synced = synced_count,
            rejected,
            "product sync batch processed"
        );

        if rejected == 0 {
            Ok(ProductSyncResponse::accepted(synced_count, now))
        } else {
            Ok(ProductSyncResponse::rejected(synced_count, slots, now))
        }
    }

    fn check_batch(&self, len: usize, field: &str) -> ApiResult<()> {
        if len == 0 {
            let mut errors = FieldErrors::new();
            errors.push(field, format!("at least one record is required in {field}"));
            return Err(ApiError::Validation(errors));
        }
        if len > self.max_batch {
            return Err(ApiError::InvalidRequest(format!(
                "batch of {len} records exceeds the limit of {}",
                self.max_batch
            )));
        }
        Ok(())
    }
}
