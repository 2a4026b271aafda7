//! CRUD service over the catalog store.

use crate::config::ServerConfig;
use crate::error::{ApiError, ApiResult};
use caja_core::{watermark, Clock, Page, ProductId, SaleDraft, SaleOutcome, Store};
use caja_protocol::{
    FieldErrors, ProductBody, ProductListResponse, ProductPatchBody, ProductWrite, SaleBody,
    SaleCreateRequest, SaleListResponse,
};
use std::sync::Arc;
use uuid::Uuid;

/// The CRUD layer of the API.
///
/// Holds a shared catalog store and a clock; the HTTP handlers call
/// straight into it, and tests can drive it without a socket.
#[derive(Clone)]
pub struct PosService {
    store: Arc<Store>,
    clock: Arc<dyn Clock>,
    config: ServerConfig,
}

impl PosService {
    /// Creates a service over the given store and clock.
    pub fn new(store: Arc<Store>, clock: Arc<dyn Clock>, config: ServerConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Shared access to the underlying store.
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Lists active products, filtered by the raw `updated_after`
    /// query value when one is given.
    ///
    /// An unparseable watermark is ignored and the full listing is
    /// returned, so a device with a corrupt cursor recovers by
    /// resyncing everything instead of erroring out.
    pub fn list_products(&self, updated_after: Option<&str>) -> ProductListResponse {
        let watermark = updated_after.and_then(|raw| {
            let parsed = watermark::parse_updated_after(raw);
            if parsed.is_none() {
                tracing::warn!(raw, "unparseable updated_after, returning full listing");
            }
            parsed
        });
        let results: Vec<ProductBody> = self
            .store
            .list_products(watermark)
            .into_iter()
            .map(ProductBody::from)
            .collect();
        ProductListResponse {
            count: results.len(),
            results,
            sync_timestamp: self.clock.now(),
        }
    }

    /// Creates a product.
    pub fn create_product(&self, body: ProductWrite) -> ApiResult<ProductBody> {
        let product = self
            .store
            .insert_product(body.into_draft(), self.clock.now())?;
        Ok(product.into())
    }

    /// Fetches an active product.
    pub fn get_product(&self, id: ProductId) -> ApiResult<ProductBody> {
        Ok(self.store.get_product(id)?.into())
    }

    /// Fully replaces an active product.
    pub fn replace_product(&self, id: ProductId, body: ProductWrite) -> ApiResult<ProductBody> {
        let product = self
            .store
            .replace_product(id, body.into_draft(), self.clock.now())?;
        Ok(product.into())
    }

    /// Partially updates an active product.
    pub fn patch_product(&self, id: ProductId, body: ProductPatchBody) -> ApiResult<ProductBody> {
        let product = self
            .store
            .patch_product(id, &body.into_patch(), self.clock.now())?;
        Ok(product.into())
    }

    /// Soft-deletes a product.
    pub fn delete_product(&self, id: ProductId) -> ApiResult<()> {
        self.store.soft_delete_product(id, self.clock.now())?;
        Ok(())
    }

    /// Lists active sales, newest first, windowed by page.
    pub fn list_sales(&self, page: Option<u32>, page_size: Option<u32>) -> SaleListResponse {
        let size = page_size
            .unwrap_or(self.config.default_page_size)
            .min(self.config.max_page_size);
        let (count, sales) = self.store.list_sales(Page::new(page.unwrap_or(1), size));
        SaleListResponse {
            count,
            results: sales.into_iter().map(|sale| self.sale_body(sale)).collect(),
        }
    }

    /// Creates a sale directly on the server, deducting stock.
    ///
    /// The uuid is server-generated and the sale is not marked as
    /// device-synced; offline devices go through the sync endpoint
    /// instead.
    pub fn create_sale(&self, body: SaleCreateRequest) -> ApiResult<SaleBody> {
        let draft = SaleDraft {
            uuid: Uuid::new_v4(),
            total: body.total,
            items: body
                .items_data
                .into_iter()
                .map(|item| caja_core::SaleItemDraft {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    total_price: item.total_price,
                })
                .collect(),
        };
        match self.store.apply_sale(&draft, false, self.clock.now()) {
            SaleOutcome::Created(sale) | SaleOutcome::AlreadySynced(sale) => {
                Ok(self.sale_body(sale))
            }
            SaleOutcome::Rejected(violations) => Err(ApiError::Validation(
                FieldErrors::from_violations(&violations),
            )),
        }
    }

    /// Fetches an active sale.
    pub fn get_sale(&self, uuid: Uuid) -> ApiResult<SaleBody> {
        let sale = self.store.get_sale(uuid)?;
        Ok(self.sale_body(sale))
    }

    /// Soft-deletes a sale, restoring its stock.
    pub fn delete_sale(&self, uuid: Uuid) -> ApiResult<()> {
        self.store.soft_delete_sale(uuid, self.clock.now())?;
        Ok(())
    }

    /// Reactivates a soft-deleted sale, deducting its stock again.
    pub fn reactivate_sale(&self, uuid: Uuid) -> ApiResult<SaleBody> {
        let sale = self.store.reactivate_sale(uuid, self.clock.now())?;
        Ok(self.sale_body(sale))
    }

    /// Builds a response body, resolving item product names through the
    /// store (soft-deleted products included, so old sales still render
    /// their line items).
    pub(crate) fn sale_body(&self, sale: caja_core::Sale) -> SaleBody {
        SaleBody::from_sale(sale, |id| self.store.product_name(id))
    }
}
