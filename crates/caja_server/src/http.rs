//! Route table and handlers.
//!
//! Handlers stay thin: extract, delegate to [`PosService`] or
//! [`SyncReconciler`], convert the result. Trailing slashes on the
//! routes are part of the public paths.

use crate::error::ApiResult;
use crate::reconciler::SyncReconciler;
use crate::service::PosService;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use caja_core::ProductId;
use caja_protocol::{
    ProductBody, ProductListResponse, ProductPatchBody, ProductSyncRequest, ProductSyncResponse,
    ProductWrite, SaleBody, SaleCreateRequest, SaleListResponse, SaleSyncRequest,
    SaleSyncResponse,
};
use serde::Deserialize;
use uuid::Uuid;

/// Shared handler state.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) service: PosService,
    pub(crate) reconciler: SyncReconciler,
}

/// Builds the API router.
pub fn router(service: PosService, reconciler: SyncReconciler) -> Router {
    let state = AppState {
        service,
        reconciler,
    };
    Router::new()
        .route("/health", get(health))
        .route("/api/products/", get(list_products).post(create_product))
        .route(
            "/api/products/:id/",
            get(get_product)
                .put(replace_product)
                .patch(patch_product)
                .delete(delete_product),
        )
        .route("/api/sales/", get(list_sales).post(create_sale))
        .route("/api/sales/:uuid/", get(get_sale).delete(delete_sale))
        .route("/api/sales/:uuid/reactivate/", post(reactivate_sale))
        .route("/api/sync/sales/", post(sync_sales))
        .route("/api/sync/products/", post(sync_products))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
struct ProductListQuery {
    updated_after: Option<String>,
}

async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Json<ProductListResponse> {
    Json(state.service.list_products(query.updated_after.as_deref()))
}

async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<ProductWrite>,
) -> ApiResult<(StatusCode, Json<ProductBody>)> {
    let product = state.service.create_product(body)?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult<Json<ProductBody>> {
    Ok(Json(state.service.get_product(ProductId::new(id))?))
}

async fn replace_product(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(body): Json<ProductWrite>,
) -> ApiResult<Json<ProductBody>> {
    Ok(Json(state.service.replace_product(ProductId::new(id), body)?))
}

async fn patch_product(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(body): Json<ProductPatchBody>,
) -> ApiResult<Json<ProductBody>> {
    Ok(Json(state.service.patch_product(ProductId::new(id), body)?))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult<StatusCode> {
    state.service.delete_product(ProductId::new(id))?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct SaleListQuery {
    page: Option<u32>,
    page_size: Option<u32>,
}

async fn list_sales(
    State(state): State<AppState>,
    Query(query): Query<SaleListQuery>,
) -> Json<SaleListResponse> {
    Json(state.service.list_sales(query.page, query.page_size))
}

async fn create_sale(
    State(state): State<AppState>,
    Json(body): Json<SaleCreateRequest>,
) -> ApiResult<(StatusCode, Json<SaleBody>)> {
    let sale = state.service.create_sale(body)?;
    Ok((StatusCode::CREATED, Json(sale)))
}

async fn get_sale(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> ApiResult<Json<SaleBody>> {
    Ok(Json(state.service.get_sale(uuid)?))
}

async fn delete_sale(State(state): State<AppState>, Path(uuid): Path<Uuid>) -> ApiResult<StatusCode> {
    state.service.delete_sale(uuid)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reactivate_sale(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> ApiResult<Json<SaleBody>> {
    Ok(Json(state.service.reactivate_sale(uuid)?))
}

// A fully accepted batch is a creation; any rejection downgrades the
// status while the envelope still reports how much of the batch landed.
fn sync_status(success: bool) -> StatusCode {
    if success {
        StatusCode::CREATED
    } else {
        StatusCode::BAD_REQUEST
    }
}

async fn sync_sales(
    State(state): State<AppState>,
    Json(request): Json<SaleSyncRequest>,
) -> ApiResult<(StatusCode, Json<SaleSyncResponse>)> {
    let response = state.reconciler.sync_sales(request)?;
    Ok((sync_status(response.success), Json(response)))
}

async fn sync_products(
    State(state): State<AppState>,
    Json(request): Json<ProductSyncRequest>,
) -> ApiResult<(StatusCode, Json<ProductSyncResponse>)> {
    let response = state.reconciler.sync_products(request)?;
    Ok((sync_status(response.success), Json(response)))
}
