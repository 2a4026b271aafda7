//! End-to-end tests over the HTTP surface.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use caja_server::{router, PosService, ServerConfig, SyncReconciler};
use caja_testkit::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(catalog: &TestCatalog) -> Router {
    let config = ServerConfig::default();
    let clock: Arc<dyn caja_core::Clock> = catalog.clock.clone();
    let service = PosService::new(catalog.store.clone(), clock.clone(), config.clone());
    let reconciler = SyncReconciler::new(catalog.store.clone(), clock, &config);
    router(service, reconciler)
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string())),
        None => Request::builder().method(method).uri(uri).body(Body::empty()),
    }
    .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_endpoint() {
    let catalog = TestCatalog::empty();
    let (status, _) = send(app(&catalog), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn product_crud_lifecycle() {
    let catalog = TestCatalog::empty();

    let (status, created) = send(
        app(&catalog),
        "POST",
        "/api/products/",
        Some(json!({"name": "Coffee", "price": "50.00", "stock": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["price"], json!("50.00"));
    let id = created["id"].as_u64().unwrap();

    let (status, fetched) = send(app(&catalog), "GET", &format!("/api/products/{id}/"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], json!("Coffee"));

    let (status, patched) = send(
        app(&catalog),
        "PATCH",
        &format!("/api/products/{id}/"),
        Some(json!({"stock": 42})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["stock"], json!(42));
    assert_eq!(patched["name"], json!("Coffee"));

    let (status, _) = send(app(&catalog), "DELETE", &format!("/api/products/{id}/"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(app(&catalog), "GET", &format!("/api/products/{id}/"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_product_reports_field_errors() {
    let catalog = TestCatalog::empty();
    let (status, body) = send(
        app(&catalog),
        "POST",
        "/api/products/",
        Some(json!({"name": "  ", "price": "0", "stock": -1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("name").is_some());
    assert!(body.get("price").is_some());
    assert!(body.get("stock").is_some());
}

#[tokio::test]
async fn product_listing_honors_updated_after() {
    let catalog = TestCatalog::with_products(3);

    let (status, all) = send(app(&catalog), "GET", "/api/products/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["count"], json!(3));
    assert!(all.get("sync_timestamp").is_some());

    // Products are seeded one second apart starting at the epoch; a
    // watermark at epoch+1 keeps only the third.
    let (_, filtered) = send(
        app(&catalog),
        "GET",
        "/api/products/?updated_after=2024-01-01T00:00:01Z",
        None,
    )
    .await;
    assert_eq!(filtered["count"], json!(1));
    assert_eq!(filtered["results"][0]["name"], json!("Product 2"));

    // Unix epoch floats are accepted too.
    let (_, epoch_filtered) = send(
        app(&catalog),
        "GET",
        "/api/products/?updated_after=1704067201.0",
        None,
    )
    .await;
    assert_eq!(epoch_filtered["count"], json!(1));

    // Garbage watermarks fall back to the full listing.
    let (status, unfiltered) = send(
        app(&catalog),
        "GET",
        "/api/products/?updated_after=garbage",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unfiltered["count"], json!(3));
}

#[tokio::test]
async fn sale_creation_deducts_stock() {
    let catalog = TestCatalog::with_products(1);
    let id = catalog.product_ids[0].get();

    let (status, sale) = send(
        app(&catalog),
        "POST",
        "/api/sales/",
        Some(json!({
            "total": "20.00",
            "items_data": [{"product_id": id, "quantity": 2, "total_price": "20.00"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sale["synced_from_device"], json!(false));
    assert_eq!(sale["items"][0]["product_name"], json!("Product 0"));

    let (_, product) = send(app(&catalog), "GET", &format!("/api/products/{id}/"), None).await;
    assert_eq!(product["stock"], json!(98));
}

#[tokio::test]
async fn sale_total_mismatch_is_rejected() {
    let catalog = TestCatalog::with_products(1);
    let id = catalog.product_ids[0].get();

    let (status, body) = send(
        app(&catalog),
        "POST",
        "/api/sales/",
        Some(json!({
            "total": "99.00",
            "items_data": [{"product_id": id, "quantity": 2, "total_price": "20.00"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("total").is_some());
}

#[tokio::test]
async fn sale_delete_and_reactivate() {
    let catalog = TestCatalog::with_products(1);
    let id = catalog.product_ids[0].get();

    let (_, sale) = send(
        app(&catalog),
        "POST",
        "/api/sales/",
        Some(json!({
            "total": "10.00",
            "items_data": [{"product_id": id, "quantity": 1, "total_price": "10.00"}]
        })),
    )
    .await;
    let uuid = sale["uuid"].as_str().unwrap().to_string();

    let (status, _) = send(app(&catalog), "DELETE", &format!("/api/sales/{uuid}/"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, product) = send(app(&catalog), "GET", &format!("/api/products/{id}/"), None).await;
    assert_eq!(product["stock"], json!(100));

    let (status, reactivated) = send(
        app(&catalog),
        "POST",
        &format!("/api/sales/{uuid}/reactivate/"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reactivated["active"], json!(true));
    let (_, product) = send(app(&catalog), "GET", &format!("/api/products/{id}/"), None).await;
    assert_eq!(product["stock"], json!(99));
}

#[tokio::test]
async fn sale_listing_is_paginated() {
    let catalog = TestCatalog::with_products(1);
    let id = catalog.product_ids[0].get();
    for _ in 0..3 {
        send(
            app(&catalog),
            "POST",
            "/api/sales/",
            Some(json!({
                "total": "10.00",
                "items_data": [{"product_id": id, "quantity": 1, "total_price": "10.00"}]
            })),
        )
        .await;
    }

    let (status, page) = send(app(&catalog), "GET", "/api/sales/?page=1&page_size=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["count"], json!(3));
    assert_eq!(page["results"].as_array().unwrap().len(), 2);

    let (_, last) = send(app(&catalog), "GET", "/api/sales/?page=2&page_size=2", None).await;
    assert_eq!(last["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn sync_endpoint_merges_device_sales() {
    let catalog = TestCatalog::with_products(1);
    let id = catalog.product_ids[0].get();
    let uuid = "5f0c54d1-9bbd-4b7c-8a2f-0e6c29b7f0aa";
    let batch = json!({
        "sales": [{
            "uuid": uuid,
            "total": "20.00",
            "items_data": [{"product_id": id, "quantity": 2, "total_price": "20.00"}]
        }]
    });

    let (status, body) = send(app(&catalog), "POST", "/api/sync/sales/", Some(batch.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["synced_count"], json!(1));
    assert_eq!(body["sales"][0]["synced_from_device"], json!(true));
    assert!(body.get("errors").is_none());
    assert!(body.get("sync_timestamp").is_some());

    // The same batch again counts as synced without double-deducting.
    let (_, again) = send(app(&catalog), "POST", "/api/sync/sales/", Some(batch)).await;
    assert_eq!(again["success"], json!(true));
    assert_eq!(again["synced_count"], json!(1));
    let (_, product) = send(app(&catalog), "GET", &format!("/api/products/{id}/"), None).await;
    assert_eq!(product["stock"], json!(98));
}

#[tokio::test]
async fn sync_reports_per_record_errors_in_order() {
    let catalog = TestCatalog::with_products(1);
    let id = catalog.product_ids[0].get();
    let batch = json!({
        "sales": [
            {
                "uuid": "11111111-1111-1111-1111-111111111111",
                "total": "10.00",
                "items_data": [{"product_id": id, "quantity": 1, "total_price": "10.00"}]
            },
            {
                "uuid": "22222222-2222-2222-2222-222222222222",
                "total": "10.00",
                "items_data": [{"product_id": 999, "quantity": 1, "total_price": "10.00"}]
            }
        ]
    });

    let (status, body) = send(app(&catalog), "POST", "/api/sync/sales/", Some(batch)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["synced_count"], json!(1));
    assert!(body.get("sales").is_none());
    let slots = body["errors"]["sales"].as_array().unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0], json!({}));
    assert!(slots[1].get("items_data").is_some());
}

#[tokio::test]
async fn sync_rejects_empty_batch() {
    let catalog = TestCatalog::empty();
    let (status, body) = send(
        app(&catalog),
        "POST",
        "/api/sync/sales/",
        Some(json!({"sales": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("sales").is_some());
}

#[tokio::test]
async fn product_sync_upserts_device_edits() {
    let catalog = TestCatalog::empty();
    let (status, body) = send(
        app(&catalog),
        "POST",
        "/api/sync/products/",
        Some(json!({
            "products": [{
                "id": 7,
                "name": "Sugar",
                "price": "1.20",
                "stock": 9,
                "updated_at": "2024-01-01T12:00:00Z"
            }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));

    let (_, product) = send(app(&catalog), "GET", "/api/products/7/", None).await;
    assert_eq!(product["name"], json!("Sugar"));
    assert_eq!(product["stock"], json!(9));
}
