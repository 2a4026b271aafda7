//! Sale wire types.

use caja_core::{ProductId, Sale, SaleItem};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sale line item as it appears in responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItemBody {
    /// Catalog id of the product sold.
    pub product_id: ProductId,
    /// Product display name at response time; null if the product row
    /// has vanished (which soft delete prevents).
    pub product_name: Option<String>,
    /// Units sold.
    pub quantity: i64,
    /// Total price of this line as a decimal string.
    pub total_price: Decimal,
}

/// Sale as it appears in responses, with nested items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleBody {
    /// Unique sale id.
    pub uuid: Uuid,
    /// Sale total as a decimal string.
    pub total: Decimal,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// True if the sale was merged from a device.
    pub synced_from_device: bool,
    /// Soft-delete flag.
    pub active: bool,
    /// Line items, in submission order.
    pub items: Vec<SaleItemBody>,
}

impl SaleBody {
    /// Builds the response body for a sale, resolving product names
    /// through the given lookup.
    pub fn from_sale<F>(sale: Sale, mut product_name: F) -> Self
    where
        F: FnMut(ProductId) -> Option<String>,
    {
        Self {
            uuid: sale.uuid,
            total: sale.total,
            created_at: sale.created_at,
            updated_at: sale.updated_at,
            synced_from_device: sale.synced_from_device,
            active: sale.active,
            items: sale
                .items
                .into_iter()
                .map(|item: SaleItem| SaleItemBody {
                    product_name: product_name(item.product_id),
                    product_id: item.product_id,
                    quantity: item.quantity,
                    total_price: item.total_price,
                })
                .collect(),
        }
    }
}

/// One line item in a sale create or sync request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItemWrite {
    /// Catalog id of the product.
    pub product_id: ProductId,
    /// Units sold.
    pub quantity: i64,
    /// Total price of this line.
    pub total_price: Decimal,
}

/// Request body for `POST /api/sales/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleCreateRequest {
    /// Claimed sale total; must equal the sum of item totals.
    pub total: Decimal,
    /// Line items.
    pub items_data: Vec<SaleItemWrite>,
}

/// Envelope for `GET /api/sales/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleListResponse {
    /// Total number of active sales (not the window size).
    pub count: usize,
    /// The requested page, newest first.
    pub results: Vec<SaleBody>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_parses_spec_example() {
        let request: SaleCreateRequest = serde_json::from_str(
            r#"{"total": "100.00", "items_data": [{"product_id": 1, "quantity": 2, "total_price": "100.00"}]}"#,
        )
        .unwrap();
        assert_eq!(request.total, "100.00".parse().unwrap());
        assert_eq!(request.items_data.len(), 1);
        assert_eq!(request.items_data[0].product_id, ProductId::new(1));
        assert_eq!(request.items_data[0].quantity, 2);
    }

    #[test]
    fn sale_body_resolves_product_names() {
        let sale = Sale {
            uuid: Uuid::new_v4(),
            total: "10.00".parse().unwrap(),
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            updated_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            synced_from_device: true,
            active: true,
            items: vec![SaleItem {
                product_id: ProductId::new(1),
                quantity: 2,
                total_price: "10.00".parse().unwrap(),
            }],
        };
        let body = SaleBody::from_sale(sale, |_| Some("Coffee".to_string()));
        assert_eq!(body.items[0].product_name.as_deref(), Some("Coffee"));
    }
}
