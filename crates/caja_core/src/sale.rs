//! Sale and sale-item entities.

use crate::types::ProductId;
use crate::validate::{Violation, Violations};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A line item inside a sale.
///
/// Items are owned exclusively by their parent sale and created
/// atomically with it; they are never updated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleItem {
    /// The product that was sold.
    pub product_id: ProductId,
    /// Units sold, always positive.
    pub quantity: i64,
    /// Total price of this line, always positive.
    pub total_price: Decimal,
}

/// A completed sale.
///
/// Sales are immutable once created, apart from the soft-delete flag
/// and its reversal.
#[derive(Debug, Clone, PartialEq)]
pub struct Sale {
    /// Unique sale id; client-generated for synced sales,
    /// server-generated otherwise.
    pub uuid: Uuid,
    /// Sale total, equal to the sum of item totals.
    pub total: Decimal,
    /// Creation time (server clock).
    pub created_at: DateTime<Utc>,
    /// Last modification time (server clock).
    pub updated_at: DateTime<Utc>,
    /// True if the sale was created on a device and merged via sync.
    pub synced_from_device: bool,
    /// Soft-delete flag.
    pub active: bool,
    /// Line items, in submission order.
    pub items: Vec<SaleItem>,
}

/// A line item of a sale awaiting application.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleItemDraft {
    /// The product being sold.
    pub product_id: ProductId,
    /// Units sold.
    pub quantity: i64,
    /// Total price of this line.
    pub total_price: Decimal,
}

/// A sale record awaiting application against the catalog.
///
/// [`validate`](SaleDraft::validate) covers the checks that need no
/// store state; product existence and stock sufficiency are checked by
/// the store while the sale is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleDraft {
    /// Sale id. Client devices submit their locally generated uuid so
    /// retries stay idempotent.
    pub uuid: Uuid,
    /// Claimed sale total.
    pub total: Decimal,
    /// Line items.
    pub items: Vec<SaleItemDraft>,
}

impl SaleDraft {
    /// Collects every shape-level failure in this record: non-positive
    /// total, missing or non-positive items, and a total that does not
    /// equal the sum of item totals.
    pub fn validate(&self) -> Violations {
        let mut violations = Violations::new();

        if self.total <= Decimal::ZERO {
            violations.push(Violation::new("total", "total must be greater than 0"));
        }
        if self.items.is_empty() {
            violations.push(Violation::new("items_data", "at least one item is required"));
        }

        let mut items_ok = true;
        for (index, item) in self.items.iter().enumerate() {
            if item.quantity <= 0 {
                items_ok = false;
                violations.push(Violation::new(
                    "items_data",
                    format!("item {index}: quantity must be greater than 0"),
                ));
            }
            if item.total_price <= Decimal::ZERO {
                items_ok = false;
                violations.push(Violation::new(
                    "items_data",
                    format!("item {index}: total_price must be greater than 0"),
                ));
            }
        }

        // Only compare the sum when the items themselves are plausible,
        // otherwise the mismatch message just repeats the item errors.
        if items_ok && !self.items.is_empty() {
            let sum: Decimal = self.items.iter().map(|item| item.total_price).sum();
            if sum != self.total {
                violations.push(Violation::new(
                    "total",
                    format!(
                        "total ({}) does not match the sum of items ({})",
                        self.total, sum
                    ),
                ));
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn item(product: u32, quantity: i64, total_price: &str) -> SaleItemDraft {
        SaleItemDraft {
            product_id: ProductId::new(product),
            quantity,
            total_price: dec(total_price),
        }
    }

    fn draft(total: &str, items: Vec<SaleItemDraft>) -> SaleDraft {
        SaleDraft {
            uuid: Uuid::new_v4(),
            total: dec(total),
            items,
        }
    }

    #[test]
    fn valid_sale_passes() {
        let sale = draft("100.00", vec![item(1, 2, "60.00"), item(2, 1, "40.00")]);
        assert!(sale.validate().is_empty());
    }

    #[test]
    fn total_mismatch_rejected() {
        let sale = draft("90.00", vec![item(1, 2, "60.00"), item(2, 1, "40.00")]);
        let violations = sale.validate();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "total");
        assert!(violations[0].message.contains("90.00"));
        assert!(violations[0].message.contains("100.00"));
    }

    #[test]
    fn empty_items_rejected() {
        let sale = draft("10.00", vec![]);
        let violations = sale.validate();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "items_data");
    }

    #[test]
    fn non_positive_quantity_rejected() {
        let sale = draft("10.00", vec![item(1, 0, "10.00")]);
        let violations = sale.validate();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("quantity"));
    }

    #[test]
    fn bad_items_suppress_sum_check() {
        // The total would also mismatch, but the quantity error is the
        // actionable one.
        let sale = draft("10.00", vec![item(1, -1, "3.00")]);
        let violations = sale.validate();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "items_data");
    }

    #[test]
    fn zero_total_rejected() {
        let sale = draft("0.00", vec![item(1, 1, "0.00")]);
        let fields: Vec<_> = sale
            .validate()
            .into_iter()
            .map(|violation| violation.field)
            .collect();
        assert!(fields.contains(&"total".to_string()));
        assert!(fields.contains(&"items_data".to_string()));
    }
}
