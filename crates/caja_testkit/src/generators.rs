//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random catalog data that
//! maintains the invariants the store expects of well-formed input.

use caja_core::{ProductDraft, SaleDraft, SaleItemDraft};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Strategy for generating product display names.
pub fn product_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9 ]{0,30}")
        .expect("valid regex")
        .prop_map(|name| name.trim().to_string())
        .prop_filter("name must not be blank", |name| !name.is_empty())
}

/// Strategy for generating positive money amounts with two decimal
/// places, up to 10 000.00.
pub fn money_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for generating positive sale quantities.
pub fn quantity_strategy() -> impl Strategy<Value = i64> {
    1i64..=20
}

/// Strategy for generating valid product drafts.
pub fn product_draft_strategy() -> impl Strategy<Value = ProductDraft> {
    (
        product_name_strategy(),
        prop::option::of(prop::string::string_regex("[a-z ]{1,40}").expect("valid regex")),
        money_strategy(),
        0i64..=10_000,
    )
        .prop_map(|(name, description, price, stock)| ProductDraft {
            name,
            description,
            qr_code: None,
            price,
            stock,
        })
}

/// Strategy for generating uuids.
pub fn uuid_strategy() -> impl Strategy<Value = Uuid> {
    prop::array::uniform16(any::<u8>()).prop_map(Uuid::from_bytes)
}

/// Strategy for generating well-shaped sale drafts against a catalog
/// of `product_count` products with ids 1..=product_count.
///
/// The generated total always equals the sum of the item totals, so
/// rejections can only come from catalog checks (missing products or
/// insufficient stock), never from shape validation.
pub fn sale_draft_strategy(product_count: u32) -> impl Strategy<Value = SaleDraft> {
    let item = (1..=product_count, quantity_strategy(), money_strategy()).prop_map(
        |(product_id, quantity, unit_price)| SaleItemDraft {
            product_id: caja_core::ProductId::new(product_id),
            quantity,
            total_price: unit_price * Decimal::from(quantity),
        },
    );
    (uuid_strategy(), prop::collection::vec(item, 1..5)).prop_map(|(uuid, items)| {
        let total = items.iter().map(|item| item.total_price).sum();
        SaleDraft { uuid, total, items }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn product_drafts_pass_validation(draft in product_draft_strategy()) {
            prop_assert!(draft.validate().is_empty());
        }

        #[test]
        fn sale_drafts_pass_shape_validation(draft in sale_draft_strategy(5)) {
            prop_assert!(draft.validate().is_empty());
        }

        #[test]
        fn money_is_positive(amount in money_strategy()) {
            prop_assert!(amount > Decimal::ZERO);
        }
    }
}
