//! Property-Based Test Generators
//!
//! Proptest strategies for invoicing inputs. Ranges stay inside what the
//! engine is expected to see: positive quantities, non-negative rates,
//! and percentages between 0 and 100.

use chrono::NaiveDate;
use domain_invoicing::{Discount, InvoiceStatus, LineItem};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for percentages from 0.00 to 100.00
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10000u32).prop_map(|n| Decimal::new(n as i64, 2))
}

/// Strategy for quantities from 0.01 to 10,000.00
pub fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for unit rates from 0.00 to 100,000.00
pub fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

pub fn line_item_strategy() -> impl Strategy<Value = LineItem> {
    ("[A-Za-z ]{1,24}", quantity_strategy(), rate_strategy())
        .prop_map(|(description, quantity, rate)| LineItem::new(description, quantity, rate))
}

/// Up to 20 line items, possibly none
pub fn line_items_strategy() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(line_item_strategy(), 0..20)
}

/// Any discount, including none
pub fn discount_strategy() -> impl Strategy<Value = Discount> {
    prop_oneof![
        Just(Discount::None),
        percentage_strategy().prop_map(Discount::Percentage),
        rate_strategy().prop_map(Discount::Fixed),
    ]
}

pub fn status_strategy() -> impl Strategy<Value = InvoiceStatus> {
    prop::sample::select(InvoiceStatus::ALL.to_vec())
}

/// Dates across 2020 to 2030
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..4018i64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_generated_items_are_in_range(item in line_item_strategy()) {
            prop_assert!(item.quantity > Decimal::ZERO);
            prop_assert!(item.rate >= Decimal::ZERO);
        }

        #[test]
        fn test_generated_percentages_are_bounded(p in percentage_strategy()) {
            prop_assert!(p >= Decimal::ZERO && p <= Decimal::ONE_HUNDRED);
        }
    }
}
