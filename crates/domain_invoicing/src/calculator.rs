//! Invoice totals engine
//!
//! Pure functions, no state. Every figure is carried at full decimal
//! precision; rounding to a currency's minor unit is left to whoever stores
//! or displays the result (see [`InvoiceTotals::rounded`]).
//!
//! Arithmetic saturates at `Decimal::MAX` / `Decimal::MIN` instead of
//! panicking. A saturated figure is meaningless, so anything that stores or
//! reports totals goes through [`ensure_in_range`] first.

use core_kernel::{Currency, Money, Percentage};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::discount::{Discount, DiscountKind};
use crate::error::InvoicingError;
use crate::invoice::InvoiceDraft;
use crate::line_item::LineItem;

/// The four figures computed for every invoice
///
/// `total == (subtotal - discount_amount) + tax_amount` holds exactly for
/// values produced by [`calculate_total`] as long as none of them
/// saturated. `discount_amount <= subtotal` is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

impl InvoiceTotals {
    /// Subtotal less discount, the base tax is charged on
    pub fn after_discount(&self) -> Decimal {
        self.subtotal.saturating_sub(self.discount_amount)
    }

    /// True when any figure overflowed and was clamped to the decimal range
    pub fn is_saturated(&self) -> bool {
        [self.subtotal, self.discount_amount, self.tax_amount, self.total]
            .into_iter()
            .any(at_range_limit)
    }

    /// Rounds each figure to `dp` places, half away from zero
    ///
    /// Meant for fixed-scale storage columns. The fields are rounded
    /// independently, so the total identity can be off by one unit in the
    /// last place afterwards.
    pub fn rounded(&self, dp: u32) -> Self {
        let round = |d: Decimal| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        Self {
            subtotal: round(self.subtotal),
            discount_amount: round(self.discount_amount),
            tax_amount: round(self.tax_amount),
            total: round(self.total),
        }
    }

    /// Attaches a currency to each figure
    pub fn in_currency(&self, currency: Currency) -> MoneyTotals {
        MoneyTotals {
            subtotal: Money::new(self.subtotal, currency),
            discount_amount: Money::new(self.discount_amount, currency),
            tax_amount: Money::new(self.tax_amount, currency),
            total: Money::new(self.total, currency),
        }
    }
}

/// [`InvoiceTotals`] with a currency attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyTotals {
    pub subtotal: Money,
    pub discount_amount: Money,
    pub tax_amount: Money,
    pub total: Money,
}

fn at_range_limit(value: Decimal) -> bool {
    value == Decimal::MAX || value == Decimal::MIN
}

/// Sum of `quantity × rate` over all items; zero for no items
pub fn sum_line_items(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .map(LineItem::amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Discount amount for `amount` given the two optional wire fields
///
/// Returns zero when either field is missing or the value is zero.
pub fn apply_discount(amount: Decimal, kind: Option<DiscountKind>, value: Option<Decimal>) -> Decimal {
    Discount::from_parts(kind, value).amount_off(amount)
}

/// `amount × tax_rate_percent / 100`, no clamping of the rate
pub fn calculate_tax(amount: Decimal, tax_rate_percent: Decimal) -> Decimal {
    Percentage::new(tax_rate_percent).of(amount)
}

/// Computes all four totals from a known subtotal
///
/// Tax is charged on the discounted amount, never on the raw subtotal.
pub fn calculate_total(subtotal: Decimal, tax_rate_percent: Decimal, discount: &Discount) -> InvoiceTotals {
    let discount_amount = discount.amount_off(subtotal);
    let after_discount = subtotal.saturating_sub(discount_amount);
    let tax_amount = calculate_tax(after_discount, tax_rate_percent);
    let total = after_discount.saturating_add(tax_amount);

    trace!(
        %subtotal,
        %tax_rate_percent,
        %discount_amount,
        %tax_amount,
        %total,
        "calculated invoice totals"
    );

    InvoiceTotals {
        subtotal,
        discount_amount,
        tax_amount,
        total,
    }
}

/// Computes totals for a draft: sums its line items, then [`calculate_total`]
pub fn calculate_invoice_totals(draft: &InvoiceDraft) -> InvoiceTotals {
    let subtotal = sum_line_items(&draft.line_items);
    calculate_total(subtotal, draft.tax_rate, &draft.discount)
}

/// Passes `totals` through unless a line amount or a total overflowed
pub fn ensure_in_range(items: &[LineItem], totals: InvoiceTotals) -> Result<InvoiceTotals, InvoicingError> {
    if totals.is_saturated() || items.iter().any(|item| at_range_limit(item.amount())) {
        return Err(InvoicingError::AmountOutOfRange);
    }
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(quantity: Decimal, rate: Decimal) -> LineItem {
        LineItem::new("Item", quantity, rate)
    }

    #[test]
    fn test_sum_line_items() {
        assert_eq!(sum_line_items(&[]), dec!(0));
        assert_eq!(
            sum_line_items(&[
                LineItem::new("Web Design", dec!(10), dec!(150)),
                LineItem::new("Hosting", dec!(1), dec!(99)),
            ]),
            dec!(1599)
        );
        assert_eq!(sum_line_items(&[item(dec!(2.5), dec!(100.50))]), dec!(251.25));
    }

    #[test]
    fn test_apply_discount() {
        assert_eq!(apply_discount(dec!(1000), Some(DiscountKind::Percentage), Some(dec!(10))), dec!(100));
        assert_eq!(apply_discount(dec!(1000), Some(DiscountKind::Percentage), Some(dec!(15))), dec!(150));
        assert_eq!(apply_discount(dec!(1000), Some(DiscountKind::Fixed), Some(dec!(50))), dec!(50));
        assert_eq!(apply_discount(dec!(1000), Some(DiscountKind::Fixed), Some(dec!(200))), dec!(200));
    }

    #[test]
    fn test_apply_discount_missing_fields() {
        assert_eq!(apply_discount(dec!(1000), None, Some(dec!(10))), dec!(0));
        assert_eq!(apply_discount(dec!(1000), Some(DiscountKind::Percentage), None), dec!(0));
        assert_eq!(apply_discount(dec!(1000), None, None), dec!(0));
    }

    #[test]
    fn test_calculate_tax() {
        assert_eq!(calculate_tax(dec!(1000), dec!(8.5)), dec!(85));
        assert_eq!(calculate_tax(dec!(100), dec!(10)), dec!(10));
        assert_eq!(calculate_tax(dec!(1000), dec!(0)), dec!(0));
    }

    #[test]
    fn test_calculate_total_percentage_discount() {
        let totals = calculate_total(dec!(1000), dec!(8.5), &Discount::Percentage(dec!(10)));
        assert_eq!(totals.subtotal, dec!(1000));
        assert_eq!(totals.discount_amount, dec!(100));
        // (1000 - 100) * 0.085, not 1000 * 0.085
        assert_eq!(totals.tax_amount, dec!(76.5));
        assert_eq!(totals.total, dec!(976.5));
    }

    #[test]
    fn test_calculate_total_fixed_discount() {
        let totals = calculate_total(dec!(1000), dec!(10), &Discount::Fixed(dec!(50)));
        assert_eq!(totals.discount_amount, dec!(50));
        assert_eq!(totals.tax_amount, dec!(95));
        assert_eq!(totals.total, dec!(1045));
    }

    #[test]
    fn test_calculate_total_no_discount() {
        let totals = calculate_total(dec!(1000), dec!(8.5), &Discount::None);
        assert_eq!(totals.discount_amount, dec!(0));
        assert_eq!(totals.tax_amount, dec!(85));
        assert_eq!(totals.total, dec!(1085));
    }

    #[test]
    fn test_fixed_discount_larger_than_subtotal_goes_negative() {
        let totals = calculate_total(dec!(100), dec!(10), &Discount::Fixed(dec!(150)));
        assert_eq!(totals.after_discount(), dec!(-50));
        assert_eq!(totals.tax_amount, dec!(-5));
        assert_eq!(totals.total, dec!(-55));
    }

    #[test]
    fn test_rounded_for_storage() {
        let totals = InvoiceTotals {
            subtotal: dec!(1250),
            discount_amount: dec!(125),
            tax_amount: dec!(95.625),
            total: dec!(1220.625),
        };
        let rounded = totals.rounded(2);
        assert_eq!(rounded.tax_amount, dec!(95.63));
        assert_eq!(rounded.total, dec!(1220.63));
        assert_eq!(rounded.subtotal, dec!(1250));
    }

    #[test]
    fn test_in_currency() {
        let totals = calculate_total(dec!(1000), dec!(8.5), &Discount::None);
        let money = totals.in_currency(Currency::EUR);
        assert_eq!(money.total.amount(), dec!(1085));
        assert_eq!(money.total.currency(), Currency::EUR);
    }

    fn huge() -> Decimal {
        Decimal::from(1_000_000_000_000_000i64)
    }

    #[test]
    fn test_overflowing_line_amount_saturates() {
        let items = [LineItem::new("Big", huge(), huge())];
        assert_eq!(sum_line_items(&items), Decimal::MAX);

        let totals = calculate_total(sum_line_items(&items), dec!(8.5), &Discount::Percentage(dec!(10)));
        assert!(totals.is_saturated());
        assert!(matches!(ensure_in_range(&items, totals), Err(InvoicingError::AmountOutOfRange)));
    }

    #[test]
    fn test_tax_on_large_subtotal_scales_before_overflowing() {
        // 7e27 * 20 overflows, 7e27 / 100 * 20 does not
        let subtotal = Decimal::from(7_000_000_000_000i64) * Decimal::from(1_000_000_000_000_000i64);
        assert_eq!(calculate_tax(subtotal, dec!(20)), subtotal / dec!(5));
    }

    #[test]
    fn test_ordinary_totals_are_in_range() {
        let items = [LineItem::new("Consulting", dec!(10), dec!(100))];
        let totals = calculate_total(sum_line_items(&items), dec!(10), &Discount::Fixed(dec!(50)));
        assert!(!totals.is_saturated());
        assert_eq!(ensure_in_range(&items, totals).unwrap(), totals);
    }
}
