//! Custom Test Assertions
//!
//! Assertion helpers for invoice figures that report every value involved
//! when they fail.

use domain_invoicing::{Invoice, InvoiceTotals};

/// Asserts `total == (subtotal - discount_amount) + tax_amount` exactly
pub fn assert_totals_identity(totals: &InvoiceTotals) {
    let expected = totals.subtotal - totals.discount_amount + totals.tax_amount;
    assert_eq!(
        totals.total, expected,
        "Total identity broken: subtotal={}, discount={}, tax={}, total={}",
        totals.subtotal, totals.discount_amount, totals.tax_amount, totals.total
    );
}

/// Asserts the stored snapshot on each line item matches quantity × rate
pub fn assert_line_amounts_consistent(invoice: &Invoice) {
    for stored in &invoice.line_items {
        assert_eq!(
            stored.amount,
            stored.item.amount(),
            "Stale amount on line item {} ({}): stored={}, quantity={}, rate={}",
            stored.id,
            stored.item.description,
            stored.amount,
            stored.item.quantity,
            stored.item.rate
        );
    }
}
