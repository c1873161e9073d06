//! Invoice line items

use core_kernel::LineItemId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One billable row on an invoice
///
/// The engine trusts the caller for ranges: quantity is expected to be
/// positive and rate non-negative, but neither is checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: Decimal, rate: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            rate,
        }
    }

    /// `quantity × rate`, recomputed on every call
    ///
    /// Clamps to the decimal range on overflow.
    pub fn amount(&self) -> Decimal {
        self.quantity.saturating_mul(self.rate)
    }
}

/// A line item as persisted alongside its invoice
///
/// `amount` is a snapshot written when the invoice totals were last
/// computed; recalculation always goes back to quantity and rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredLineItem {
    pub id: LineItemId,
    #[serde(flatten)]
    pub item: LineItem,
    pub amount: Decimal,
}

impl StoredLineItem {
    pub fn from_item(item: LineItem) -> Self {
        Self {
            id: LineItemId::new_v7(),
            amount: item.amount(),
            item,
        }
    }
}
