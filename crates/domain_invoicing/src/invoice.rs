//! Invoice records, drafts, and updates
//!
//! A draft is what a caller submits; an [`Invoice`] is the stored record
//! carrying the computed totals. Totals on the record are only ever written
//! by the calculator.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{ClientId, InvoiceId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculator::{calculate_invoice_totals, calculate_total, ensure_in_range, sum_line_items, InvoiceTotals};
use crate::discount::{Discount, DiscountKind};
use crate::error::InvoicingError;
use crate::line_item::{LineItem, StoredLineItem};
use crate::status::{is_overdue, InvoiceStatus};

/// Formats an invoice number, e.g. `INV-2024-0007`
pub fn format_invoice_number(year: i32, sequence: u32) -> String {
    format!("INV-{}-{:04}", year, sequence)
}

/// Payload for creating an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub client_id: ClientId,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub payment_terms: String,
    /// Percent, conventionally 0 to 100
    pub tax_rate: Decimal,
    #[serde(flatten)]
    pub discount: Discount,
    #[serde(default)]
    pub notes: Option<String>,
    pub line_items: Vec<LineItem>,
}

impl InvoiceDraft {
    /// Totals this draft would be stored with
    pub fn totals(&self) -> InvoiceTotals {
        calculate_invoice_totals(self)
    }

    /// [`InvoiceDraft::totals`], rejecting amounts that overflowed
    pub fn checked_totals(&self) -> Result<InvoiceTotals, InvoicingError> {
        ensure_in_range(&self.line_items, self.totals())
    }
}

/// Partial update; absent fields are left unchanged
///
/// The discount arrives as its two wire halves. If either half is present
/// the missing one is taken from the stored discount before the pair is
/// collapsed again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceUpdate {
    pub client_id: Option<ClientId>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub payment_terms: Option<String>,
    pub tax_rate: Option<Decimal>,
    pub discount_type: Option<DiscountKind>,
    pub discount_value: Option<Decimal>,
    pub notes: Option<String>,
    pub line_items: Option<Vec<LineItem>>,
    pub status: Option<InvoiceStatus>,
}

impl InvoiceUpdate {
    pub fn status(status: InvoiceStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Returns the discount after merging with `current`, if the update touches it
    fn merged_discount(&self, current: &Discount) -> Option<Discount> {
        if self.discount_type.is_none() && self.discount_value.is_none() {
            return None;
        }
        Some(Discount::from_parts(
            self.discount_type.or(current.kind()),
            self.discount_value.or(current.value()),
        ))
    }
}

/// A stored invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub client_id: ClientId,
    pub status: InvoiceStatus,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub payment_terms: String,
    pub line_items: Vec<StoredLineItem>,
    pub tax_rate: Decimal,
    #[serde(flatten)]
    pub discount: Discount,
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Creates a draft-status invoice from a submitted draft
    pub fn from_draft(draft: InvoiceDraft, invoice_number: impl Into<String>, now: DateTime<Utc>) -> Self {
        let totals = calculate_invoice_totals(&draft);
        let mut invoice = Self {
            id: InvoiceId::new_v7(),
            invoice_number: invoice_number.into(),
            client_id: draft.client_id,
            status: InvoiceStatus::Draft,
            issue_date: draft.issue_date,
            due_date: draft.due_date,
            payment_terms: draft.payment_terms,
            line_items: draft.line_items.into_iter().map(StoredLineItem::from_item).collect(),
            tax_rate: draft.tax_rate,
            discount: draft.discount,
            subtotal: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            total: Decimal::ZERO,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        };
        invoice.set_totals(totals);
        invoice
    }

    /// The stored totals
    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals {
            subtotal: self.subtotal,
            discount_amount: self.discount_amount,
            tax_amount: self.tax_amount,
            total: self.total,
        }
    }

    /// Fails if a stored line amount or total sits at the edge of the decimal range
    pub fn check_amounts(&self) -> Result<(), InvoicingError> {
        ensure_in_range(&self.items(), self.totals()).map(|_| ())
    }

    /// Line items without their storage metadata
    pub fn items(&self) -> Vec<LineItem> {
        self.line_items.iter().map(|stored| stored.item.clone()).collect()
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        is_overdue(self.status, self.due_date, today)
    }

    /// Applies a partial update, recalculating totals when pricing changes
    ///
    /// New line items trigger a full recalculation from quantities and
    /// rates. A tax or discount change alone reuses the stored subtotal.
    pub fn apply_update(&mut self, update: InvoiceUpdate, now: DateTime<Utc>) {
        let new_discount = update.merged_discount(&self.discount);
        let pricing_changed = update.line_items.is_some() || update.tax_rate.is_some() || new_discount.is_some();

        if let Some(client_id) = update.client_id {
            self.client_id = client_id;
        }
        if let Some(issue_date) = update.issue_date {
            self.issue_date = issue_date;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(payment_terms) = update.payment_terms {
            self.payment_terms = payment_terms;
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(tax_rate) = update.tax_rate {
            self.tax_rate = tax_rate;
        }
        if let Some(discount) = new_discount {
            self.discount = discount;
        }

        if pricing_changed {
            let subtotal = match update.line_items {
                Some(items) => {
                    let subtotal = sum_line_items(&items);
                    self.line_items = items.into_iter().map(StoredLineItem::from_item).collect();
                    subtotal
                }
                None => self.subtotal,
            };
            self.set_totals(calculate_total(subtotal, self.tax_rate, &self.discount));
        }

        self.updated_at = now;
    }

    fn set_totals(&mut self, totals: InvoiceTotals) {
        self.subtotal = totals.subtotal;
        self.discount_amount = totals.discount_amount;
        self.tax_amount = totals.tax_amount;
        self.total = totals.total;
    }
}
