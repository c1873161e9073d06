//! Test Data Builders
//!
//! Builders with sensible defaults so tests only spell out the fields they
//! care about.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::ClientId;
use domain_invoicing::{Discount, Invoice, InvoiceDraft, InvoiceStatus, LineItem};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{IdFixtures, LineItemFixtures, TemporalFixtures};

/// Builder for [`InvoiceDraft`]
///
/// Defaults: Net 30 from 2024-01-01, 8.5% tax, 10% discount, and the two
/// service line items, which price to a total of 1220.625.
pub struct TestInvoiceDraftBuilder {
    client_id: ClientId,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    payment_terms: String,
    tax_rate: Decimal,
    discount: Discount,
    notes: Option<String>,
    line_items: Vec<LineItem>,
}

impl Default for TestInvoiceDraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestInvoiceDraftBuilder {
    pub fn new() -> Self {
        Self {
            client_id: IdFixtures::client_id(),
            issue_date: TemporalFixtures::issue_date(),
            due_date: TemporalFixtures::due_date(),
            payment_terms: "Net 30".to_string(),
            tax_rate: dec!(8.5),
            discount: Discount::Percentage(dec!(10)),
            notes: None,
            line_items: LineItemFixtures::services(),
        }
    }

    pub fn with_client_id(mut self, client_id: ClientId) -> Self {
        self.client_id = client_id;
        self
    }

    pub fn with_issue_date(mut self, date: NaiveDate) -> Self {
        self.issue_date = date;
        self
    }

    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = date;
        self
    }

    pub fn with_tax_rate(mut self, rate: Decimal) -> Self {
        self.tax_rate = rate;
        self
    }

    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = discount;
        self
    }

    pub fn without_discount(self) -> Self {
        self.with_discount(Discount::None)
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_line_items(mut self, items: Vec<LineItem>) -> Self {
        self.line_items = items;
        self
    }

    /// Appends a line item to the current list
    pub fn with_line_item(mut self, description: &str, quantity: Decimal, rate: Decimal) -> Self {
        self.line_items.push(LineItem::new(description, quantity, rate));
        self
    }

    pub fn build(self) -> InvoiceDraft {
        InvoiceDraft {
            client_id: self.client_id,
            issue_date: self.issue_date,
            due_date: self.due_date,
            payment_terms: self.payment_terms,
            tax_rate: self.tax_rate,
            discount: self.discount,
            notes: self.notes,
            line_items: self.line_items,
        }
    }
}

/// Builder for stored [`Invoice`] records, bypassing the service
pub struct TestInvoiceBuilder {
    draft: TestInvoiceDraftBuilder,
    invoice_number: String,
    status: InvoiceStatus,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Default for TestInvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestInvoiceBuilder {
    pub fn new() -> Self {
        Self {
            draft: TestInvoiceDraftBuilder::new(),
            invoice_number: "INV-2024-0001".to_string(),
            status: InvoiceStatus::Draft,
            created_at: TemporalFixtures::created_at(),
            updated_at: None,
        }
    }

    /// Replaces the draft the invoice is priced from
    pub fn with_draft(mut self, draft: TestInvoiceDraftBuilder) -> Self {
        self.draft = draft;
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.invoice_number = number.into();
        self
    }

    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.draft = self.draft.with_due_date(date);
        self
    }

    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    /// Sets `updated_at`; defaults to `created_at`
    pub fn with_updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    pub fn build(self) -> Invoice {
        let mut invoice = Invoice::from_draft(self.draft.build(), self.invoice_number, self.created_at);
        invoice.status = self.status;
        if let Some(updated_at) = self.updated_at {
            invoice.updated_at = updated_at;
        }
        invoice
    }
}
