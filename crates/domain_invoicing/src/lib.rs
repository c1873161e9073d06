//! Invoicing Domain - Totals Engine and Invoice Lifecycle
//!
//! The heart of this crate is the [`calculator`] module: pure functions that
//! turn line items, a tax rate, and an optional discount into the four
//! figures stored on every invoice.
//!
//! # Calculation Order
//!
//! The order is fixed and changes results if swapped:
//!
//! 1. `subtotal = Σ quantity × rate`
//! 2. `discount_amount` is taken from the subtotal
//! 3. `tax_amount` is charged on `subtotal - discount_amount`
//! 4. `total = (subtotal - discount_amount) + tax_amount`
//!
//! # Status
//!
//! Invoices move through `draft → sent → viewed → paid | overdue`. Callers
//! decide which transitions to request; the domain only evaluates whether a
//! due date has passed ([`status::is_overdue`]) and never lets a paid
//! invoice become overdue.
//!
//! Overflowing amounts saturate inside the engine and are rejected with
//! [`InvoicingError::AmountOutOfRange`] before anything is stored.
//!
//! # Example
//!
//! ```rust
//! use domain_invoicing::{calculate_total, Discount};
//! use rust_decimal_macros::dec;
//!
//! let totals = calculate_total(dec!(1000), dec!(8.5), &Discount::Percentage(dec!(10)));
//! assert_eq!(totals.discount_amount, dec!(100));
//! assert_eq!(totals.tax_amount, dec!(76.5));
//! assert_eq!(totals.total, dec!(976.5));
//! ```

pub mod calculator;
pub mod discount;
pub mod line_item;
pub mod status;
pub mod invoice;
pub mod client;
pub mod ports;
pub mod adapters;
pub mod services;
pub mod summary;
pub mod error;

pub use calculator::{
    InvoiceTotals, MoneyTotals,
    sum_line_items, apply_discount, calculate_tax, calculate_total, calculate_invoice_totals,
    ensure_in_range,
};
pub use discount::{Discount, DiscountKind, DiscountFields};
pub use line_item::{LineItem, StoredLineItem};
pub use status::{InvoiceStatus, is_overdue};
pub use invoice::{Invoice, InvoiceDraft, InvoiceUpdate, format_invoice_number};
pub use client::{Client, ClientDraft, ClientUpdate};
pub use ports::{InvoiceRepository, InvoiceQuery, ClientRepository};
pub use adapters::{InMemoryInvoiceRepository, InMemoryClientRepository};
pub use services::{InvoiceService, ClientService};
pub use summary::{InvoiceSummary, ClientBalance, recent_activity};
pub use error::InvoicingError;
