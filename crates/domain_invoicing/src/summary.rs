//! Dashboard figures derived from a set of invoices

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use core_kernel::{ClientId, Timezone};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::invoice::Invoice;
use crate::status::InvoiceStatus;

/// Number of months kept in [`InvoiceSummary::monthly_revenue`]
pub const REVENUE_MONTHS: usize = 6;

/// Aggregate view used by the dashboard
///
/// A paid invoice's `updated_at` stands in for its payment date, read as a
/// calendar date in the same zone that decided `today`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    /// Sum of totals not yet paid
    pub total_outstanding: Decimal,
    /// Sum of totals paid in today's calendar month
    pub paid_this_month: Decimal,
    pub overdue_count: usize,
    pub total_invoices: usize,
    pub status_counts: BTreeMap<InvoiceStatus, usize>,
    /// `YYYY-MM` to paid total, at most the latest six months with payments
    pub monthly_revenue: BTreeMap<String, Decimal>,
}

impl InvoiceSummary {
    pub fn from_invoices(invoices: &[Invoice], today: NaiveDate, timezone: Timezone) -> Self {
        let mut total_outstanding = Decimal::ZERO;
        let mut paid_this_month = Decimal::ZERO;
        let mut overdue_count = 0;
        let mut status_counts: BTreeMap<InvoiceStatus, usize> =
            InvoiceStatus::ALL.into_iter().map(|s| (s, 0)).collect();
        let mut monthly_revenue: BTreeMap<String, Decimal> = BTreeMap::new();

        for invoice in invoices {
            *status_counts.entry(invoice.status).or_default() += 1;

            if invoice.is_overdue(today) {
                overdue_count += 1;
            }

            if invoice.status.is_paid() {
                let paid_on = timezone.date_of(invoice.updated_at);
                if paid_on.year() == today.year() && paid_on.month() == today.month() {
                    paid_this_month = paid_this_month.saturating_add(invoice.total);
                }
                let month = monthly_revenue.entry(paid_on.format("%Y-%m").to_string()).or_default();
                *month = month.saturating_add(invoice.total);
            } else {
                total_outstanding = total_outstanding.saturating_add(invoice.total);
            }
        }

        while monthly_revenue.len() > REVENUE_MONTHS {
            monthly_revenue.pop_first();
        }

        Self {
            total_outstanding,
            paid_this_month,
            overdue_count,
            total_invoices: invoices.len(),
            status_counts,
            monthly_revenue,
        }
    }
}

/// What one client owes, as shown on the client's page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientBalance {
    pub client_id: ClientId,
    /// Sum of totals not yet paid
    pub outstanding: Decimal,
    pub overdue_count: usize,
    pub invoice_count: usize,
}

impl ClientBalance {
    /// Balance over the invoices in `invoices` that belong to `client_id`
    pub fn for_client(client_id: ClientId, invoices: &[Invoice], today: NaiveDate) -> Self {
        let mut balance = Self {
            client_id,
            outstanding: Decimal::ZERO,
            overdue_count: 0,
            invoice_count: 0,
        };
        for invoice in invoices.iter().filter(|i| i.client_id == client_id) {
            balance.invoice_count += 1;
            if invoice.is_overdue(today) {
                balance.overdue_count += 1;
            }
            if !invoice.status.is_paid() {
                balance.outstanding = balance.outstanding.saturating_add(invoice.total);
            }
        }
        balance
    }
}

/// The `limit` most recently updated invoices, newest first
pub fn recent_activity(invoices: &[Invoice], limit: usize) -> Vec<Invoice> {
    let mut sorted = invoices.to_vec();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sorted.truncate(limit);
    sorted
}
