//! Invoice status and the overdue rule

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InvoicingError;

/// Invoice lifecycle state
///
/// ```text
/// draft ──► sent ──► viewed ──┬──► paid
///                             └──► overdue
/// ```
///
/// Callers choose transitions. `overdue` is normally written by listing
/// reconciliation once [`is_overdue`] reports a passed due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Viewed,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 5] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::Viewed,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Viewed => "viewed",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, InvoiceStatus::Paid)
    }
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Draft
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = InvoicingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InvoiceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvoicingError::InvalidStatus(s.to_string()))
    }
}

/// Returns true when the due date is strictly before `today`
///
/// Paid invoices are never overdue. Both sides are calendar dates, so an
/// invoice due today is not overdue until tomorrow. The result is advisory:
/// nothing is written.
pub fn is_overdue(status: InvoiceStatus, due_date: NaiveDate, today: NaiveDate) -> bool {
    if status.is_paid() {
        return false;
    }
    due_date < today
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_paid_never_overdue() {
        assert!(!is_overdue(InvoiceStatus::Paid, date(2000, 1, 1), date(2024, 1, 1)));
    }

    #[test]
    fn test_past_due_is_overdue() {
        let today = date(2024, 1, 15);
        for status in [InvoiceStatus::Draft, InvoiceStatus::Sent, InvoiceStatus::Viewed, InvoiceStatus::Overdue] {
            assert!(is_overdue(status, date(2024, 1, 14), today), "{status} should be overdue");
        }
    }

    #[test]
    fn test_due_today_or_later_is_not_overdue() {
        let today = date(2024, 1, 15);
        assert!(!is_overdue(InvoiceStatus::Sent, today, today));
        assert!(!is_overdue(InvoiceStatus::Sent, date(2024, 2, 1), today));
    }

    #[test]
    fn test_parse_and_display() {
        for status in InvoiceStatus::ALL {
            assert_eq!(status.to_string().parse::<InvoiceStatus>().unwrap(), status);
        }
        assert!(matches!(
            "cancelled".parse::<InvoiceStatus>(),
            Err(InvoicingError::InvalidStatus(_))
        ));
    }
}
