//! Pre-built Test Fixtures
//!
//! Ready-to-use invoicing data. Values are fixed so tests can assert exact
//! totals.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{ClientId, FixedClock};
use domain_invoicing::{ClientDraft, LineItem};
use rust_decimal_macros::dec;

/// Fixture for client records
pub struct ClientFixtures;

impl ClientFixtures {
    /// A client with contact details filled in
    pub fn acme() -> ClientDraft {
        ClientDraft {
            name: "Acme Corp".to_string(),
            email: Some("ap@acme.test".to_string()),
            phone: Some("555-0100".to_string()),
            city: Some("Denver".to_string()),
            state: Some("CO".to_string()),
            ..Default::default()
        }
    }

    /// A client with only a name
    pub fn walk_in() -> ClientDraft {
        ClientDraft::new("Walk-in Customer")
    }
}

/// Fixture for calendar data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard issue date (Jan 1, 2024)
    pub fn issue_date() -> NaiveDate {
        date(2024, 1, 1)
    }

    /// Net 30 due date for [`Self::issue_date`]
    pub fn due_date() -> NaiveDate {
        date(2024, 1, 31)
    }

    /// A day inside the payment window
    pub fn before_due() -> NaiveDate {
        date(2024, 1, 15)
    }

    /// A day after the payment window has closed
    pub fn after_due() -> NaiveDate {
        date(2024, 2, 5)
    }

    pub fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    pub fn clock_on(day: NaiveDate) -> FixedClock {
        FixedClock::on_date(day)
    }
}

/// Fixture for line items
pub struct LineItemFixtures;

impl LineItemFixtures {
    /// Two items totalling 1250: 10 × 100 and 5 × 50
    pub fn services() -> Vec<LineItem> {
        vec![
            LineItem::new("Service 1", dec!(10), dec!(100)),
            LineItem::new("Service 2", dec!(5), dec!(50)),
        ]
    }

    /// Two items totalling 1599
    pub fn web_project() -> Vec<LineItem> {
        vec![
            LineItem::new("Web Design", dec!(10), dec!(150)),
            LineItem::new("Hosting", dec!(1), dec!(99)),
        ]
    }

    /// One fractional item totalling 251.25
    pub fn fractional() -> Vec<LineItem> {
        vec![LineItem::new("Consulting", dec!(2.5), dec!(100.50))]
    }
}

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    /// A stable client id, the same on every call
    pub fn client_id() -> ClientId {
        "CLI-00000000-0000-4000-8000-000000000001".parse().unwrap()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
