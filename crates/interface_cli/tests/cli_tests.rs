//! Preview CLI Tests
//!
//! # Test Organization
//!
//! - `totals_tests` - The `totals` command end to end
//! - `overdue_tests` - The `overdue` command end to end

use std::path::PathBuf;
use std::sync::Arc;

use core_kernel::{Currency, FixedClock, InvoiceId};
use domain_invoicing::{Invoice, InvoiceStatus, InvoicingError, LineItem};
use interface_cli::{run, CliConfig, CliError, Command, TotalsReport};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use test_utils::{TemporalFixtures, TestInvoiceBuilder, TestInvoiceDraftBuilder};

/// Writes `contents` to a uniquely named file in the temp directory
fn write_temp(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("invoice-preview-{}.json", InvoiceId::new()));
    std::fs::write(&path, contents).unwrap();
    path
}

fn clock() -> Arc<FixedClock> {
    Arc::new(TemporalFixtures::clock_on(TemporalFixtures::after_due()))
}

mod totals_tests {
    use super::*;

    #[test]
    fn test_report_rounds_to_currency() {
        let draft = TestInvoiceDraftBuilder::new().build();
        let report = TotalsReport::new(&draft, Currency::USD).unwrap();

        assert_eq!(report.totals.total, dec!(1220.625));
        assert_eq!(report.rounded.total, dec!(1220.63));
        assert_eq!(report.formatted.total, "$1220.63");
        assert_eq!(report.formatted.discount_amount, "$125.00");
    }

    #[test]
    fn test_report_in_zero_decimal_currency() {
        let draft = TestInvoiceDraftBuilder::new().build();
        let report = TotalsReport::new(&draft, Currency::JPY).unwrap();
        assert_eq!(report.rounded.tax_amount, dec!(96));
    }

    #[tokio::test]
    async fn test_totals_command_prints_json() {
        let draft = TestInvoiceDraftBuilder::new().build();
        let path = write_temp(&serde_json::to_string(&draft).unwrap());

        let mut out = Vec::new();
        run(Command::Totals { draft: path.clone() }, &CliConfig::default(), clock(), &mut out)
            .await
            .unwrap();
        std::fs::remove_file(path).ok();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["formatted"]["total"], "$1220.63");
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let mut out = Vec::new();
        let result = run(
            Command::Totals { draft: PathBuf::from("/nonexistent/draft.json") },
            &CliConfig::default(),
            clock(),
            &mut out,
        )
        .await;
        assert!(matches!(result, Err(CliError::Read { .. })));
    }

    #[tokio::test]
    async fn test_unknown_discount_kind_is_rejected() {
        let path = write_temp(
            r#"{"client_id":"00000000-0000-4000-8000-000000000001","issue_date":"2024-01-01",
                "due_date":"2024-01-31","payment_terms":"Net 30","tax_rate":8.5,
                "discount_type":"bogo","discount_value":10,"line_items":[]}"#,
        );

        let mut out = Vec::new();
        let result = run(Command::Totals { draft: path.clone() }, &CliConfig::default(), clock(), &mut out).await;
        std::fs::remove_file(path).ok();

        assert!(matches!(result, Err(CliError::Json(_))));
    }

    #[tokio::test]
    async fn test_overflowing_draft_is_rejected() {
        let huge = Decimal::from(1_000_000_000_000_000i64);
        let draft = TestInvoiceDraftBuilder::new()
            .with_line_items(vec![LineItem::new("Big", huge, huge)])
            .build();
        let path = write_temp(&serde_json::to_string(&draft).unwrap());

        let mut out = Vec::new();
        let result = run(Command::Totals { draft: path.clone() }, &CliConfig::default(), clock(), &mut out).await;
        std::fs::remove_file(path).ok();

        assert!(matches!(
            result,
            Err(CliError::Invoicing(InvoicingError::AmountOutOfRange))
        ));
        assert!(out.is_empty());
    }
}

mod overdue_tests {
    use super::*;

    #[tokio::test]
    async fn test_overdue_command_marks_past_due() {
        let invoices = vec![
            TestInvoiceBuilder::new().with_number("INV-2024-0001").with_status(InvoiceStatus::Sent).build(),
            TestInvoiceBuilder::new().with_number("INV-2024-0002").with_status(InvoiceStatus::Paid).build(),
        ];
        let path = write_temp(&serde_json::to_string(&invoices).unwrap());

        let mut out = Vec::new();
        run(Command::Overdue { invoices: path.clone() }, &CliConfig::default(), clock(), &mut out)
            .await
            .unwrap();
        std::fs::remove_file(path).ok();

        let reconciled: Vec<Invoice> = serde_json::from_slice(&out).unwrap();
        let status = |number: &str| {
            reconciled
                .iter()
                .find(|i| i.invoice_number == number)
                .map(|i| i.status)
        };
        assert_eq!(status("INV-2024-0001"), Some(InvoiceStatus::Overdue));
        assert_eq!(status("INV-2024-0002"), Some(InvoiceStatus::Paid));
    }

    #[tokio::test]
    async fn test_bad_timezone_fails() {
        let path = write_temp("[]");
        let config = CliConfig {
            timezone: "Nowhere/Special".to_string(),
            ..Default::default()
        };

        let mut out = Vec::new();
        let result = run(Command::Overdue { invoices: path.clone() }, &config, clock(), &mut out).await;
        std::fs::remove_file(path).ok();

        assert!(matches!(result, Err(CliError::Core(_))));
    }
}
