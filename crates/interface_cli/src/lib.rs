//! Invoice Preview CLI
//!
//! Runs the same totals engine and overdue reconciliation the service uses,
//! against JSON files on disk, so figures shown before saving can never
//! drift from what gets stored.
//!
//! # Commands
//!
//! - `totals <draft.json>`: prints the totals for one `InvoiceDraft`
//! - `overdue <invoices.json>`: reconciles a list of invoices against today
//!   and prints them

pub mod config;
pub mod error;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use core_kernel::{Clock, Currency, Timezone};
use domain_invoicing::{
    InMemoryInvoiceRepository, Invoice, InvoiceDraft, InvoiceQuery, InvoiceService, InvoiceTotals,
    InvoicingError,
};
use serde::Serialize;
use tracing::{debug, info};

pub use config::CliConfig;
pub use error::CliError;

/// Command line of the `invoice-preview` binary
#[derive(Debug, Parser)]
#[command(
    name = "invoice-preview",
    version,
    about = "Preview invoice totals and overdue status from JSON files",
    after_help = "Environment:\n  INVOICE_TIMEZONE   Zone used for today's date (default: UTC)\n  INVOICE_CURRENCY   Currency used to format totals (default: USD)\n  INVOICE_LOG_LEVEL  Log level (default: info, RUST_LOG overrides)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print subtotal, discount, tax and total for a draft
    Totals {
        /// Path to an invoice draft in JSON
        draft: PathBuf,
    },
    /// Mark past-due invoices overdue and print them
    Overdue {
        /// Path to a JSON array of invoices
        invoices: PathBuf,
    },
}

/// Totals for one draft, exact and rounded to the currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalsReport {
    pub currency: Currency,
    pub totals: InvoiceTotals,
    pub rounded: InvoiceTotals,
    pub formatted: FormattedTotals,
}

/// Display strings such as `$1220.63`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedTotals {
    pub subtotal: String,
    pub discount_amount: String,
    pub tax_amount: String,
    pub total: String,
}

impl TotalsReport {
    /// Fails when the draft's amounts overflow
    pub fn new(draft: &InvoiceDraft, currency: Currency) -> Result<Self, InvoicingError> {
        let totals = draft.checked_totals()?;
        let money = totals.in_currency(currency);
        Ok(Self {
            currency,
            totals,
            rounded: totals.rounded(currency.decimal_places()),
            formatted: FormattedTotals {
                subtotal: money.subtotal.to_string(),
                discount_amount: money.discount_amount.to_string(),
                tax_amount: money.tax_amount.to_string(),
                total: money.total.to_string(),
            },
        })
    }
}

/// Loads invoices into a scratch store and lists them through the service
pub async fn reconcile_overdue(
    invoices: Vec<Invoice>,
    clock: Arc<dyn Clock>,
    timezone: Timezone,
) -> Result<Vec<Invoice>, CliError> {
    let repository = Arc::new(InMemoryInvoiceRepository::with_invoices(invoices).await);
    let service = InvoiceService::new(repository)
        .with_clock(clock)
        .with_timezone(timezone);

    let reconciled = service.list(&InvoiceQuery::all()).await?;
    Ok(reconciled)
}

/// Runs one command, writing JSON to `out`
pub async fn run<W: Write>(
    command: Command,
    config: &CliConfig,
    clock: Arc<dyn Clock>,
    out: &mut W,
) -> Result<(), CliError> {
    match command {
        Command::Totals { draft } => {
            let draft: InvoiceDraft = read_json(&draft)?;
            let report = TotalsReport::new(&draft, config.currency()?)?;
            debug!(total = %report.totals.total, "Computed draft totals");
            write_json(out, &report)?;
        }
        Command::Overdue { invoices } => {
            let invoices: Vec<Invoice> = read_json(&invoices)?;
            let count = invoices.len();
            let reconciled = reconcile_overdue(invoices, clock, config.timezone()?).await?;
            info!(count, "Reconciled invoices");
            write_json(out, &reconciled)?;
        }
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("invoice-preview").chain(args.iter().copied())).map(|cli| cli.command)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse(&["totals", "draft.json"]).unwrap(),
            Command::Totals { draft: PathBuf::from("draft.json") }
        );
        assert_eq!(
            parse(&["overdue", "all.json"]).unwrap(),
            Command::Overdue { invoices: PathBuf::from("all.json") }
        );
    }

    #[test]
    fn test_parse_errors() {
        use clap::error::ErrorKind;

        let kind = |args: &[&str]| parse(args).unwrap_err().kind();
        assert_eq!(kind(&[]), ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand);
        assert_eq!(kind(&["totals"]), ErrorKind::MissingRequiredArgument);
        assert_eq!(kind(&["refund", "x.json"]), ErrorKind::InvalidSubcommand);
        assert_eq!(kind(&["totals", "a.json", "b.json"]), ErrorKind::UnknownArgument);
        assert_eq!(kind(&["--help"]), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
