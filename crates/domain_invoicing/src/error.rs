//! Invoicing domain errors

use core_kernel::{ClientId, InvoiceId, PortError};
use thiserror::Error;

use crate::status::InvoiceStatus;

/// Errors that can occur in the invoicing domain
///
/// The totals engine itself never fails; these come from parsing wire
/// values, from range checks on computed totals, and from the service layer.
#[derive(Debug, Error)]
pub enum InvoicingError {
    /// Discount kind other than `percentage` or `fixed`
    #[error("Invalid discount kind: {0}")]
    InvalidDiscountKind(String),

    /// Status text that does not name a lifecycle state
    #[error("Invalid invoice status: {0}")]
    InvalidStatus(String),

    /// A line amount or total overflowed the decimal range
    #[error("Invoice amounts exceed the supported decimal range")]
    AmountOutOfRange,

    /// Invoice not found
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),

    /// Requested status change is not allowed
    #[error("Invoice {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: InvoiceId,
        from: InvoiceStatus,
        to: InvoiceStatus,
    },

    /// Client record failed validation
    #[error("Invalid client: {0}")]
    InvalidClient(String),

    #[error("Client not found: {0}")]
    ClientNotFound(ClientId),

    /// Deleting the client would orphan its invoices
    #[error("Client {id} still has {invoice_count} invoice(s)")]
    ClientHasInvoices { id: ClientId, invoice_count: usize },

    /// Repository failure
    #[error("Repository error: {0}")]
    Repository(#[from] PortError),
}

impl InvoicingError {
    /// Maps a port error for a specific invoice, turning NotFound into
    /// [`InvoicingError::InvoiceNotFound`]
    pub(crate) fn for_invoice(id: InvoiceId, err: PortError) -> Self {
        if err.is_not_found() {
            InvoicingError::InvoiceNotFound(id)
        } else {
            InvoicingError::Repository(err)
        }
    }

    pub(crate) fn for_client(id: ClientId, err: PortError) -> Self {
        if err.is_not_found() {
            InvoicingError::ClientNotFound(id)
        } else {
            InvoicingError::Repository(err)
        }
    }
}
