//! Invoicing Domain Ports
//!
//! The service layer talks to storage only through [`InvoiceRepository`]
//! and [`ClientRepository`].
//! Adapters decide where invoices live; this crate ships an in-memory one
//! (see [`crate::adapters`]) and a SQL store can implement the same trait.
//!
//! ```rust,ignore
//! let repo: Arc<dyn InvoiceRepository> = Arc::new(InMemoryInvoiceRepository::new());
//! let service = InvoiceService::new(repo);
//! ```

use async_trait::async_trait;
use core_kernel::{ClientId, DateRange, DomainPort, InvoiceId, PortError};

use crate::client::Client;
use crate::invoice::Invoice;
use crate::status::InvoiceStatus;

/// Filter for listing invoices
///
/// All set filters must match. The default query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceQuery {
    pub status: Option<InvoiceStatus>,
    pub client_id: Option<ClientId>,
    /// Inclusive bounds on `issue_date`
    pub issued: DateRange,
}

impl InvoiceQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_status(status: InvoiceStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn by_client(client_id: ClientId) -> Self {
        Self {
            client_id: Some(client_id),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn issued_within(mut self, range: DateRange) -> Self {
        self.issued = range;
        self
    }

    /// Returns true when `invoice` passes every filter
    pub fn matches(&self, invoice: &Invoice) -> bool {
        if let Some(status) = self.status {
            if invoice.status != status {
                return false;
            }
        }
        if let Some(client_id) = self.client_id {
            if invoice.client_id != client_id {
                return false;
            }
        }
        self.issued.contains(invoice.issue_date)
    }
}

/// Storage for invoices
///
/// Implementations return `PortError::NotFound` for unknown ids and
/// `PortError::Conflict` when an insert would duplicate an id or an
/// invoice number.
#[async_trait]
pub trait InvoiceRepository: DomainPort {
    /// Fetches one invoice
    async fn get(&self, id: InvoiceId) -> Result<Invoice, PortError>;

    /// Lists invoices matching `query`, newest `created_at` first
    async fn list(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, PortError>;

    async fn insert(&self, invoice: Invoice) -> Result<Invoice, PortError>;

    /// Replaces a stored invoice wholesale
    async fn update(&self, invoice: Invoice) -> Result<Invoice, PortError>;

    async fn delete(&self, id: InvoiceId) -> Result<(), PortError>;

    /// Reserves the next invoice sequence number for `year`, starting at 1
    async fn next_sequence(&self, year: i32) -> Result<u32, PortError>;
}

/// Storage for clients
///
/// Same error contract as [`InvoiceRepository`]: `NotFound` for unknown ids,
/// `Conflict` for a duplicate id.
#[async_trait]
pub trait ClientRepository: DomainPort {
    async fn get(&self, id: ClientId) -> Result<Client, PortError>;

    /// All clients, ordered by name
    async fn list(&self) -> Result<Vec<Client>, PortError>;

    async fn insert(&self, client: Client) -> Result<Client, PortError>;

    async fn update(&self, client: Client) -> Result<Client, PortError>;

    async fn delete(&self, id: ClientId) -> Result<(), PortError>;
}
