//! Invoice and client application services
//!
//! Orchestrate the totals engine, the overdue rule, and the repositories.
//! The services hold no invoice state of their own.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info, instrument, warn};

use core_kernel::{ClientId, Clock, InvoiceId, SystemClock, Timezone};

use crate::calculator::InvoiceTotals;
use crate::client::{Client, ClientDraft, ClientUpdate};
use crate::error::InvoicingError;
use crate::invoice::{format_invoice_number, Invoice, InvoiceDraft, InvoiceUpdate};
use crate::ports::{ClientRepository, InvoiceQuery, InvoiceRepository};
use crate::status::InvoiceStatus;
use crate::summary::{ClientBalance, InvoiceSummary};

/// Service for creating, updating, and listing invoices
pub struct InvoiceService<R: InvoiceRepository + ?Sized> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    timezone: Timezone,
}

impl<R: InvoiceRepository + ?Sized> InvoiceService<R> {
    /// Creates a service on the system clock in UTC
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            clock: Arc::new(SystemClock),
            timezone: Timezone::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the zone used to decide which calendar day "today" is
    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Today's date in the configured zone, read from the clock on each call
    pub fn today(&self) -> NaiveDate {
        self.timezone.today(self.clock.as_ref())
    }

    /// Totals a draft would be stored with, without persisting anything
    pub fn preview(&self, draft: &InvoiceDraft) -> Result<InvoiceTotals, InvoicingError> {
        draft.checked_totals()
    }

    /// Numbers, prices, and stores a new invoice in `draft` status
    ///
    /// Sequences restart every year of issue.
    #[instrument(skip(self, draft), fields(client_id = %draft.client_id))]
    pub async fn create(&self, draft: InvoiceDraft) -> Result<Invoice, InvoicingError> {
        draft.checked_totals()?;
        let year = draft.issue_date.year();
        let sequence = self.repository.next_sequence(year).await?;
        let number = format_invoice_number(year, sequence);

        let invoice = Invoice::from_draft(draft, number, self.clock.now());
        let invoice = self.repository.insert(invoice).await?;

        info!(
            invoice_id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            total = %invoice.total,
            "Invoice created"
        );
        Ok(invoice)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: InvoiceId) -> Result<Invoice, InvoicingError> {
        self.repository
            .get(id)
            .await
            .map_err(|e| InvoicingError::for_invoice(id, e))
    }

    /// Applies a partial update and stores the result
    #[instrument(skip(self, update))]
    pub async fn update(&self, id: InvoiceId, update: InvoiceUpdate) -> Result<Invoice, InvoicingError> {
        let mut invoice = self.get(id).await?;
        if let Some(to) = update.status {
            check_transition(&invoice, to)?;
        }

        invoice.apply_update(update, self.clock.now());
        invoice.check_amounts()?;
        let invoice = self
            .repository
            .update(invoice)
            .await
            .map_err(|e| InvoicingError::for_invoice(id, e))?;

        debug!(invoice_id = %id, total = %invoice.total, "Invoice updated");
        Ok(invoice)
    }

    /// Records a caller-requested status change
    ///
    /// Any move is accepted except `paid → overdue`.
    #[instrument(skip(self))]
    pub async fn transition(&self, id: InvoiceId, to: InvoiceStatus) -> Result<Invoice, InvoicingError> {
        let from = self.get(id).await?.status;
        let invoice = self.update(id, InvoiceUpdate::status(to)).await?;
        info!(invoice_id = %id, %from, %to, "Invoice status changed");
        Ok(invoice)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: InvoiceId) -> Result<(), InvoicingError> {
        self.repository
            .delete(id)
            .await
            .map_err(|e| InvoicingError::for_invoice(id, e))?;
        info!(invoice_id = %id, "Invoice deleted");
        Ok(())
    }

    /// Lists invoices, marking any whose due date has passed as overdue
    ///
    /// "Today" is read once for the whole listing. A failed overdue write
    /// is logged and the invoice is returned as it was read.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, InvoicingError> {
        self.list_on(query, self.today()).await
    }

    /// Dashboard figures over every stored invoice
    #[instrument(skip(self))]
    pub async fn summary(&self) -> Result<InvoiceSummary, InvoicingError> {
        let today = self.today();
        let invoices = self.list_on(&InvoiceQuery::all(), today).await?;
        Ok(InvoiceSummary::from_invoices(&invoices, today, self.timezone))
    }

    /// Outstanding balance of one client after reconciling its invoices
    #[instrument(skip(self))]
    pub async fn client_balance(&self, client_id: ClientId) -> Result<ClientBalance, InvoicingError> {
        let today = self.today();
        let invoices = self.list_on(&InvoiceQuery::by_client(client_id), today).await?;
        Ok(ClientBalance::for_client(client_id, &invoices, today))
    }

    async fn list_on(&self, query: &InvoiceQuery, today: NaiveDate) -> Result<Vec<Invoice>, InvoicingError> {
        let invoices = self.repository.list(query).await?;

        let mut results = Vec::with_capacity(invoices.len());
        for invoice in invoices {
            if invoice.status != InvoiceStatus::Overdue && invoice.is_overdue(today) {
                results.push(self.mark_overdue(invoice).await);
            } else {
                results.push(invoice);
            }
        }

        debug!(count = results.len(), %today, "Listed invoices");
        Ok(results)
    }

    async fn mark_overdue(&self, invoice: Invoice) -> Invoice {
        let id = invoice.id;
        let mut marked = invoice.clone();
        marked.apply_update(InvoiceUpdate::status(InvoiceStatus::Overdue), self.clock.now());

        let written = match self.repository.update(marked).await {
            Ok(_) => self.repository.get(id).await,
            Err(e) => Err(e),
        };

        match written {
            Ok(updated) => {
                info!(invoice_id = %id, due_date = %updated.due_date, "Invoice marked overdue");
                updated
            }
            Err(e) => {
                warn!(invoice_id = %id, error = %e, "Failed to mark invoice overdue");
                invoice
            }
        }
    }
}

/// Service for client records
///
/// Holds the invoice service so that deletes can check for invoices still
/// billed to the client, and balances see reconciled statuses.
pub struct ClientService<C: ClientRepository + ?Sized, R: InvoiceRepository + ?Sized> {
    clients: Arc<C>,
    invoices: Arc<InvoiceService<R>>,
}

impl<C: ClientRepository + ?Sized, R: InvoiceRepository + ?Sized> ClientService<C, R> {
    pub fn new(clients: Arc<C>, invoices: Arc<InvoiceService<R>>) -> Self {
        Self { clients, invoices }
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: ClientDraft) -> Result<Client, InvoicingError> {
        let client = Client::from_draft(draft, self.invoices.clock.now())?;
        let client = self.clients.insert(client).await?;
        info!(client_id = %client.id, "Client created");
        Ok(client)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: ClientId) -> Result<Client, InvoicingError> {
        self.clients
            .get(id)
            .await
            .map_err(|e| InvoicingError::for_client(id, e))
    }

    pub async fn list(&self) -> Result<Vec<Client>, InvoicingError> {
        Ok(self.clients.list().await?)
    }

    #[instrument(skip(self, update))]
    pub async fn update(&self, id: ClientId, update: ClientUpdate) -> Result<Client, InvoicingError> {
        let mut client = self.get(id).await?;
        client.apply_update(update, self.invoices.clock.now())?;
        let client = self
            .clients
            .update(client)
            .await
            .map_err(|e| InvoicingError::for_client(id, e))?;
        debug!(client_id = %id, "Client updated");
        Ok(client)
    }

    /// Removes a client that has no invoices
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ClientId) -> Result<(), InvoicingError> {
        let invoice_count = self
            .invoices
            .repository()
            .list(&InvoiceQuery::by_client(id))
            .await?
            .len();
        if invoice_count > 0 {
            return Err(InvoicingError::ClientHasInvoices { id, invoice_count });
        }

        self.clients
            .delete(id)
            .await
            .map_err(|e| InvoicingError::for_client(id, e))?;
        info!(client_id = %id, "Client deleted");
        Ok(())
    }

    /// What the client owes across its unpaid invoices
    pub async fn balance(&self, id: ClientId) -> Result<ClientBalance, InvoicingError> {
        self.get(id).await?;
        self.invoices.client_balance(id).await
    }
}

fn check_transition(invoice: &Invoice, to: InvoiceStatus) -> Result<(), InvoicingError> {
    if invoice.status.is_paid() && to == InvoiceStatus::Overdue {
        return Err(InvoicingError::InvalidTransition {
            id: invoice.id,
            from: invoice.status,
            to,
        });
    }
    Ok(())
}
