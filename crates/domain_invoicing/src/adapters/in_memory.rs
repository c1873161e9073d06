//! In-memory invoice and client repositories

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{ClientId, DomainPort, InvoiceId, PortError};

use crate::client::Client;
use crate::invoice::Invoice;
use crate::ports::{ClientRepository, InvoiceQuery, InvoiceRepository};

/// Map-backed [`InvoiceRepository`]
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInvoiceRepository {
    invoices: Arc<RwLock<HashMap<InvoiceId, Invoice>>>,
    sequences: Arc<RwLock<HashMap<i32, u32>>>,
}

impl InMemoryInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the store
    ///
    /// Sequence counters are not advanced for the seeded invoices.
    pub async fn with_invoices(invoices: Vec<Invoice>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.invoices.write().await;
            for invoice in invoices {
                map.insert(invoice.id, invoice);
            }
        }
        repo
    }

    pub async fn len(&self) -> usize {
        self.invoices.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.invoices.read().await.is_empty()
    }
}

impl DomainPort for InMemoryInvoiceRepository {}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn get(&self, id: InvoiceId) -> Result<Invoice, PortError> {
        self.invoices
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Invoice", id))
    }

    async fn list(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, PortError> {
        let invoices = self.invoices.read().await;
        let mut results: Vec<Invoice> = invoices
            .values()
            .filter(|invoice| query.matches(invoice))
            .cloned()
            .collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(results)
    }

    async fn insert(&self, invoice: Invoice) -> Result<Invoice, PortError> {
        let mut invoices = self.invoices.write().await;
        if invoices.contains_key(&invoice.id) {
            return Err(PortError::conflict(format!("Invoice {} already exists", invoice.id)));
        }
        if invoices.values().any(|existing| existing.invoice_number == invoice.invoice_number) {
            return Err(PortError::conflict(format!(
                "Invoice number {} already in use",
                invoice.invoice_number
            )));
        }
        invoices.insert(invoice.id, invoice.clone());
        Ok(invoice)
    }

    async fn update(&self, invoice: Invoice) -> Result<Invoice, PortError> {
        let mut invoices = self.invoices.write().await;
        match invoices.get_mut(&invoice.id) {
            Some(slot) => {
                *slot = invoice.clone();
                Ok(invoice)
            }
            None => Err(PortError::not_found("Invoice", invoice.id)),
        }
    }

    async fn delete(&self, id: InvoiceId) -> Result<(), PortError> {
        self.invoices
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PortError::not_found("Invoice", id))
    }

    async fn next_sequence(&self, year: i32) -> Result<u32, PortError> {
        let mut sequences = self.sequences.write().await;
        let next = sequences.entry(year).or_insert(0);
        *next += 1;
        Ok(*next)
    }
}

/// Map-backed [`ClientRepository`]; clones share the same storage
#[derive(Debug, Clone, Default)]
pub struct InMemoryClientRepository {
    clients: Arc<RwLock<HashMap<ClientId, Client>>>,
}

impl InMemoryClientRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryClientRepository {}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn get(&self, id: ClientId) -> Result<Client, PortError> {
        self.clients
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Client", id))
    }

    async fn list(&self) -> Result<Vec<Client>, PortError> {
        let mut clients: Vec<Client> = self.clients.read().await.values().cloned().collect();
        clients.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(clients)
    }

    async fn insert(&self, client: Client) -> Result<Client, PortError> {
        let mut clients = self.clients.write().await;
        if clients.contains_key(&client.id) {
            return Err(PortError::conflict(format!("Client {} already exists", client.id)));
        }
        clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn update(&self, client: Client) -> Result<Client, PortError> {
        let mut clients = self.clients.write().await;
        match clients.get_mut(&client.id) {
            Some(slot) => {
                *slot = client.clone();
                Ok(client)
            }
            None => Err(PortError::not_found("Client", client.id)),
        }
    }

    async fn delete(&self, id: ClientId) -> Result<(), PortError> {
        self.clients
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PortError::not_found("Client", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::Discount;
    use crate::invoice::InvoiceDraft;
    use crate::line_item::LineItem;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use core_kernel::ClientId;
    use rust_decimal_macros::dec;

    fn invoice(number: &str, minutes: i64) -> Invoice {
        let draft = InvoiceDraft {
            client_id: ClientId::new(),
            issue_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            payment_terms: "Net 30".to_string(),
            tax_rate: dec!(10),
            discount: Discount::None,
            notes: None,
            line_items: vec![LineItem::new("Item", dec!(1), dec!(100))],
        };
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes);
        Invoice::from_draft(draft, number, created)
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = InMemoryInvoiceRepository::new();
        let inv = repo.insert(invoice("INV-2024-0001", 0)).await.unwrap();

        let fetched = repo.get(inv.id).await.unwrap();
        assert_eq!(fetched, inv);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = InMemoryInvoiceRepository::new();
        let err = repo.get(InvoiceId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_duplicate_number_conflicts() {
        let repo = InMemoryInvoiceRepository::new();
        repo.insert(invoice("INV-2024-0001", 0)).await.unwrap();

        let err = repo.insert(invoice("INV-2024-0001", 1)).await.unwrap_err();
        assert!(matches!(err, PortError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let older = invoice("INV-2024-0001", 0);
        let newer = invoice("INV-2024-0002", 5);
        let repo = InMemoryInvoiceRepository::with_invoices(vec![older.clone(), newer.clone()]).await;

        let listed = repo.list(&InvoiceQuery::all()).await.unwrap();
        assert_eq!(listed.iter().map(|i| i.id).collect::<Vec<_>>(), vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = InMemoryInvoiceRepository::new();
        let mut inv = repo.insert(invoice("INV-2024-0001", 0)).await.unwrap();

        inv.notes = Some("Thanks".to_string());
        repo.update(inv.clone()).await.unwrap();
        assert_eq!(repo.get(inv.id).await.unwrap().notes.as_deref(), Some("Thanks"));

        repo.delete(inv.id).await.unwrap();
        assert!(repo.is_empty().await);
        assert!(repo.delete(inv.id).await.unwrap_err().is_not_found());
        assert!(repo.update(inv).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_sequences_are_per_year() {
        let repo = InMemoryInvoiceRepository::new();
        assert_eq!(repo.next_sequence(2024).await.unwrap(), 1);
        assert_eq!(repo.next_sequence(2024).await.unwrap(), 2);
        assert_eq!(repo.next_sequence(2025).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clients_listed_by_name() {
        use crate::client::ClientDraft;

        let repo = InMemoryClientRepository::new();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let zeta = repo.insert(Client::from_draft(ClientDraft::new("Zeta LLC"), now).unwrap()).await.unwrap();
        let acme = repo.insert(Client::from_draft(ClientDraft::new("Acme"), now).unwrap()).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Acme", "Zeta LLC"]);

        assert!(matches!(repo.insert(acme.clone()).await, Err(PortError::Conflict { .. })));
        repo.delete(zeta.id).await.unwrap();
        assert!(repo.get(zeta.id).await.unwrap_err().is_not_found());
    }
}
