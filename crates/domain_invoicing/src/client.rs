//! Client records
//!
//! Invoices refer to clients by [`ClientId`] only. A client cannot be
//! removed while any invoice still points at it.

use chrono::{DateTime, Utc};
use core_kernel::ClientId;
use serde::{Deserialize, Serialize};

use crate::error::InvoicingError;

/// Payload for creating a client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDraft {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl ClientDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

/// A stored client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Builds a client record; the name is trimmed and must not be blank
    pub fn from_draft(draft: ClientDraft, now: DateTime<Utc>) -> Result<Self, InvoicingError> {
        Ok(Self {
            id: ClientId::new_v7(),
            name: required_name(&draft.name)?,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            city: draft.city,
            state: draft.state,
            zip: draft.zip,
            country: draft.country,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies `update`, leaving the record untouched if the new name is blank
    pub fn apply_update(&mut self, update: ClientUpdate, now: DateTime<Utc>) -> Result<(), InvoicingError> {
        if let Some(name) = &update.name {
            self.name = required_name(name)?;
        }
        let fields = [
            (update.email, &mut self.email),
            (update.phone, &mut self.phone),
            (update.address, &mut self.address),
            (update.city, &mut self.city),
            (update.state, &mut self.state),
            (update.zip, &mut self.zip),
            (update.country, &mut self.country),
        ];
        for (value, slot) in fields {
            if value.is_some() {
                *slot = value;
            }
        }
        self.updated_at = now;
        Ok(())
    }
}

fn required_name(name: &str) -> Result<String, InvoicingError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InvoicingError::InvalidClient("name is required".to_string()));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_from_draft_trims_name() {
        let client = Client::from_draft(ClientDraft::new("  Acme Corp ").with_email("billing@acme.test"), at(9)).unwrap();
        assert_eq!(client.name, "Acme Corp");
        assert_eq!(client.email.as_deref(), Some("billing@acme.test"));
        assert_eq!(client.created_at, client.updated_at);
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(matches!(
            Client::from_draft(ClientDraft::new("   "), at(9)),
            Err(InvoicingError::InvalidClient(_))
        ));
    }

    #[test]
    fn test_update_merges_fields() {
        let mut client = Client::from_draft(ClientDraft::new("Acme").with_email("a@acme.test"), at(9)).unwrap();
        let update = ClientUpdate {
            city: Some("Denver".to_string()),
            ..Default::default()
        };
        client.apply_update(update, at(10)).unwrap();

        assert_eq!(client.city.as_deref(), Some("Denver"));
        assert_eq!(client.email.as_deref(), Some("a@acme.test"));
        assert_eq!(client.updated_at, at(10));
    }

    #[test]
    fn test_update_with_blank_name_keeps_record() {
        let mut client = Client::from_draft(ClientDraft::new("Acme"), at(9)).unwrap();
        let before = client.clone();
        let update = ClientUpdate {
            name: Some(String::new()),
            city: Some("Denver".to_string()),
            ..Default::default()
        };

        assert!(client.apply_update(update, at(10)).is_err());
        assert_eq!(client, before);
    }
}
