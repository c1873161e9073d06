//! Typed record identifiers
//!
//! Every id is a UUID tagged with the kind of record it names, so an
//! invoice id cannot be handed to something expecting a client id. Ids print
//! as `INV-<uuid>`, `CLI-<uuid>` or `LIN-<uuid>` and parse back with or
//! without the prefix. A prefix naming another kind of record is rejected.
//! On the wire they are bare UUID strings.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

/// The kind of record an [`Id`] refers to
pub trait IdKind {
    /// Short tag shown before the UUID
    const PREFIX: &'static str;
}

/// Marker for invoice ids
#[derive(Debug)]
pub enum InvoiceKind {}

/// Marker for client ids
#[derive(Debug)]
pub enum ClientKind {}

/// Marker for stored line item ids
#[derive(Debug)]
pub enum LineItemKind {}

impl IdKind for InvoiceKind {
    const PREFIX: &'static str = "INV";
}

impl IdKind for ClientKind {
    const PREFIX: &'static str = "CLI";
}

impl IdKind for LineItemKind {
    const PREFIX: &'static str = "LIN";
}

pub type InvoiceId = Id<InvoiceKind>;
pub type ClientId = Id<ClientKind>;
pub type LineItemId = Id<LineItemKind>;

#[derive(Debug, Error)]
pub enum IdError {
    #[error("expected a {expected} id, got prefix {found}")]
    WrongPrefix { expected: &'static str, found: String },

    #[error("malformed id: {0}")]
    Malformed(#[from] uuid::Error),
}

/// A UUID that names one kind of record
pub struct Id<K> {
    uuid: Uuid,
    kind: PhantomData<fn() -> K>,
}

impl<K: IdKind> Id<K> {
    /// Random (v4) id
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Time-ordered (v7) id; stored records use these so ids sort by creation
    pub fn new_v7() -> Self {
        Self::from_uuid(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            kind: PhantomData,
        }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.uuid
    }
}

impl<K: IdKind> Default for Id<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for Id<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Id<K> {}

impl<K> PartialEq for Id<K> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<K> Eq for Id<K> {}

impl<K> Hash for Id<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<K> PartialOrd for Id<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Id<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.uuid.cmp(&other.uuid)
    }
}

impl<K: IdKind> fmt::Display for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", K::PREFIX, self.uuid)
    }
}

impl<K: IdKind> fmt::Debug for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<K: IdKind> FromStr for Id<K> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // A UUID's first group is eight hex digits, so anything shorter
        // before the first dash is a prefix.
        let bare = match s.split_once('-') {
            Some((prefix, rest)) if prefix.len() < 8 && prefix.chars().all(|c| c.is_ascii_alphabetic()) => {
                if prefix != K::PREFIX {
                    return Err(IdError::WrongPrefix {
                        expected: K::PREFIX,
                        found: prefix.to_string(),
                    });
                }
                rest
            }
            _ => s,
        };
        Ok(Self::from_uuid(Uuid::parse_str(bare)?))
    }
}

impl<K> Serialize for Id<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.uuid.serialize(serializer)
    }
}

impl<'de, K: IdKind> Deserialize<'de> for Id<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}
