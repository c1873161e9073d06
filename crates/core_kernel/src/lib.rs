//! Core Kernel - Foundational types and utilities for the invoicing system
//!
//! This crate provides the building blocks shared by the invoicing domain:
//! - Money and percentage types with precise decimal arithmetic
//! - A timezone-aware clock abstraction that decides what "today" is
//! - Identifiers tagged with the kind of record they name
//! - The error type every repository port reports through

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, Currency, MoneyError, Percentage};
pub use temporal::{Clock, SystemClock, FixedClock, Timezone, DateRange, TemporalError};
pub use identifiers::{Id, IdKind, IdError, InvoiceId, ClientId, LineItemId};
pub use ports::{PortError, DomainPort};
pub use error::CoreError;
