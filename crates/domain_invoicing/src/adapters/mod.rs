//! Storage adapters for the invoicing domain
//!
//! - **InMemoryInvoiceRepository**: map-backed store for tests, previews,
//!   and single-process deployments
//! - **InMemoryClientRepository**: the same for client records

pub mod in_memory;

pub use in_memory::{InMemoryClientRepository, InMemoryInvoiceRepository};
