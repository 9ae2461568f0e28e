//! Data service — the external CRUD collaborator behind every collection.
//!
//! The engine never talks to a transport directly; it is handed a
//! [`DataService`] implementation per collection. `list` replaces the store
//! wholesale, the three mutations return (or acknowledge) the canonical
//! record the server settled on. [`InMemoryDataService`] is the in-library
//! double used in tests and local development.

mod in_memory;

use std::fmt;

use async_trait::async_trait;

use crate::record::Record;

pub use in_memory::InMemoryDataService;

/// Error type for data-service operations, one variant per failure class.
///
/// The carried message is the server-reported text when available, and is
/// surfaced to the operator verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// A list/refresh call failed.
    Fetch(String),
    /// A create or update was rejected.
    Save(String),
    /// A delete was rejected.
    Delete(String),
}

impl ServiceError {
    /// The underlying message, without the failure-class prefix.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::Fetch(msg) | ServiceError::Save(msg) | ServiceError::Delete(msg) => msg,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Fetch(msg) => write!(f, "fetch failed: {}", msg),
            ServiceError::Save(msg) => write!(f, "save failed: {}", msg),
            ServiceError::Delete(msg) => write!(f, "delete failed: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Remote CRUD operations over one collection of records.
#[async_trait]
pub trait DataService<R: Record>: Send + Sync {
    /// Fetch the full collection.
    async fn list(&self) -> Result<Vec<R>, ServiceError>;

    /// Create a record from a draft; returns the canonical record, which may
    /// differ from the draft (e.g. the assigned identifier).
    async fn create(&self, draft: &R) -> Result<R, ServiceError>;

    /// Replace the identified record; returns the canonical record.
    async fn update(&self, id: &str, draft: &R) -> Result<R, ServiceError>;

    /// Delete the identified record.
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}
