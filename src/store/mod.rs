//! CollectionStore — the authoritative in-memory copy of a collection.
//!
//! The store is the single source of truth for what the UI shows as
//! existing records. It is replaced wholesale by `load`, and reconciled at
//! single-record granularity when the data service acknowledges a create,
//! update or delete. The query engine only ever reads it.
//!
//! Handles are clone-friendly and share state via `Arc`, so a service
//! response may legitimately race a teardown: after `close()`, any
//! response still in flight is discarded instead of mutating state that no
//! longer has an owner.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use log::{debug, warn};

use crate::notify::Notify;
use crate::record::Record;
use crate::service::{DataService, ServiceError};

/// Load lifecycle of a collection store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Created, initial fetch not yet completed.
    Pending,
    /// At least one fetch succeeded; contents are current as of it.
    Ready,
    /// The last fetch failed and nothing was loaded before it.
    Failed,
}

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The data service rejected the operation.
    Service(ServiceError),
    /// Internal lock poisoned during the named operation.
    LockPoisoned(&'static str),
    /// The store was closed while the operation was in flight; the
    /// response was discarded.
    Closed,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Service(err) => write!(f, "{}", err),
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
            StoreError::Closed => write!(f, "store closed; response discarded"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Service(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ServiceError> for StoreError {
    fn from(err: ServiceError) -> Self {
        StoreError::Service(err)
    }
}

struct Inner<R> {
    records: Vec<R>,
    phase: LoadPhase,
}

/// Authoritative in-memory copy of one collection, reconciled against a
/// remote data service, with operator feedback on every mutation outcome.
pub struct CollectionStore<R: Record> {
    inner: Arc<RwLock<Inner<R>>>,
    service: Arc<dyn DataService<R>>,
    notifier: Arc<dyn Notify>,
    label: &'static str,
    open: Arc<AtomicBool>,
}

impl<R: Record> Clone for CollectionStore<R> {
    fn clone(&self) -> Self {
        CollectionStore {
            inner: Arc::clone(&self.inner),
            service: Arc::clone(&self.service),
            notifier: Arc::clone(&self.notifier),
            label: self.label,
            open: Arc::clone(&self.open),
        }
    }
}

impl<R: Record> CollectionStore<R> {
    /// Create an empty store over the given service and notifier. `label`
    /// is the display name used in notification messages (e.g. "User").
    pub fn new(
        label: &'static str,
        service: Arc<dyn DataService<R>>,
        notifier: Arc<dyn Notify>,
    ) -> Self {
        CollectionStore {
            inner: Arc::new(RwLock::new(Inner {
                records: Vec::new(),
                phase: LoadPhase::Pending,
            })),
            service,
            notifier,
            label,
            open: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Fetch the full collection and replace the store's contents
    /// atomically. On failure prior contents stay intact and the store
    /// surfaces [`LoadPhase::Failed`] if nothing was ever loaded.
    pub async fn load(&self) -> Result<usize, StoreError> {
        let result = self.service.list().await;

        if !self.is_open() {
            warn!("{}: discarding list response after close", R::COLLECTION);
            return Err(StoreError::Closed);
        }

        match result {
            Ok(records) => {
                let count = records.len();
                let mut inner = self
                    .inner
                    .write()
                    .map_err(|_| StoreError::LockPoisoned("load"))?;
                inner.records = records;
                inner.phase = LoadPhase::Ready;
                debug!("{}: loaded {} records", R::COLLECTION, count);
                Ok(count)
            }
            Err(err) => {
                {
                    let mut inner = self
                        .inner
                        .write()
                        .map_err(|_| StoreError::LockPoisoned("load"))?;
                    if inner.phase == LoadPhase::Pending {
                        inner.phase = LoadPhase::Failed;
                    }
                }
                warn!("{}: load failed: {}", R::COLLECTION, err);
                self.notifier.error(err.message());
                Err(err.into())
            }
        }
    }

    /// Send a draft to the service; on success append the canonical record
    /// the service returned.
    pub async fn create(&self, draft: &R) -> Result<R, StoreError> {
        let result = self.service.create(draft).await;

        if !self.is_open() {
            warn!("{}: discarding create response after close", R::COLLECTION);
            return Err(StoreError::Closed);
        }

        match result {
            Ok(record) => {
                {
                    let mut inner = self
                        .inner
                        .write()
                        .map_err(|_| StoreError::LockPoisoned("create"))?;
                    inner.records.push(record.clone());
                }
                debug!("{}: created {}", R::COLLECTION, record.id());
                self.notifier
                    .success(&format!("{} created successfully!", self.label));
                Ok(record)
            }
            Err(err) => {
                warn!("{}: create failed: {}", R::COLLECTION, err);
                self.notifier.error(err.message());
                Err(err.into())
            }
        }
    }

    /// Send a draft for the identified record; on success replace that
    /// single entry with the canonical record.
    pub async fn update(&self, id: &str, draft: &R) -> Result<R, StoreError> {
        let result = self.service.update(id, draft).await;

        if !self.is_open() {
            warn!("{}: discarding update response after close", R::COLLECTION);
            return Err(StoreError::Closed);
        }

        match result {
            Ok(record) => {
                {
                    let mut inner = self
                        .inner
                        .write()
                        .map_err(|_| StoreError::LockPoisoned("update"))?;
                    if let Some(existing) = inner.records.iter_mut().find(|r| r.id() == id) {
                        *existing = record.clone();
                    } else {
                        warn!("{}: update acknowledged unknown id {}", R::COLLECTION, id);
                    }
                }
                debug!("{}: updated {}", R::COLLECTION, id);
                self.notifier
                    .success(&format!("{} updated successfully!", self.label));
                Ok(record)
            }
            Err(err) => {
                warn!("{}: update failed: {}", R::COLLECTION, err);
                self.notifier.error(err.message());
                Err(err.into())
            }
        }
    }

    /// Delete the identified record; on success remove the entry.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let result = self.service.delete(id).await;

        if !self.is_open() {
            warn!("{}: discarding delete response after close", R::COLLECTION);
            return Err(StoreError::Closed);
        }

        match result {
            Ok(()) => {
                {
                    let mut inner = self
                        .inner
                        .write()
                        .map_err(|_| StoreError::LockPoisoned("delete"))?;
                    inner.records.retain(|r| r.id() != id);
                }
                debug!("{}: deleted {}", R::COLLECTION, id);
                self.notifier
                    .success(&format!("{} deleted successfully!", self.label));
                Ok(())
            }
            Err(err) => {
                warn!("{}: delete failed: {}", R::COLLECTION, err);
                self.notifier.error(err.message());
                Err(err.into())
            }
        }
    }

    /// The store's records, in store order.
    pub fn records(&self) -> Result<Vec<R>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(inner.records.clone())
    }

    /// Look up a single record by identifier.
    pub fn get(&self, id: &str) -> Result<Option<R>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(inner.records.iter().find(|r| r.id() == id).cloned())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(inner.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Current load lifecycle phase.
    pub fn phase(&self) -> Result<LoadPhase, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(inner.phase)
    }

    /// Tear the store down. In-flight responses completing after this are
    /// discarded without mutating state or notifying.
    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}
