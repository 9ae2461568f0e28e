//! InMemoryDataService - order-preserving service double for testing and
//! development.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;

use crate::record::Record;

use super::{DataService, ServiceError};

type KeyFn<R> = dyn Fn(&R) -> String + Send + Sync;

struct UniqueKey<R> {
    label: &'static str,
    extract: Box<KeyFn<R>>,
}

/// In-memory data service backed by a record list.
///
/// Preserves service-side ordering, assigns sequential identifiers on
/// create, and can enforce a uniqueness key so tests exercise
/// server-reported validation text. Clone-friendly via Arc.
pub struct InMemoryDataService<R> {
    records: Arc<RwLock<Vec<R>>>,
    next_id: Arc<AtomicU64>,
    unique: Option<Arc<UniqueKey<R>>>,
    fail_next: Arc<Mutex<Option<ServiceError>>>,
}

impl<R> Clone for InMemoryDataService<R> {
    fn clone(&self) -> Self {
        InMemoryDataService {
            records: Arc::clone(&self.records),
            next_id: Arc::clone(&self.next_id),
            unique: self.unique.clone(),
            fail_next: Arc::clone(&self.fail_next),
        }
    }
}

impl<R: Record> Default for InMemoryDataService<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> InMemoryDataService<R> {
    /// Create an empty service.
    pub fn new() -> Self {
        InMemoryDataService {
            records: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            unique: None,
            fail_next: Arc::new(Mutex::new(None)),
        }
    }

    /// Seed the service with existing records. Records without an identifier
    /// get one assigned, as the real service would have done.
    pub fn with_records(records: Vec<R>) -> Self {
        let next_id = AtomicU64::new(1);
        let seeded: Vec<R> = records
            .into_iter()
            .map(|mut record| {
                if record.id().is_empty() {
                    let n = next_id.fetch_add(1, Ordering::Relaxed);
                    record.set_id(format!("{}-{}", R::COLLECTION, n));
                }
                record
            })
            .collect();

        InMemoryDataService {
            records: Arc::new(RwLock::new(seeded)),
            next_id: Arc::new(next_id),
            unique: None,
            fail_next: Arc::new(Mutex::new(None)),
        }
    }

    /// Enforce a uniqueness key (e.g. a user's email, a role's name).
    /// Violations are rejected with `Save` carrying validation text.
    pub fn with_unique_key<F>(mut self, label: &'static str, extract: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.unique = Some(Arc::new(UniqueKey {
            label,
            extract: Box::new(extract),
        }));
        self
    }

    /// Queue a single-shot failure: the next operation fails with `error`
    /// instead of running.
    pub fn fail_next(&self, error: ServiceError) {
        if let Ok(mut slot) = self.fail_next.lock() {
            *slot = Some(error);
        }
    }

    /// Records currently held by the service, in service order.
    pub fn snapshot(&self) -> Vec<R> {
        self.records
            .read()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    fn assign_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", R::COLLECTION, n)
    }

    /// Round-trip a draft through the wire format, yielding the canonical
    /// record the real service would echo back.
    fn canonicalize(&self, draft: &R) -> Result<R, ServiceError> {
        let value =
            serde_json::to_value(draft).map_err(|e| ServiceError::Save(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| ServiceError::Save(e.to_string()))
    }

    fn take_failure(&self) -> Option<ServiceError> {
        self.fail_next.lock().ok().and_then(|mut slot| slot.take())
    }

    fn check_unique(&self, records: &[R], draft: &R, skip_id: Option<&str>) -> Result<(), ServiceError> {
        let Some(unique) = &self.unique else {
            return Ok(());
        };

        let key = (unique.extract)(draft);
        let taken = records.iter().any(|existing| {
            skip_id != Some(existing.id()) && (unique.extract)(existing) == key
        });

        if taken {
            return Err(ServiceError::Save(format!(
                "a {} with this {} already exists",
                R::COLLECTION.trim_end_matches('s'),
                unique.label
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: Record> DataService<R> for InMemoryDataService<R> {
    async fn list(&self) -> Result<Vec<R>, ServiceError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        let records = self
            .records
            .read()
            .map_err(|_| ServiceError::Fetch("service lock poisoned".to_string()))?;
        Ok(records.clone())
    }

    async fn create(&self, draft: &R) -> Result<R, ServiceError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        let mut records = self
            .records
            .write()
            .map_err(|_| ServiceError::Save("service lock poisoned".to_string()))?;

        self.check_unique(&records, draft, None)?;

        let mut canonical = self.canonicalize(draft)?;
        canonical.set_id(self.assign_id());
        records.push(canonical.clone());
        Ok(canonical)
    }

    async fn update(&self, id: &str, draft: &R) -> Result<R, ServiceError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        let mut records = self
            .records
            .write()
            .map_err(|_| ServiceError::Save("service lock poisoned".to_string()))?;

        self.check_unique(&records, draft, Some(id))?;

        let position = records
            .iter()
            .position(|existing| existing.id() == id)
            .ok_or_else(|| ServiceError::Save(format!("{} not found: {}", R::COLLECTION, id)))?;

        let mut canonical = self.canonicalize(draft)?;
        canonical.set_id(id.to_string());
        records[position] = canonical.clone();
        Ok(canonical)
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        let mut records = self
            .records
            .write()
            .map_err(|_| ServiceError::Delete("service lock poisoned".to_string()))?;

        let position = records
            .iter()
            .position(|existing| existing.id() == id)
            .ok_or_else(|| ServiceError::Delete(format!("{} not found: {}", R::COLLECTION, id)))?;

        records.remove(position);
        Ok(())
    }
}
