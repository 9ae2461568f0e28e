//! Shared fixtures and doubles for the screen tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use curator::collections::{Role, Status, User};
use curator::{DataService, InMemoryDataService, Record, ServiceError};

pub fn user(name: &str, email: &str, role: &str, status: Status) -> User {
    User {
        id: String::new(),
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        status,
    }
}

pub fn role(name: &str, permissions: &[&str]) -> Role {
    Role {
        id: String::new(),
        name: name.to_string(),
        description: None,
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
    }
}

/// Service double whose `create` parks until released, so a teardown can
/// happen while the request is in flight.
pub struct GatedService<R> {
    inner: InMemoryDataService<R>,
    /// Signalled once `create` has been entered.
    pub entered: Arc<Notify>,
    /// Awaited inside `create` before the inner call proceeds.
    pub release: Arc<Notify>,
}

impl<R: Record> GatedService<R> {
    pub fn new(inner: InMemoryDataService<R>) -> Self {
        GatedService {
            inner,
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }
}

#[async_trait]
impl<R: Record> DataService<R> for GatedService<R> {
    async fn list(&self) -> Result<Vec<R>, ServiceError> {
        self.inner.list().await
    }

    async fn create(&self, draft: &R) -> Result<R, ServiceError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.create(draft).await
    }

    async fn update(&self, id: &str, draft: &R) -> Result<R, ServiceError> {
        self.inner.update(id, draft).await
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.inner.delete(id).await
    }
}
