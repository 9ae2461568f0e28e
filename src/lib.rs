//! curator — client-side collection management for admin consoles.
//!
//! One generic engine covers the shared pattern behind every
//! list-management screen: fetch a collection from a remote data service,
//! apply search/filter/sort criteria, paginate the result, and reconcile
//! local state with server-driven create/update/delete operations while
//! giving the operator immediate, consistent feedback.

// Lets the derive macro refer to `curator::Record` from inside this crate.
extern crate self as curator;

pub mod collections;
mod config;
mod confirm;
mod notify;
pub mod query;
mod record;
mod screen;
mod service;
mod session;
mod store;

pub use config::CollectionConfig;
pub use confirm::DeleteConfirmation;
pub use notify::{Notification, NotificationKind, Notify, NullNotifier, RecordingNotifier};
pub use query::{Criteria, Page, SortDirection, SortSpec};
pub use record::{FieldError, FieldValue, Fielded, Record};
pub use screen::{CollectionScreen, ScreenError};
pub use service::{DataService, InMemoryDataService, ServiceError};
pub use session::{EditMode, EditSession, FormError};
pub use store::{CollectionStore, LoadPhase, StoreError};

#[cfg(feature = "emitter")]
pub use notify::EmitterNotifier;

// Re-export the derive macro so consumers only depend on this crate.
pub use curator_macros::Record;

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
