//! CollectionScreen — one generic management screen over any collection.
//!
//! The users and roles screens in an admin console are this one type plus
//! a [`CollectionConfig`]: the store, query criteria, edit session and
//! delete confirmation are composed here, and every operator intent maps
//! to a method. Concrete screens supply configuration, not logic.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use curator::{collections::users, CollectionScreen, InMemoryDataService, NullNotifier};
//!
//! let service = Arc::new(InMemoryDataService::new());
//! let mut screen = CollectionScreen::new(users::CONFIG, service, Arc::new(NullNotifier));
//! screen.load().await?;
//! let page = screen.view()?;
//! ```

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::config::CollectionConfig;
use crate::confirm::DeleteConfirmation;
use crate::notify::Notify;
use crate::query::{self, Criteria, Page};
use crate::record::{FieldValue, Fielded, Record};
use crate::service::DataService;
use crate::session::{EditMode, EditSession, FormError};
use crate::store::{CollectionStore, LoadPhase, StoreError};

/// Error type for screen operations: form-level rejections keep the edit
/// session open; store-level failures have already been notified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    Form(FormError),
    Store(StoreError),
}

impl fmt::Display for ScreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenError::Form(err) => write!(f, "{}", err),
            ScreenError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ScreenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScreenError::Form(err) => Some(err),
            ScreenError::Store(err) => Some(err),
        }
    }
}

impl From<FormError> for ScreenError {
    fn from(err: FormError) -> Self {
        ScreenError::Form(err)
    }
}

impl From<StoreError> for ScreenError {
    fn from(err: StoreError) -> Self {
        ScreenError::Store(err)
    }
}

/// A collection-management screen instance.
pub struct CollectionScreen<R: Record + Fielded> {
    config: CollectionConfig,
    store: CollectionStore<R>,
    criteria: Criteria,
    session: Option<EditSession<R>>,
    confirmation: DeleteConfirmation<R>,
}

impl<R: Record + Fielded> CollectionScreen<R> {
    pub fn new(
        config: CollectionConfig,
        service: Arc<dyn DataService<R>>,
        notifier: Arc<dyn Notify>,
    ) -> Self {
        CollectionScreen {
            config,
            store: CollectionStore::new(config.label, service, notifier),
            criteria: Criteria::new(config.default_sort, config.page_size),
            session: None,
            confirmation: DeleteConfirmation::new(),
        }
    }

    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    pub fn store(&self) -> &CollectionStore<R> {
        &self.store
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Initial (or refresh) fetch populating the store.
    pub async fn load(&self) -> Result<usize, StoreError> {
        self.store.load().await
    }

    /// Load lifecycle state, for loading spinners and failure banners.
    pub fn phase(&self) -> Result<LoadPhase, StoreError> {
        self.store.phase()
    }

    /// The filtered, sorted page currently rendered.
    pub fn view(&self) -> Result<Page<R>, StoreError> {
        let records = self.store.records()?;
        Ok(query::view(&records, &self.criteria, self.config.searchable))
    }

    /// Replace the search text. Resets to page 1.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.criteria.set_search(text);
    }

    /// Apply an exact-match filter. Fields not configured filterable are
    /// ignored. Resets to page 1.
    pub fn set_filter(&mut self, field: &str, value: impl Into<String>) {
        if !self.config.filterable.iter().any(|allowed| *allowed == field) {
            debug!("{}: ignoring filter on {}", R::COLLECTION, field);
            return;
        }
        self.criteria.set_filter(field, value);
    }

    /// Drop a filter back to the "all" wildcard. Resets to page 1.
    pub fn clear_filter(&mut self, field: &str) {
        self.criteria.clear_filter(field);
    }

    /// Toggle the sort key: same key flips direction, new key sorts
    /// ascending. Keeps the current page.
    pub fn toggle_sort(&mut self, key: &str) {
        self.criteria.toggle_sort(key);
    }

    /// Jump to a page, clamped into the valid range for the current view.
    pub fn set_page(&mut self, page: usize) -> Result<(), StoreError> {
        let page_count = self.view()?.page_count;
        self.criteria.set_page(page.clamp(1, page_count.max(1)));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Edit session
    // ------------------------------------------------------------------

    /// Begin a create session over a seeded draft ("Add New").
    pub fn begin_create(&mut self, seed: R) {
        self.session = Some(EditSession::create(seed, self.config));
    }

    /// Begin an edit session over a detached copy of the identified
    /// record. Returns false (and opens nothing) for an unknown id.
    pub fn begin_edit(&mut self, id: &str) -> Result<bool, StoreError> {
        match self.store.get(id)? {
            Some(record) => {
                self.session = Some(EditSession::edit(&record, self.config));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn session(&self) -> Option<&EditSession<R>> {
        self.session.as_ref()
    }

    /// Mutate one field of the active draft.
    pub fn update_field(&mut self, name: &str, value: FieldValue) -> Result<(), FormError> {
        match self.session.as_mut() {
            Some(session) => session.update_field(name, value),
            None => Err(FormError::NoSession),
        }
    }

    /// Toggle a tag in a tag-set field of the active draft.
    pub fn toggle_tag(&mut self, field: &str, tag: &str) -> Result<(), FormError> {
        match self.session.as_mut() {
            Some(session) => session.toggle_tag(field, tag),
            None => Err(FormError::NoSession),
        }
    }

    /// Discard the draft and close the session without contacting the
    /// service.
    pub fn cancel_edit(&mut self) {
        self.session = None;
    }

    /// Validate and commit the active draft: create in create mode,
    /// update in edit mode. On success the session closes; on failure it
    /// stays open with the draft intact so the operator can retry.
    pub async fn submit(&mut self) -> Result<(), ScreenError> {
        let (mode, draft) = match &self.session {
            Some(session) => {
                session.validate()?;
                (session.mode(), session.draft().clone())
            }
            None => return Err(FormError::NoSession.into()),
        };

        let result = match mode {
            EditMode::Create => self.store.create(&draft).await.map(|_| ()),
            EditMode::Edit => self.store.update(draft.id(), &draft).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                self.session = None;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    // ------------------------------------------------------------------
    // Delete confirmation
    // ------------------------------------------------------------------

    /// Ask to delete the identified record. Returns false for an unknown
    /// id; a repeated request replaces the pending target.
    pub fn request_delete(&mut self, id: &str) -> Result<bool, StoreError> {
        match self.store.get(id)? {
            Some(record) => {
                self.confirmation.request(record);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The record awaiting delete confirmation, if any.
    pub fn pending_delete(&self) -> Option<&R> {
        self.confirmation.pending()
    }

    /// Abort the pending delete with no service call.
    pub fn cancel_delete(&mut self) {
        self.confirmation.cancel();
    }

    /// Confirm the pending delete. The confirmation returns to idle
    /// regardless of the delete's outcome; from idle this is a no-op.
    pub async fn confirm_delete(&mut self) -> Result<(), StoreError> {
        let Some(record) = self.confirmation.take_confirmed() else {
            return Ok(());
        };
        self.store.delete(record.id()).await?;
        Ok(())
    }

    /// Tear the screen down; in-flight responses are discarded from here
    /// on.
    pub fn close(&self) {
        self.store.close();
    }
}
