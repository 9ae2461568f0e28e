//! Edit sessions — the modal-form state behind create and edit.
//!
//! A session holds a detached draft: a copy of the record being created or
//! edited that never aliases the store's entry, so cancelling discards
//! changes cleanly. At most one session is active per screen.

use std::fmt;

use crate::config::CollectionConfig;
use crate::record::{FieldError, FieldValue, Fielded, Record};

/// Whether the session creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Edit,
}

/// Error type for form operations on an edit session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field is empty.
    Missing(String),
    /// The field cannot be changed once the record exists.
    Immutable(String),
    /// Field-level rejection (unknown name, wrong value shape).
    Field(FieldError),
    /// No edit session is active.
    NoSession,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Missing(field) => write!(f, "{} is required", field),
            FormError::Immutable(field) => {
                write!(f, "{} cannot be changed on an existing record", field)
            }
            FormError::Field(err) => write!(f, "{}", err),
            FormError::NoSession => write!(f, "no edit session is active"),
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormError::Field(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for FormError {
    fn from(err: FieldError) -> Self {
        FormError::Field(err)
    }
}

/// One in-progress create or edit, feeding a modal form.
#[derive(Debug, Clone)]
pub struct EditSession<R> {
    mode: EditMode,
    draft: R,
    config: CollectionConfig,
}

impl<R: Record + Fielded> EditSession<R> {
    /// Begin a create session over a seeded empty draft.
    pub fn create(seed: R, config: CollectionConfig) -> Self {
        EditSession {
            mode: EditMode::Create,
            draft: seed,
            config,
        }
    }

    /// Begin an edit session over a detached copy of an existing record.
    pub fn edit(record: &R, config: CollectionConfig) -> Self {
        EditSession {
            mode: EditMode::Edit,
            draft: record.clone(),
            config,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn draft(&self) -> &R {
        &self.draft
    }

    /// Mutate one draft field. The store is never touched. Fields listed
    /// immutable for this collection reject writes in edit mode.
    pub fn update_field(&mut self, name: &str, value: FieldValue) -> Result<(), FormError> {
        if self.locked(name) {
            return Err(FormError::Immutable(name.to_string()));
        }
        self.draft.set_field(name, value)?;
        Ok(())
    }

    /// Toggle a tag's membership in a tag-set field: present becomes
    /// absent, absent becomes present. Toggling twice restores the draft.
    pub fn toggle_tag(&mut self, field: &str, tag: &str) -> Result<(), FormError> {
        if self.locked(field) {
            return Err(FormError::Immutable(field.to_string()));
        }

        let value = self
            .draft
            .field(field)
            .ok_or_else(|| FieldError::Unknown(field.to_string()))?;
        let mut tags = value.expect_tags(field)?;

        if let Some(position) = tags.iter().position(|existing| existing == tag) {
            tags.remove(position);
        } else {
            tags.push(tag.to_string());
        }

        self.draft.set_field(field, FieldValue::Tags(tags))?;
        Ok(())
    }

    fn locked(&self, field: &str) -> bool {
        self.mode == EditMode::Edit
            && self
                .config
                .immutable_on_edit
                .iter()
                .any(|locked| *locked == field)
    }

    /// Check that every required field is non-empty.
    pub fn validate(&self) -> Result<(), FormError> {
        for name in self.config.required {
            let empty = self
                .draft
                .field(name)
                .map(|value| value.is_empty())
                .unwrap_or(true);
            if empty {
                return Err(FormError::Missing((*name).to_string()));
            }
        }
        Ok(())
    }
}
