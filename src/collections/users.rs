//! The users collection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::CollectionConfig;
use crate::record::{FieldError, FieldValue, Fielded};
use crate::Record;

use super::Role;

/// Account status of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
        }
    }

    /// Parse the wire/form representation.
    pub fn parse(value: &str) -> Option<Status> {
        match value {
            "active" => Some(Status::Active),
            "inactive" => Some(Status::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A managed user account. `role` references a [`Role`] by name; `email`
/// is unique per the service contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(collection = "users")]
pub struct User {
    #[record(id)]
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: Status,
}

impl Fielded for User {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(FieldValue::text(&self.name)),
            "email" => Some(FieldValue::text(&self.email)),
            "role" => Some(FieldValue::text(&self.role)),
            "status" => Some(FieldValue::text(self.status.as_str())),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        match name {
            "name" => self.name = value.expect_text(name)?,
            "email" => self.email = value.expect_text(name)?,
            "role" => self.role = value.expect_text(name)?,
            "status" => {
                let text = value.expect_text(name)?;
                self.status = Status::parse(&text).ok_or_else(|| FieldError::Invalid {
                    field: name.to_string(),
                    reason: "expected active or inactive".to_string(),
                })?;
            }
            _ => return Err(FieldError::Unknown(name.to_string())),
        }
        Ok(())
    }
}

/// Screen configuration for the users collection.
pub const CONFIG: CollectionConfig = CollectionConfig {
    label: "User",
    searchable: &["name", "email"],
    filterable: &["status", "role"],
    required: &["name", "email"],
    immutable_on_edit: &[],
    default_sort: "name",
    page_size: 10,
};

/// An empty draft for "Add New", seeded with the first available role and
/// an active status. With no roles loaded the role field stays empty.
pub fn default_draft(roles: &[Role]) -> User {
    User {
        id: String::new(),
        name: String::new(),
        email: String::new(),
        role: roles
            .first()
            .map(|role| role.name.clone())
            .unwrap_or_default(),
        status: Status::Active,
    }
}
