//! The roles collection.

use serde::{Deserialize, Serialize};

use crate::config::CollectionConfig;
use crate::record::{FieldError, FieldValue, Fielded};
use crate::Record;

/// A role grants a named set of capability tags. The name is the
/// uniqueness key and immutable once the role exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(collection = "roles")]
pub struct Role {
    #[record(id)]
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Fielded for Role {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(FieldValue::text(&self.name)),
            "description" => Some(FieldValue::text(
                self.description.clone().unwrap_or_default(),
            )),
            "permissions" => Some(FieldValue::tags(self.permissions.clone())),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        match name {
            "name" => self.name = value.expect_text(name)?,
            "description" => {
                let text = value.expect_text(name)?;
                self.description = if text.is_empty() { None } else { Some(text) };
            }
            "permissions" => self.permissions = value.expect_tags(name)?,
            _ => return Err(FieldError::Unknown(name.to_string())),
        }
        Ok(())
    }
}

/// Screen configuration for the roles collection.
pub const CONFIG: CollectionConfig = CollectionConfig {
    label: "Role",
    searchable: &["name"],
    filterable: &[],
    required: &["name"],
    immutable_on_edit: &["name"],
    default_sort: "name",
    page_size: 10,
};

/// An empty draft for "Add New".
pub fn default_draft() -> Role {
    Role {
        id: String::new(),
        name: String::new(),
        description: None,
        permissions: Vec::new(),
    }
}
