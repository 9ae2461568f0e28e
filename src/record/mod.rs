//! Records — field-addressable collection entries.
//!
//! Every entry in a managed collection carries a stable, service-assigned
//! identifier and exposes its fields as a name → value mapping. The query
//! engine and edit sessions operate on that mapping, never on the concrete
//! record types, so one engine serves every collection shape.
//!
//! ## Example
//!
//! ```ignore
//! use curator::{FieldValue, Fielded, Record};
//!
//! #[derive(Serialize, Deserialize, Clone, Record)]
//! #[record(collection = "users")]
//! struct User {
//!     #[record(id)]
//!     pub id: String,
//!     pub name: String,
//! }
//! ```

mod field;

use serde::{de::DeserializeOwned, Serialize};

pub use field::{FieldError, FieldValue};

/// Trait for types managed as collection records.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this record type (e.g., "users", "roles").
    const COLLECTION: &'static str;

    /// Returns the service-assigned identifier. Empty on unsaved drafts.
    fn id(&self) -> &str;

    /// Overwrite the identifier with the service-assigned one.
    fn set_id(&mut self, id: String);
}

/// Field-name → value access over a record.
///
/// Unknown field names read as `None` and reject writes with
/// [`FieldError::Unknown`].
pub trait Fielded {
    /// Read a field by name.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Write a field by name.
    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError>;
}
