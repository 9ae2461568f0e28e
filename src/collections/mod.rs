//! Concrete collection shapes for the admin console: users and roles.
//!
//! Field names match the data service's wire contract exactly; the
//! identifier crosses the boundary as `_id` and is omitted from unsaved
//! drafts.

pub mod roles;
pub mod users;

pub use roles::Role;
pub use users::{Status, User};
