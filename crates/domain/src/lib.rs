//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod crud;
mod item;
mod item_shaping;
mod user;

pub use crud::{AccessLevel, CrudDefinition, CrudId, FieldSpec, FieldType, UserAccess};
pub use item::{CrudItem, CrudItemId, FieldValue, ItemField, ProposedField, search_terms};
pub use item_shaping::{merge_item_fields, validate_and_shape};
pub use user::{ActiveSession, EmailAddress, User, UserId};
