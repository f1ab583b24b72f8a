pub mod auth;
pub mod cruds;
pub mod health;
pub mod items;
pub mod users;

use crudbase_core::AppError;
use crudbase_domain::{CrudId, CrudItemId};
use uuid::Uuid;

/// Parses a definition id from a path segment. Malformed ids cannot exist, so they are `NotFound`.
fn parse_crud_id(value: &str) -> Result<CrudId, AppError> {
    Uuid::parse_str(value)
        .map(CrudId::from_uuid)
        .map_err(|_| AppError::NotFound(format!("crud '{value}' not found")))
}

fn parse_item_id(value: &str) -> Result<CrudItemId, AppError> {
    Uuid::parse_str(value)
        .map(CrudItemId::from_uuid)
        .map_err(|_| AppError::NotFound(format!("item '{value}' not found")))
}
