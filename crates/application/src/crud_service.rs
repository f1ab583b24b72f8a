//! Definition management, item management and item search.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crudbase_core::{AppError, AppResult};
use crudbase_domain::{
    CrudDefinition, CrudId, CrudItem, CrudItemId, EmailAddress, FieldSpec, UserAccess,
};

use crate::crud_ports::{
    CascadeDeleteResult, CreateCrudInput, CreateItemInput, CrudDefinitionRepository,
    CrudItemQuery, CrudItemRepository, FieldSpecInput, ItemListQuery, ItemPage, UpdateCrudInput,
    UserAccessInput,
};

mod definitions;
mod item_search;
mod items_read;
mod items_write;

/// Page number used when a listing omits it.
pub const DEFAULT_PAGE: usize = 1;

/// Page size used when a listing omits it.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Application service for CRUD definitions and their items.
#[derive(Clone)]
pub struct CrudService {
    definition_repository: Arc<dyn CrudDefinitionRepository>,
    item_repository: Arc<dyn CrudItemRepository>,
    text_index_ready: Arc<AtomicBool>,
}

impl CrudService {
    /// Creates a new CRUD service from repository implementations.
    #[must_use]
    pub fn new(
        definition_repository: Arc<dyn CrudDefinitionRepository>,
        item_repository: Arc<dyn CrudItemRepository>,
    ) -> Self {
        Self {
            definition_repository,
            item_repository,
            text_index_ready: Arc::new(AtomicBool::new(false)),
        }
    }

    async fn require_definition(&self, crud_id: CrudId) -> AppResult<CrudDefinition> {
        self.definition_repository
            .find_definition(crud_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("crud '{crud_id}' not found")))
    }

    fn field_specs(fields: Vec<FieldSpecInput>) -> AppResult<Vec<FieldSpec>> {
        fields
            .into_iter()
            .map(|field| FieldSpec::new(field.label, field.field_type, field.required, field.options))
            .collect()
    }

    fn user_accesses(entries: Vec<UserAccessInput>) -> AppResult<Vec<UserAccess>> {
        entries
            .into_iter()
            .map(|entry| Ok(UserAccess::new(EmailAddress::new(entry.email)?, entry.access_level)))
            .collect()
    }
}

#[cfg(test)]
mod tests;
