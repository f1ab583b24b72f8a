use std::collections::HashMap;

use async_trait::async_trait;
use crudbase_application::{CrudDefinitionRepository, CrudItemQuery, CrudItemRepository};
use crudbase_core::{AppError, AppResult};
use crudbase_domain::{CrudDefinition, CrudId, CrudItem, CrudItemId, EmailAddress};
use tokio::sync::RwLock;

mod items;

/// In-memory CRUD definition and item repository.
///
/// Mirrors the store contract of the PostgreSQL adapter, including the
/// requirement that the text index exists before text queries run.
#[derive(Debug, Default)]
pub struct InMemoryCrudRepository {
    definitions: RwLock<HashMap<CrudId, CrudDefinition>>,
    items: RwLock<HashMap<CrudItemId, CrudItem>>,
    text_index: RwLock<bool>,
}

impl InMemoryCrudRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CrudDefinitionRepository for InMemoryCrudRepository {
    async fn create_definition(&self, definition: CrudDefinition) -> AppResult<()> {
        let mut definitions = self.definitions.write().await;

        if definitions.contains_key(&definition.id()) {
            return Err(AppError::Conflict(format!(
                "crud '{}' already exists",
                definition.id()
            )));
        }

        definitions.insert(definition.id(), definition);
        Ok(())
    }

    async fn find_definition(&self, crud_id: CrudId) -> AppResult<Option<CrudDefinition>> {
        Ok(self.definitions.read().await.get(&crud_id).cloned())
    }

    async fn list_definitions_by_creator(
        &self,
        creator_email: &EmailAddress,
    ) -> AppResult<Vec<CrudDefinition>> {
        let definitions = self.definitions.read().await;

        let mut values: Vec<CrudDefinition> = definitions
            .values()
            .filter_map(|definition| {
                (definition.creator_email() == creator_email).then_some(definition.clone())
            })
            .collect();
        values.sort_by_key(|definition| (definition.created_at(), definition.id()));

        Ok(values)
    }

    async fn update_definition(&self, definition: CrudDefinition) -> AppResult<()> {
        let mut definitions = self.definitions.write().await;
        let Some(stored) = definitions.get_mut(&definition.id()) else {
            return Err(AppError::NotFound(format!(
                "crud '{}' not found",
                definition.id()
            )));
        };

        *stored = definition;
        Ok(())
    }

    async fn delete_definition(&self, crud_id: CrudId) -> AppResult<bool> {
        let mut definitions = self.definitions.write().await;
        if !definitions.contains_key(&crud_id) {
            return Ok(false);
        }

        let has_items = self
            .items
            .read()
            .await
            .values()
            .any(|item| item.crud_id() == crud_id);
        if has_items {
            return Err(AppError::Conflict(format!(
                "crud '{crud_id}' still has items"
            )));
        }

        Ok(definitions.remove(&crud_id).is_some())
    }
}
