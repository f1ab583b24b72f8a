use async_trait::async_trait;
use crudbase_core::AppResult;
use crudbase_domain::{CrudDefinition, CrudId, CrudItem, CrudItemId, EmailAddress};

use super::CrudItemQuery;

/// Repository port for CRUD definitions.
#[async_trait]
pub trait CrudDefinitionRepository: Send + Sync {
    /// Persists a new definition.
    async fn create_definition(&self, definition: CrudDefinition) -> AppResult<()>;

    /// Finds a definition by identifier.
    async fn find_definition(&self, crud_id: CrudId) -> AppResult<Option<CrudDefinition>>;

    /// Lists definitions owned by `creator_email`, oldest first.
    async fn list_definitions_by_creator(
        &self,
        creator_email: &EmailAddress,
    ) -> AppResult<Vec<CrudDefinition>>;

    /// Overwrites an existing definition. Fails with `NotFound` when absent.
    async fn update_definition(&self, definition: CrudDefinition) -> AppResult<()>;

    /// Removes a definition. Returns whether a row was removed.
    async fn delete_definition(&self, crud_id: CrudId) -> AppResult<bool>;
}

/// Repository port for CRUD items and their text index.
#[async_trait]
pub trait CrudItemRepository: Send + Sync {
    /// Persists a new item.
    async fn create_item(&self, item: CrudItem) -> AppResult<()>;

    /// Finds an item by identifier.
    async fn find_item(&self, item_id: CrudItemId) -> AppResult<Option<CrudItem>>;

    /// Returns items of one definition ordered by creation, windowed by offset/limit.
    ///
    /// Text queries require the text index to exist.
    async fn query_items(&self, query: CrudItemQuery) -> AppResult<Vec<CrudItem>>;

    /// Overwrites an existing item. Fails with `NotFound` when absent.
    async fn update_item(&self, item: CrudItem) -> AppResult<()>;

    /// Removes an item and returns it, or `None` when it did not exist.
    async fn delete_item(&self, item_id: CrudItemId) -> AppResult<Option<CrudItem>>;

    /// Removes every item of a definition in one batch and returns how many were removed.
    async fn delete_items_by_crud(&self, crud_id: CrudId) -> AppResult<u64>;

    /// Returns whether the free-text index exists.
    async fn text_index_exists(&self) -> AppResult<bool>;

    /// Creates the free-text index if it does not exist yet.
    ///
    /// Implementations treat an index created concurrently by another caller as success.
    async fn create_text_index(&self) -> AppResult<()>;
}
