//! PostgreSQL-backed CRUD definition and item repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crudbase_application::{CrudDefinitionRepository, CrudItemQuery, CrudItemRepository};
use crudbase_core::{AppError, AppResult, NonEmptyString};
use crudbase_domain::{
    CrudDefinition, CrudId, CrudItem, CrudItemId, EmailAddress, FieldSpec, ItemField, UserAccess,
};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

mod definitions;
mod item_query;
mod items;
mod text_index;

/// Name of the lazily created full-text index over `crud_items.search_text`.
pub const TEXT_INDEX_NAME: &str = "crud_items_search_text_idx";

/// PostgreSQL implementation of the CRUD repository ports.
#[derive(Clone)]
pub struct PostgresCrudRepository {
    pool: PgPool,
}

impl PostgresCrudRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DefinitionRow {
    id: Uuid,
    name: String,
    fields: Value,
    creator_email: String,
    users_with_access: Value,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct ItemRow {
    id: Uuid,
    crud_id: Uuid,
    fields: Value,
    creator_email: Option<String>,
    created_at: DateTime<Utc>,
}

fn definition_from_row(row: DefinitionRow) -> AppResult<CrudDefinition> {
    let fields: Vec<FieldSpec> = serde_json::from_value(row.fields).map_err(|error| {
        AppError::Internal(format!("invalid stored fields for crud '{}': {error}", row.id))
    })?;
    let users_with_access: Vec<UserAccess> = serde_json::from_value(row.users_with_access)
        .map_err(|error| {
            AppError::Internal(format!(
                "invalid stored access list for crud '{}': {error}",
                row.id
            ))
        })?;

    Ok(CrudDefinition::restore(
        CrudId::from_uuid(row.id),
        NonEmptyString::new(row.name)?,
        fields,
        EmailAddress::new(row.creator_email)?,
        users_with_access,
        row.created_at,
    ))
}

fn item_from_row(row: ItemRow) -> AppResult<CrudItem> {
    let fields: Vec<ItemField> = serde_json::from_value(row.fields).map_err(|error| {
        AppError::Internal(format!("invalid stored fields for item '{}': {error}", row.id))
    })?;

    Ok(CrudItem::restore(
        CrudItemId::from_uuid(row.id),
        CrudId::from_uuid(row.crud_id),
        fields,
        row.creator_email.map(EmailAddress::new).transpose()?,
        row.created_at,
    ))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T, context: &str) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|error| AppError::Internal(format!("failed to serialize {context}: {error}")))
}

#[async_trait]
impl CrudDefinitionRepository for PostgresCrudRepository {
    async fn create_definition(&self, definition: CrudDefinition) -> AppResult<()> {
        self.create_definition_impl(&definition).await
    }

    async fn find_definition(&self, crud_id: CrudId) -> AppResult<Option<CrudDefinition>> {
        self.find_definition_impl(crud_id).await
    }

    async fn list_definitions_by_creator(
        &self,
        creator_email: &EmailAddress,
    ) -> AppResult<Vec<CrudDefinition>> {
        self.list_definitions_by_creator_impl(creator_email).await
    }

    async fn update_definition(&self, definition: CrudDefinition) -> AppResult<()> {
        self.update_definition_impl(&definition).await
    }

    async fn delete_definition(&self, crud_id: CrudId) -> AppResult<bool> {
        self.delete_definition_impl(crud_id).await
    }
}

#[async_trait]
impl CrudItemRepository for PostgresCrudRepository {
    async fn create_item(&self, item: CrudItem) -> AppResult<()> {
        self.create_item_impl(&item).await
    }

    async fn find_item(&self, item_id: CrudItemId) -> AppResult<Option<CrudItem>> {
        self.find_item_impl(item_id).await
    }

    async fn query_items(&self, query: CrudItemQuery) -> AppResult<Vec<CrudItem>> {
        self.query_items_impl(query).await
    }

    async fn update_item(&self, item: CrudItem) -> AppResult<()> {
        self.update_item_impl(&item).await
    }

    async fn delete_item(&self, item_id: CrudItemId) -> AppResult<Option<CrudItem>> {
        self.delete_item_impl(item_id).await
    }

    async fn delete_items_by_crud(&self, crud_id: CrudId) -> AppResult<u64> {
        self.delete_items_by_crud_impl(crud_id).await
    }

    async fn text_index_exists(&self) -> AppResult<bool> {
        self.text_index_exists_impl().await
    }

    async fn create_text_index(&self) -> AppResult<()> {
        self.create_text_index_impl().await
    }
}
