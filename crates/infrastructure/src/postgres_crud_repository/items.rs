use super::*;

impl PostgresCrudRepository {
    pub(super) async fn create_item_impl(&self, item: &CrudItem) -> AppResult<()> {
        let fields = to_json(item.fields(), "item fields")?;

        let result = sqlx::query(
            r#"
            INSERT INTO crud_items (id, crud_id, fields, search_text, creator_email, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.crud_id().as_uuid())
        .bind(&fields)
        .bind(item.search_document())
        .bind(item.creator_email().map(EmailAddress::as_str))
        .bind(item.created_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23503")
                {
                    return Err(AppError::NotFound(format!(
                        "crud '{}' not found",
                        item.crud_id()
                    )));
                }

                Err(AppError::Internal(format!(
                    "failed to create item for crud '{}': {error}",
                    item.crud_id()
                )))
            }
        }
    }

    pub(super) async fn find_item_impl(&self, item_id: CrudItemId) -> AppResult<Option<CrudItem>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, crud_id, fields, creator_email, created_at
            FROM crud_items
            WHERE id = $1
            "#,
        )
        .bind(item_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find item '{item_id}': {error}")))?;

        row.map(item_from_row).transpose()
    }

    pub(super) async fn update_item_impl(&self, item: &CrudItem) -> AppResult<()> {
        let fields = to_json(item.fields(), "item fields")?;

        let result = sqlx::query(
            r#"
            UPDATE crud_items
            SET fields = $2, search_text = $3
            WHERE id = $1
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(&fields)
        .bind(item.search_document())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to update item '{}': {error}", item.id()))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("item '{}' not found", item.id())));
        }

        Ok(())
    }

    pub(super) async fn delete_item_impl(&self, item_id: CrudItemId) -> AppResult<Option<CrudItem>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            DELETE FROM crud_items
            WHERE id = $1
            RETURNING id, crud_id, fields, creator_email, created_at
            "#,
        )
        .bind(item_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to delete item '{item_id}': {error}"))
        })?;

        row.map(item_from_row).transpose()
    }

    pub(super) async fn delete_items_by_crud_impl(&self, crud_id: CrudId) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM crud_items WHERE crud_id = $1")
            .bind(crud_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to delete items of crud '{crud_id}': {error}"
                ))
            })?;

        Ok(result.rows_affected())
    }
}
