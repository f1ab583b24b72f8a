use super::*;

impl PostgresCrudRepository {
    pub(super) async fn create_definition_impl(&self, definition: &CrudDefinition) -> AppResult<()> {
        let fields = to_json(definition.fields(), "crud fields")?;
        let users_with_access = to_json(definition.users_with_access(), "crud access list")?;

        let result = sqlx::query(
            r#"
            INSERT INTO crud_definitions (id, name, fields, creator_email, users_with_access, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(definition.id().as_uuid())
        .bind(definition.name().as_str())
        .bind(&fields)
        .bind(definition.creator_email().as_str())
        .bind(&users_with_access)
        .bind(definition.created_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23505")
                {
                    return Err(AppError::Conflict(format!(
                        "crud '{}' already exists",
                        definition.id()
                    )));
                }

                Err(AppError::Internal(format!(
                    "failed to create crud '{}': {error}",
                    definition.id()
                )))
            }
        }
    }

    pub(super) async fn find_definition_impl(
        &self,
        crud_id: CrudId,
    ) -> AppResult<Option<CrudDefinition>> {
        let row = sqlx::query_as::<_, DefinitionRow>(
            r#"
            SELECT id, name, fields, creator_email, users_with_access, created_at
            FROM crud_definitions
            WHERE id = $1
            "#,
        )
        .bind(crud_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find crud '{crud_id}': {error}")))?;

        row.map(definition_from_row).transpose()
    }

    pub(super) async fn list_definitions_by_creator_impl(
        &self,
        creator_email: &EmailAddress,
    ) -> AppResult<Vec<CrudDefinition>> {
        let rows = sqlx::query_as::<_, DefinitionRow>(
            r#"
            SELECT id, name, fields, creator_email, users_with_access, created_at
            FROM crud_definitions
            WHERE creator_email = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(creator_email.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list cruds for creator '{creator_email}': {error}"
            ))
        })?;

        rows.into_iter().map(definition_from_row).collect()
    }

    pub(super) async fn update_definition_impl(&self, definition: &CrudDefinition) -> AppResult<()> {
        let fields = to_json(definition.fields(), "crud fields")?;
        let users_with_access = to_json(definition.users_with_access(), "crud access list")?;

        let result = sqlx::query(
            r#"
            UPDATE crud_definitions
            SET name = $2, fields = $3, users_with_access = $4
            WHERE id = $1
            "#,
        )
        .bind(definition.id().as_uuid())
        .bind(definition.name().as_str())
        .bind(&fields)
        .bind(&users_with_access)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to update crud '{}': {error}",
                definition.id()
            ))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "crud '{}' not found",
                definition.id()
            )));
        }

        Ok(())
    }

    pub(super) async fn delete_definition_impl(&self, crud_id: CrudId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM crud_definitions WHERE id = $1")
            .bind(crud_id.as_uuid())
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23503")
                {
                    return Err(AppError::Conflict(format!(
                        "crud '{crud_id}' still has items"
                    )));
                }

                Err(AppError::Internal(format!(
                    "failed to delete crud '{crud_id}': {error}"
                )))
            }
        }
    }
}
