use tracing::info;

use super::*;

/// `duplicate_table`, raised when the index already exists.
const DUPLICATE_RELATION: &str = "42P07";

/// `unique_violation`, raised on `pg_class` when two sessions create the index at once.
const UNIQUE_VIOLATION: &str = "23505";

impl PostgresCrudRepository {
    pub(super) async fn text_index_exists_impl(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM pg_indexes
                WHERE schemaname = current_schema()
                  AND tablename = 'crud_items'
                  AND indexname = $1
            )
            "#,
        )
        .bind(TEXT_INDEX_NAME)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to inspect item indexes: {error}")))
    }

    pub(super) async fn create_text_index_impl(&self) -> AppResult<()> {
        let statement = format!(
            "CREATE INDEX IF NOT EXISTS {TEXT_INDEX_NAME} ON crud_items USING GIN (to_tsvector('simple', search_text))"
        );

        match sqlx::query(&statement).execute(&self.pool).await {
            Ok(_) => {
                info!(index = TEXT_INDEX_NAME, "ensured item text index");
                Ok(())
            }
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && matches!(
                        database_error.code().as_deref(),
                        Some(DUPLICATE_RELATION | UNIQUE_VIOLATION)
                    )
                {
                    return Ok(());
                }

                Err(AppError::Internal(format!(
                    "failed to create item text index: {error}"
                )))
            }
        }
    }
}
