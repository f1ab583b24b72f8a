use crudbase_domain::search_terms;
use sqlx::{Postgres, QueryBuilder};

use super::*;

impl PostgresCrudRepository {
    pub(super) async fn query_items_impl(&self, query: CrudItemQuery) -> AppResult<Vec<CrudItem>> {
        let limit = i64::try_from(query.limit).map_err(|error| {
            AppError::Validation(format!("invalid item query limit: {error}"))
        })?;
        let offset = i64::try_from(query.offset).map_err(|error| {
            AppError::Validation(format!("invalid item query offset: {error}"))
        })?;

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "SELECT id, crud_id, fields, creator_email, created_at FROM crud_items WHERE crud_id = ",
        );
        builder.push_bind(query.crud_id.as_uuid());

        if let Some(search) = query.search.as_deref() {
            let terms = search_terms(search);
            if terms.is_empty() {
                return Ok(Vec::new());
            }

            builder.push(" AND to_tsvector('simple', search_text) @@ plainto_tsquery('simple', ");
            builder.push_bind(terms.join(" "));
            builder.push(")");
        }

        builder.push(" ORDER BY created_at, id LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder
            .build_query_as::<ItemRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to query items of crud '{}': {error}",
                    query.crud_id
                ))
            })?;

        rows.into_iter().map(item_from_row).collect()
    }
}
