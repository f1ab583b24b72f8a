use crudbase_domain::search_terms;
use tracing::debug;

use super::*;

#[async_trait]
impl CrudItemRepository for InMemoryCrudRepository {
    async fn create_item(&self, item: CrudItem) -> AppResult<()> {
        if !self.definitions.read().await.contains_key(&item.crud_id()) {
            return Err(AppError::NotFound(format!(
                "crud '{}' not found",
                item.crud_id()
            )));
        }

        let mut items = self.items.write().await;
        if items.contains_key(&item.id()) {
            return Err(AppError::Conflict(format!(
                "item '{}' already exists",
                item.id()
            )));
        }

        items.insert(item.id(), item);
        Ok(())
    }

    async fn find_item(&self, item_id: CrudItemId) -> AppResult<Option<CrudItem>> {
        Ok(self.items.read().await.get(&item_id).cloned())
    }

    async fn query_items(&self, query: CrudItemQuery) -> AppResult<Vec<CrudItem>> {
        let terms = match query.search.as_deref() {
            Some(search) => {
                if !*self.text_index.read().await {
                    return Err(AppError::Internal(
                        "text search requires the text index".to_owned(),
                    ));
                }
                let terms = search_terms(search);
                if terms.is_empty() {
                    return Ok(Vec::new());
                }
                terms
            }
            None => Vec::new(),
        };

        let items = self.items.read().await;
        let mut matching: Vec<&CrudItem> = items
            .values()
            .filter(|item| item.crud_id() == query.crud_id)
            .filter(|item| matches_terms(item, &terms))
            .collect();
        matching.sort_by_key(|item| (item.created_at(), item.id()));

        Ok(matching
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn update_item(&self, item: CrudItem) -> AppResult<()> {
        let mut items = self.items.write().await;
        let Some(stored) = items.get_mut(&item.id()) else {
            return Err(AppError::NotFound(format!("item '{}' not found", item.id())));
        };

        *stored = item;
        Ok(())
    }

    async fn delete_item(&self, item_id: CrudItemId) -> AppResult<Option<CrudItem>> {
        Ok(self.items.write().await.remove(&item_id))
    }

    async fn delete_items_by_crud(&self, crud_id: CrudId) -> AppResult<u64> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|_, item| item.crud_id() != crud_id);

        Ok((before - items.len()) as u64)
    }

    async fn text_index_exists(&self) -> AppResult<bool> {
        Ok(*self.text_index.read().await)
    }

    async fn create_text_index(&self) -> AppResult<()> {
        let mut text_index = self.text_index.write().await;
        if !*text_index {
            debug!("created in-memory text index");
        }
        *text_index = true;
        Ok(())
    }
}

fn matches_terms(item: &CrudItem, terms: &[String]) -> bool {
    if terms.is_empty() {
        return true;
    }

    let item_terms = search_terms(&item.search_text());
    terms.iter().all(|term| item_terms.contains(term))
}
