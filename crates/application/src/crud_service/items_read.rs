use super::*;

impl CrudService {
    /// Returns an item or `NotFound`.
    pub async fn get_item(&self, item_id: CrudItemId) -> AppResult<CrudItem> {
        self.require_item(item_id).await
    }

    pub(super) async fn require_item(&self, item_id: CrudItemId) -> AppResult<CrudItem> {
        self.item_repository
            .find_item(item_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("item '{item_id}' not found")))
    }
}
