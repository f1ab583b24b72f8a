use crudbase_domain::{ProposedField, merge_item_fields, validate_and_shape};

use super::*;

impl CrudService {
    /// Creates an item whose fields are validated and reshaped by the definition schema.
    ///
    /// Labels the schema does not declare are dropped.
    pub async fn create_item(&self, crud_id: CrudId, input: CreateItemInput) -> AppResult<CrudItem> {
        let definition = self.require_definition(crud_id).await?;
        let fields = validate_and_shape(definition.fields(), &input.fields)?;
        let creator_email = input
            .creator_email
            .filter(|email| !email.trim().is_empty())
            .map(EmailAddress::new)
            .transpose()?;

        let item = CrudItem::new(crud_id, fields, creator_email);
        self.item_repository.create_item(item.clone()).await?;

        Ok(item)
    }

    /// Merges `fields` into an existing item by label.
    ///
    /// Labels the item does not already carry are ignored.
    pub async fn update_item(
        &self,
        crud_id: CrudId,
        item_id: CrudItemId,
        fields: Vec<ProposedField>,
    ) -> AppResult<CrudItem> {
        let definition = self.require_definition(crud_id).await?;
        let mut item = self.require_item(item_id).await?;
        if item.crud_id() != crud_id {
            return Err(AppError::NotFound(format!(
                "item '{item_id}' not found in crud '{crud_id}'"
            )));
        }

        let merged = merge_item_fields(definition.fields(), item.fields(), &fields)?;
        item.replace_fields(merged);
        self.item_repository.update_item(item.clone()).await?;

        Ok(item)
    }

    /// Deletes an item, returning it when it existed.
    pub async fn delete_item(&self, item_id: CrudItemId) -> AppResult<Option<CrudItem>> {
        self.item_repository.delete_item(item_id).await
    }
}
