use super::*;

impl CrudService {
    /// Creates a definition from a name, a non-empty field schema and an owner.
    pub async fn create_definition(&self, input: CreateCrudInput) -> AppResult<CrudDefinition> {
        let definition = CrudDefinition::new(
            input.name,
            Self::field_specs(input.fields)?,
            EmailAddress::new(input.creator_email)?,
            Self::user_accesses(input.users_with_access)?,
        )?;

        self.definition_repository
            .create_definition(definition.clone())
            .await?;

        Ok(definition)
    }

    /// Finds a definition, leaving the absent case to the caller.
    pub async fn find_definition(&self, crud_id: CrudId) -> AppResult<Option<CrudDefinition>> {
        self.definition_repository.find_definition(crud_id).await
    }

    /// Returns a definition or `NotFound`.
    pub async fn get_definition(&self, crud_id: CrudId) -> AppResult<CrudDefinition> {
        self.require_definition(crud_id).await
    }

    /// Lists every definition owned by `creator_email`.
    pub async fn list_definitions_by_owner(
        &self,
        creator_email: &str,
    ) -> AppResult<Vec<CrudDefinition>> {
        let creator_email = EmailAddress::new(creator_email)?;
        self.definition_repository
            .list_definitions_by_creator(&creator_email)
            .await
    }

    /// Overwrites a definition's name and fields in place.
    ///
    /// Existing items keep their fields until they are next updated.
    pub async fn update_definition(
        &self,
        crud_id: CrudId,
        input: UpdateCrudInput,
    ) -> AppResult<CrudDefinition> {
        let mut definition = self.require_definition(crud_id).await?;
        definition.replace_schema(input.name, Self::field_specs(input.fields)?)?;

        self.definition_repository
            .update_definition(definition.clone())
            .await?;

        Ok(definition)
    }

    /// Deletes a definition after removing all of its items.
    ///
    /// Items go first in a single awaited batch. When that batch fails the
    /// definition is kept, so a retry completes the cascade instead of leaving
    /// orphaned items behind.
    ///
    /// An item created between the batch and the definition delete makes the
    /// store refuse with `Conflict`; the batch then runs once more. A second
    /// `Conflict` is returned to the caller with the earlier items already gone.
    pub async fn delete_definition(&self, crud_id: CrudId) -> AppResult<CascadeDeleteResult> {
        let definition = self.require_definition(crud_id).await?;

        let mut deleted_item_count = self.item_repository.delete_items_by_crud(crud_id).await?;

        let deleted = match self.definition_repository.delete_definition(crud_id).await {
            Err(AppError::Conflict(_)) => {
                deleted_item_count += self.item_repository.delete_items_by_crud(crud_id).await?;
                self.definition_repository.delete_definition(crud_id).await?
            }
            result => result?,
        };

        if !deleted {
            return Err(AppError::NotFound(format!("crud '{crud_id}' not found")));
        }

        Ok(CascadeDeleteResult {
            definition,
            deleted_item_count,
        })
    }
}
