use crudbase_application::{CreateItemInput, ItemListQuery, ItemPage};
use crudbase_core::AppError;
use crudbase_domain::{CrudItem, FieldValue, ItemField, ProposedField};

use crate::dto::FieldSpecResponse;

use super::types::{
    CreateItemRequest, CrudItemResponse, ItemFieldRequest, ItemFieldResponse, ItemPageResponse,
    ListItemsQuery, UpdateItemRequest,
};

impl TryFrom<ItemFieldRequest> for ProposedField {
    type Error = AppError;

    fn try_from(value: ItemFieldRequest) -> Result<Self, Self::Error> {
        let field_value = FieldValue::from_json(value.value).map_err(|error| {
            AppError::Validation(format!("field {}: {}", value.label, error.detail()))
        })?;

        Ok(Self::new(value.label, field_value))
    }
}

impl TryFrom<CreateItemRequest> for CreateItemInput {
    type Error = AppError;

    fn try_from(value: CreateItemRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            fields: proposed_fields(value.fields)?,
            creator_email: value.creator_email,
        })
    }
}

impl UpdateItemRequest {
    /// Converts the submitted pairs into proposed fields.
    pub fn into_proposed_fields(self) -> Result<Vec<ProposedField>, AppError> {
        proposed_fields(self.fields)
    }
}

fn proposed_fields(fields: Option<Vec<ItemFieldRequest>>) -> Result<Vec<ProposedField>, AppError> {
    fields
        .ok_or_else(|| AppError::Validation("fields are required".to_owned()))?
        .into_iter()
        .map(ProposedField::try_from)
        .collect()
}

impl From<ListItemsQuery> for ItemListQuery {
    fn from(value: ListItemsQuery) -> Self {
        Self {
            search: value.search,
            page: value.page,
            page_size: value.page_size,
        }
    }
}

impl From<&ItemField> for ItemFieldResponse {
    fn from(value: &ItemField) -> Self {
        Self {
            label: value.label().to_owned(),
            field_type: value.field_type().as_str().to_owned(),
            required: value.required(),
            options: value.options().map(<[String]>::to_vec),
            value: value.value().map(FieldValue::to_json),
        }
    }
}

impl From<CrudItem> for CrudItemResponse {
    fn from(value: CrudItem) -> Self {
        Self {
            id: value.id().to_string(),
            crud_id: value.crud_id().to_string(),
            fields: value.fields().iter().map(ItemFieldResponse::from).collect(),
            creator_email: value.creator_email().map(|email| email.as_str().to_owned()),
            created_at: value.created_at().to_rfc3339(),
        }
    }
}

impl From<ItemPage> for ItemPageResponse {
    fn from(value: ItemPage) -> Self {
        Self {
            items: value.items.into_iter().map(CrudItemResponse::from).collect(),
            name: value.name,
            fields: value.fields.iter().map(FieldSpecResponse::from).collect(),
        }
    }
}
