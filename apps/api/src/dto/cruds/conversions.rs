use std::str::FromStr;

use crudbase_application::{
    CascadeDeleteResult, CreateCrudInput, FieldSpecInput, UpdateCrudInput, UserAccessInput,
};
use crudbase_core::AppError;
use crudbase_domain::{AccessLevel, CrudDefinition, FieldSpec, FieldType, UserAccess};

use super::types::{
    CreateCrudRequest, CrudResponse, DeleteCrudResponse, FieldSpecRequest, FieldSpecResponse,
    UpdateCrudRequest, UserAccessRequest, UserAccessResponse,
};

impl TryFrom<FieldSpecRequest> for FieldSpecInput {
    type Error = AppError;

    fn try_from(value: FieldSpecRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            label: value.label,
            field_type: FieldType::from_str(value.field_type.as_str())?,
            required: value.required,
            options: value.options,
        })
    }
}

impl From<&FieldSpec> for FieldSpecResponse {
    fn from(value: &FieldSpec) -> Self {
        Self {
            label: value.label().to_owned(),
            field_type: value.field_type().as_str().to_owned(),
            required: value.required(),
            options: value.options().map(<[String]>::to_vec),
        }
    }
}

impl TryFrom<UserAccessRequest> for UserAccessInput {
    type Error = AppError;

    fn try_from(value: UserAccessRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            email: value.email,
            access_level: AccessLevel::from_str(value.access_level.as_str())?,
        })
    }
}

impl From<&UserAccess> for UserAccessResponse {
    fn from(value: &UserAccess) -> Self {
        Self {
            email: value.email().as_str().to_owned(),
            access_level: value.access_level().as_str().to_owned(),
        }
    }
}

impl TryFrom<CreateCrudRequest> for CreateCrudInput {
    type Error = AppError;

    fn try_from(value: CreateCrudRequest) -> Result<Self, Self::Error> {
        let creator_email = value
            .creator_email
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| AppError::Validation("creatorEmail is required".to_owned()))?;

        Ok(Self {
            name: value.name.unwrap_or_default(),
            fields: field_inputs(value.fields)?,
            creator_email,
            users_with_access: value
                .users_with_access
                .unwrap_or_default()
                .into_iter()
                .map(UserAccessInput::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl TryFrom<UpdateCrudRequest> for UpdateCrudInput {
    type Error = AppError;

    fn try_from(value: UpdateCrudRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name.unwrap_or_default(),
            fields: field_inputs(value.fields)?,
        })
    }
}

fn field_inputs(fields: Option<Vec<FieldSpecRequest>>) -> Result<Vec<FieldSpecInput>, AppError> {
    fields
        .unwrap_or_default()
        .into_iter()
        .map(FieldSpecInput::try_from)
        .collect()
}

impl From<CrudDefinition> for CrudResponse {
    fn from(value: CrudDefinition) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().as_str().to_owned(),
            fields: value.fields().iter().map(FieldSpecResponse::from).collect(),
            creator_email: value.creator_email().as_str().to_owned(),
            users_with_access: value
                .users_with_access()
                .iter()
                .map(UserAccessResponse::from)
                .collect(),
            created_at: value.created_at().to_rfc3339(),
        }
    }
}

impl From<CascadeDeleteResult> for DeleteCrudResponse {
    fn from(value: CascadeDeleteResult) -> Self {
        Self {
            definition: CrudResponse::from(value.definition),
            deleted_item_count: value.deleted_item_count,
        }
    }
}
