mod auth;
mod common;
mod cruds;
mod items;
mod users;

pub use auth::{AuthLoginRequest, AuthLoginResponse};
pub use common::HealthResponse;
pub use cruds::{
    CreateCrudRequest, CrudResponse, DeleteCrudResponse, FieldSpecRequest, FieldSpecResponse,
    ListCrudsQuery, UpdateCrudRequest, UserAccessRequest, UserAccessResponse,
};
pub use items::{
    CreateItemRequest, CrudItemResponse, ItemFieldRequest, ItemFieldResponse, ItemPageResponse,
    ListItemsQuery, UpdateItemRequest,
};
pub use users::{CreateUserRequest, UserResponse};
