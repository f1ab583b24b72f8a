mod conversions;
mod types;

pub use types::{
    CreateCrudRequest, CrudResponse, DeleteCrudResponse, FieldSpecRequest, FieldSpecResponse,
    ListCrudsQuery, UpdateCrudRequest, UserAccessRequest, UserAccessResponse,
};
