mod crud_inputs;
mod crud_repository;

pub use crud_inputs::{
    CascadeDeleteResult, CreateCrudInput, CreateItemInput, CrudItemQuery, FieldSpecInput,
    ItemListQuery, ItemPage, UpdateCrudInput, UserAccessInput,
};
pub use crud_repository::{CrudDefinitionRepository, CrudItemRepository};
