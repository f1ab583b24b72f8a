//! Application services and ports.

#![forbid(unsafe_code)]

mod crud_ports;
mod crud_service;
mod user_service;

pub use crud_ports::{
    CascadeDeleteResult, CreateCrudInput, CreateItemInput, CrudDefinitionRepository,
    CrudItemQuery, CrudItemRepository, FieldSpecInput, ItemListQuery, ItemPage, UpdateCrudInput,
    UserAccessInput,
};
pub use crud_service::{CrudService, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use user_service::{
    AuthOutcome, AuthenticatedUser, DEFAULT_TOKEN_TTL_HOURS, RegisterUserInput,
    RegistrationOutcome, UserRepository, UserService,
};
