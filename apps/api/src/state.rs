use crudbase_application::{CrudService, UserService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub crud_service: CrudService,
    pub user_service: UserService,
}
