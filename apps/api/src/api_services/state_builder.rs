use std::sync::Arc;

use chrono::Duration;
use crudbase_application::{
    CrudDefinitionRepository, CrudItemRepository, CrudService, UserRepository, UserService,
};
use crudbase_infrastructure::{
    InMemoryCrudRepository, InMemoryUserRepository, PostgresCrudRepository,
    PostgresUserRepository,
};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

struct RepositorySet {
    definition_repository: Arc<dyn CrudDefinitionRepository>,
    item_repository: Arc<dyn CrudItemRepository>,
    user_repository: Arc<dyn UserRepository>,
}

/// Wires services over Postgres when a pool is given, else over in-memory adapters.
pub fn build_app_state(pool: Option<PgPool>, config: &ApiConfig) -> AppState {
    let repositories = match pool {
        Some(pool) => postgres_repositories(pool),
        None => in_memory_repositories(),
    };

    AppState {
        crud_service: CrudService::new(
            repositories.definition_repository,
            repositories.item_repository,
        ),
        user_service: UserService::new(repositories.user_repository)
            .with_token_ttl(Duration::hours(config.auth_token_ttl_hours)),
    }
}

fn postgres_repositories(pool: PgPool) -> RepositorySet {
    let crud_repository = Arc::new(PostgresCrudRepository::new(pool.clone()));

    RepositorySet {
        definition_repository: crud_repository.clone(),
        item_repository: crud_repository,
        user_repository: Arc::new(PostgresUserRepository::new(pool)),
    }
}

fn in_memory_repositories() -> RepositorySet {
    let crud_repository = Arc::new(InMemoryCrudRepository::new());

    RepositorySet {
        definition_repository: crud_repository.clone(),
        item_repository: crud_repository,
        user_repository: Arc::new(InMemoryUserRepository::new()),
    }
}
