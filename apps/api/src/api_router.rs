use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use crudbase_core::AppError;
use tower_http::trace::TraceLayer;

use crate::api_config::ApiConfig;
use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(app_state: AppState, config: &ApiConfig) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(&config.cors_allowed_origin)?;

    let session_routes = Router::new()
        .route("/auth/me", get(handlers::auth::me_handler))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_session,
        ));

    Ok(Router::new()
        .route("/", get(handlers::health::health_handler))
        .route(
            "/auth/login",
            get(handlers::auth::login_query_handler).post(handlers::auth::login_handler),
        )
        .merge(session_routes)
        .route(
            "/users",
            get(handlers::users::list_users_handler).post(handlers::users::create_user_handler),
        )
        .route(
            "/cruds",
            get(handlers::cruds::list_cruds_handler).post(handlers::cruds::create_crud_handler),
        )
        .route(
            "/crud/item/{item_id}",
            get(handlers::items::get_item_handler).delete(handlers::items::delete_item_handler),
        )
        .route(
            "/crud/{crud_id}",
            get(handlers::cruds::get_crud_handler)
                .put(handlers::cruds::update_crud_handler)
                .delete(handlers::cruds::delete_crud_handler),
        )
        .route(
            "/crud/{crud_id}/list",
            get(handlers::items::list_items_handler),
        )
        .route(
            "/crud/{crud_id}/item",
            post(handlers::items::create_item_handler),
        )
        .route(
            "/crud/{crud_id}/item/{item_id}",
            put(handlers::items::update_item_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
