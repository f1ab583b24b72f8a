use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use crudbase_core::AppError;
use tower_http::cors::{Any, CorsLayer};

use crate::api_config::CorsOriginConfig;

pub(super) fn build_cors_layer(origin: &CorsOriginConfig) -> Result<CorsLayer, AppError> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Ok(match origin {
        CorsOriginConfig::Any => layer.allow_origin(Any),
        CorsOriginConfig::Exact(origin) => layer.allow_origin(
            HeaderValue::from_str(origin).map_err(|error| {
                AppError::Validation(format!("invalid CORS_ALLOWED_ORIGIN: {error}"))
            })?,
        ),
    })
}
