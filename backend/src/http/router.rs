//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing,
//! panic catching), and creates the axum router ready for serving.

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::dto::ApiResponse;
use super::handlers;
use super::state::AppState;
use crate::config::DEFAULT_MAX_BODY_BYTES;

/// Create the main application router with the default body limit.
pub fn create_router(state: AppState) -> Router {
    create_router_with_limit(state, DEFAULT_MAX_BODY_BYTES)
}

/// Create the main application router with all routes and middleware.
pub fn create_router_with_limit(state: AppState, max_body_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    let api = Router::new()
        .route("/Person", post(handlers::create_person))
        .route("/Person/people", get(handlers::get_people))
        .route(
            "/Person/add-astronaut-detail",
            post(handlers::add_astronaut_detail),
        )
        .route(
            "/Person/{name}",
            get(handlers::get_person_by_name).put(handlers::update_person),
        )
        .route(
            "/AstronautDetail",
            get(handlers::get_astronaut_details).post(handlers::create_astronaut_detail),
        )
        .route("/AstronautDuty", post(handlers::create_astronaut_duty))
        .route(
            "/AstronautDuty/{name}",
            get(handlers::get_astronaut_duties_by_name),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .with_state(state)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Handler panicked");
    ApiResponse::<()>::failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        .into_response()
}
