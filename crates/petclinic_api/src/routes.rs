//! HTTP routing configuration
//!
//! This module defines all HTTP routes and their corresponding handlers.
//!
//! # Route Structure
//!
//! - GET    /owners?lastName=&page=            - Search owners by last name
//! - POST   /owners                            - Create owner
//! - GET    /owners/:owner_id                  - Owner with pets and visits
//! - PUT    /owners/:owner_id                  - Update owner
//! - POST   /owners/:owner_id/pets             - Add pet
//! - PUT    /owners/:owner_id/pets/:pet_id     - Update pet
//! - POST   /owners/:owner_id/pets/:pet_id/visits - Add visit
//! - GET    /pettypes                          - List pet types
//! - GET    /vets?page=                        - List vets (cached)
//! - GET    /health                            - Health check
//! - GET    /oups                              - Always fails

use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{handlers, middleware as api_middleware, AppState};

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

/// Per-request timeout applied to every route.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the complete API router with all routes configured.
///
/// This function sets up:
/// - All endpoint routes
/// - CORS configuration
/// - Request tracing
/// - Timeout handling
pub fn create_router(state: AppState) -> Router {
    // Configure CORS for web UI support
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(false)
        // Cache preflight responses for 1 hour
        .max_age(Duration::from_secs(3600));

    // Configure request tracing
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().include_headers(true))
        .on_response(DefaultOnResponse::new().include_headers(true));

    let timeout_layer = TimeoutLayer::new(REQUEST_TIMEOUT);

    Router::new()
        .merge(owner_routes())
        .route("/pettypes", get(handlers::list_pet_types))
        .route("/vets", get(handlers::show_vets))
        .route("/health", get(handlers::health_check))
        .route("/oups", get(handlers::trigger_error))
        .layer(middleware::from_fn(api_middleware::tracing_middleware))
        .layer(timeout_layer)
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

/// Owner routes, including the nested pet and visit resources
fn owner_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/owners",
            get(handlers::find_owners).post(handlers::create_owner),
        )
        .route(
            "/owners/:owner_id",
            get(handlers::show_owner).put(handlers::update_owner),
        )
        .route("/owners/:owner_id/pets", post(handlers::add_pet))
        .route("/owners/:owner_id/pets/:pet_id", put(handlers::update_pet))
        .route(
            "/owners/:owner_id/pets/:pet_id/visits",
            post(handlers::add_visit),
        )
}
