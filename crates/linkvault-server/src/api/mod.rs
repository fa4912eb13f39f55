//! API module - Axum routes

pub mod auth;
pub mod content;
pub mod share;

use axum::Router;
use linkvault_core::VaultServices;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the API router with all routes
pub fn create_router(services: VaultServices) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let v1 = Router::new()
        .merge(auth::routes())
        .merge(content::routes())
        .merge(share::routes());

    Router::new()
        .nest("/api/v1", v1)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(services)
}
