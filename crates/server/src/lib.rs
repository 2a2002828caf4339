pub mod access;
pub mod config;
pub mod doc;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;

/// Protected routes with claims mapped to a [`access::Caller`].
///
/// Token verification is layered on by the caller of this function, so
/// tests can inject a `Caller` directly.
pub fn protected_routes(state: state::AppState) -> Router {
    routes::api_routes(state).layer(middleware::from_fn(access::attach_caller))
}

/// Combines the public routes with an already-authenticated API router
pub fn app(api: Router) -> Router {
    routes::public_routes()
        .merge(api)
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
}
