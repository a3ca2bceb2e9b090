pub mod dto;
pub mod health;
pub mod tweets;

use axum::Router;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::AppState;
use crate::services::error::panic_response;

/// Build all routes for the API
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::routes())
        .merge(tweets::routes())
}

/// Request tracing and panic capture around every route
fn with_layers(router: Router<Arc<AppState>>) -> Router<Arc<AppState>> {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

/// The full application: routes, state, and the top-level layers
pub fn build_app(state: Arc<AppState>) -> Router {
    with_layers(build_routes()).with_state(state)
}
