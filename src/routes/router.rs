use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::handlers::{handle_poll, health};

pub fn create_router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/jmx", post(handle_poll))
        .layer(TraceLayer::new_for_http())
        .with_state(config)
}
