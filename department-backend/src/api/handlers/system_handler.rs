// src/api/handlers/system_handler.rs

use axum::{routing::get, Router};

async fn root_handler() -> &'static str {
    "HELLO WORLD"
}

async fn health_check_handler() -> &'static str {
    "OK"
}

pub fn system_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check_handler))
}
