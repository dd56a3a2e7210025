//! Common routes: banner, health, readiness, configuration echo.

use crate::handlers::system::{config_info, health, ready, root};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn common_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/config/info", get(config_info))
}
