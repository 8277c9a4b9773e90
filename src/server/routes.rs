use crate::server::handlers;
use crate::server::state::AppState;
use axum::routing::{get, post};
use axum::Router;

/// 组装全部路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/submit",
            post(handlers::submit).fallback(handlers::invalid_method),
        )
        .route("/download/{filename}", get(handlers::download))
        .route("/upload", post(handlers::upload))
        .route("/status", get(handlers::status))
        .with_state(state)
}
