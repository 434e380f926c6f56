pub mod error;
pub mod feats;

use crate::core::engine::RankingEngine;
use axum::{http::Method, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub engine: RankingEngine,
}

impl AppState {
    pub fn new(engine: RankingEngine) -> Self {
        Self { engine }
    }
}

/// JSON API under `/api`; anything else is served from `static_dir` when one is configured.
pub fn router(state: AppState, static_dir: Option<&str>) -> Router {
    let router = Router::new()
        .nest("/api", feats::routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.with_state(state)
}
