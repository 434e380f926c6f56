use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::domain::model::{CacheStats, FeatSummary, RankingResponse};
use crate::utils::validation::DEFAULT_TOP_N;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/feats", get(list_feats))
        .route("/feats/:feat_id", get(get_feat))
        .route("/feats/:feat_id/ranking", get(get_ranking))
        .route("/cache/stats", get(cache_stats))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeatList {
    pub feats: Vec<FeatSummary>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct RankingParams {
    pub top_n: Option<i64>,
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "The Worm is alive 🐛",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn list_feats(State(state): State<AppState>) -> Json<FeatList> {
    let feats = state.engine.list_feats();
    Json(FeatList {
        total: feats.len(),
        feats,
    })
}

async fn get_feat(
    State(state): State<AppState>,
    Path(feat_id): Path<String>,
) -> ApiResult<Json<FeatSummary>> {
    state
        .engine
        .feat_summary(&feat_id)
        .map(Json)
        .ok_or(ApiError::FeatNotFound(feat_id))
}

async fn get_ranking(
    State(state): State<AppState>,
    Path(feat_id): Path<String>,
    params: Result<Query<RankingParams>, QueryRejection>,
) -> ApiResult<Json<RankingResponse>> {
    let Query(params) = params?;
    let top_n = params.top_n.unwrap_or(DEFAULT_TOP_N);

    match state.engine.get_ranking(&feat_id, top_n).await? {
        Some(response) => Ok(Json(response.as_ref().clone())),
        None => Err(ApiError::FeatNotFound(feat_id)),
    }
}

async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.engine.cache_stats())
}
