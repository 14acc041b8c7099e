use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::engine;
use crate::models::CycleSummary;
use crate::storage::Store;

#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: Uuid,
}

pub fn routes(store: Arc<Store>) -> Router {
    Router::new()
        .route("/cycle-summary", get(get_cycle_summary))
        .with_state(store)
}

async fn get_cycle_summary(
    State(store): State<Arc<Store>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<CycleSummary>, StatusCode> {
    let entries = store.entries_for_user(query.user_id).await;
    let forecast = engine::predict_next_cycle(&entries, Utc::now().date_naive());
    match forecast.summary {
        Some(summary) => Ok(Json(summary)),
        // No flow-days yet: the client renders an empty state.
        None => Err(StatusCode::NOT_FOUND),
    }
}
