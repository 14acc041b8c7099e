use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::CyclePrediction;
use crate::storage::Store;

#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: Uuid,
}

pub fn routes(store: Arc<Store>) -> Router {
    Router::new()
        .route("/predictions", get(get_predictions))
        .route("/predictions/current", get(get_current_prediction))
        .with_state(store)
}

async fn get_predictions(
    State(store): State<Arc<Store>>,
    Query(query): Query<UserQuery>,
) -> Json<Vec<CyclePrediction>> {
    Json(store.predictions_for_user(query.user_id).await)
}

async fn get_current_prediction(
    State(store): State<Arc<Store>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<CyclePrediction>, StatusCode> {
    match store.current_prediction(query.user_id).await {
        Some(prediction) => Ok(Json(prediction)),
        None => Err(StatusCode::NOT_FOUND),
    }
}
