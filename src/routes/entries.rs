use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{CycleEntry, EntryPatch, NewEntry};
use crate::storage::Store;

#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct RangeQuery {
    pub user_id: Uuid,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Deserialize)]
pub struct ByDateQuery {
    pub user_id: Uuid,
    pub date: NaiveDate,
}

pub fn routes(store: Arc<Store>) -> Router {
    Router::new()
        .route("/entries", get(get_entries).post(create_entry))
        .route("/entries/:id", put(update_entry))
        .route("/entries/range", get(get_entries_in_range))
        .route("/entries/by-date", get(get_entry_by_date))
        .with_state(store)
}

async fn create_entry(
    State(store): State<Arc<Store>>,
    Json(body): Json<NewEntry>,
) -> (StatusCode, Json<CycleEntry>) {
    let entry = store.upsert_entry(body).await;
    tracing::info!("📝 logged entry for {} on {}", entry.user_id, entry.date);
    (StatusCode::CREATED, Json(entry))
}

async fn update_entry(
    State(store): State<Arc<Store>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<EntryPatch>,
) -> Result<Json<CycleEntry>, StatusCode> {
    match store.update_entry(id, patch).await {
        Some(entry) => Ok(Json(entry)),
        None => {
            tracing::error!("❌ No entry with id {}", id);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

async fn get_entries(
    State(store): State<Arc<Store>>,
    Query(query): Query<UserQuery>,
) -> Json<Vec<CycleEntry>> {
    Json(store.entries_for_user(query.user_id).await)
}

async fn get_entries_in_range(
    State(store): State<Arc<Store>>,
    Query(query): Query<RangeQuery>,
) -> Json<Vec<CycleEntry>> {
    Json(store.entries_in_range(query.user_id, query.start, query.end).await)
}

async fn get_entry_by_date(
    State(store): State<Arc<Store>>,
    Query(query): Query<ByDateQuery>,
) -> Result<Json<CycleEntry>, StatusCode> {
    match store.entry_by_date(query.user_id, query.date).await {
        Some(entry) => Ok(Json(entry)),
        None => Err(StatusCode::NOT_FOUND),
    }
}
