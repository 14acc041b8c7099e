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
use crate::models::CalendarDayView;
use crate::storage::Store;

#[derive(Deserialize)]
pub struct CalendarQuery {
    pub user_id: Uuid,
    pub year: i32,
    pub month: u32,
}

pub fn routes(store: Arc<Store>) -> Router {
    Router::new()
        .route("/calendar", get(get_calendar))
        .with_state(store)
}

async fn get_calendar(
    State(store): State<Arc<Store>>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Vec<CalendarDayView>>, (StatusCode, String)> {
    let Some(grid) = engine::month_grid(query.year, query.month) else {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Invalid month {}-{}", query.year, query.month),
        ));
    };

    // Adjacency checks at the grid edges need neighbors outside the
    // visible range, so the classifier gets the full history.
    let entries = store.entries_for_user(query.user_id).await;
    let prediction = store.current_prediction(query.user_id).await;

    let days = engine::classify_calendar_range(
        grid.start,
        grid.end,
        grid.month,
        &entries,
        prediction.as_ref().map(|p| &p.window),
        Utc::now().date_naive(),
    );

    Ok(Json(days))
}
