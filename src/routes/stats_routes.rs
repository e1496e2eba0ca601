use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::StatsController;
use crate::models::DashboardStats;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_stats_router() -> Router<AppState> {
    Router::new().route("/", get(get_stats))
}

async fn get_stats(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let controller = StatsController::new(&state);
    Ok(Json(controller.compute().await?))
}
