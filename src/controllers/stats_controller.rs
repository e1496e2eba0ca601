use std::sync::Arc;

use crate::models::DashboardStats;
use crate::repositories::StatsStore;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct StatsController {
    stats: Arc<dyn StatsStore>,
}

impl StatsController {
    pub fn new(state: &AppState) -> Self {
        Self {
            stats: state.stats.clone(),
        }
    }

    /// Sin caché: se recalcula en cada llamada
    pub async fn compute(&self) -> AppResult<DashboardStats> {
        self.stats.compute_stats().await
    }
}
