use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::StatsStore;
use crate::models::{DashboardStats, OrderStatus};
use crate::utils::errors::AppResult;

#[derive(Debug, sqlx::FromRow)]
struct StatsRow {
    total_vehicles: i64,
    total_orders: i64,
    pending_orders: i64,
    revenue: Decimal,
}

pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsStore for StatsRepository {
    async fn compute_stats(&self) -> AppResult<DashboardStats> {
        // INNER JOIN: los pedidos de vehículos borrados no suman ingresos
        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM vehicles) AS total_vehicles,
                (SELECT COUNT(*) FROM orders) AS total_orders,
                (SELECT COUNT(*) FROM orders WHERE status = $1) AS pending_orders,
                (SELECT COALESCE(SUM(v.price), 0)
                   FROM orders o
                   JOIN vehicles v ON v.id = o.vehicle_id) AS revenue
            "#,
        )
        .bind(OrderStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(DashboardStats {
            total_vehicles: row.total_vehicles,
            total_orders: row.total_orders,
            pending_orders: row.pending_orders,
            revenue: row.revenue,
        })
    }
}
