use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use super::vehicle_repository::VehicleRepository;
use super::OrderStore;
use crate::models::{Order, OrderStatus, OrderWithVehicle, Vehicle, VehicleRef};
use crate::utils::errors::{AppError, AppResult};

const ORDER_COLUMNS: &str = "id, vehicle_id, full_name, phone, address, payment_method, \
     delivery_date, delivery_time, status, created_at";

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    vehicle_id: Uuid,
    full_name: String,
    phone: String,
    address: String,
    payment_method: String,
    delivery_date: NaiveDate,
    delivery_time: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = AppError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = row.status.parse().map_err(|e| {
            AppError::Internal(format!("Order {} has an invalid status: {}", row.id, e))
        })?;

        Ok(Order {
            id: row.id,
            vehicle_id: row.vehicle_id,
            full_name: row.full_name,
            phone: row.phone,
            address: row.address,
            payment_method: row.payment_method,
            delivery_date: row.delivery_date,
            delivery_time: row.delivery_time,
            status,
            created_at: row.created_at,
        })
    }
}

pub struct OrderRepository {
    pool: PgPool,
    vehicles: VehicleRepository,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn insert(&self, order: &Order) -> AppResult<Order> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            INSERT INTO orders (id, vehicle_id, full_name, phone, address, payment_method,
                                delivery_date, delivery_time, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            ORDER_COLUMNS
        ))
        .bind(order.id)
        .bind(order.vehicle_id)
        .bind(&order.full_name)
        .bind(&order.phone)
        .bind(&order.address)
        .bind(&order.payment_method)
        .bind(order.delivery_date)
        .bind(&order.delivery_time)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .fetch_one(&self.pool)
        .await?;

        Order::try_from(row)
    }

    async fn list_with_vehicles(&self) -> AppResult<Vec<OrderWithVehicle>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {} FROM orders ORDER BY created_at DESC",
            ORDER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        let orders = rows
            .into_iter()
            .map(Order::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        let mut ids: Vec<Uuid> = orders.iter().map(|o| o.vehicle_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let vehicles: HashMap<Uuid, Vehicle> = self
            .vehicles
            .find_many(&ids)
            .await?
            .into_iter()
            .map(|v| (v.id, v))
            .collect();

        Ok(orders
            .into_iter()
            .map(|order| {
                let vehicle = VehicleRef::resolve(order.vehicle_id, vehicles.get(&order.vehicle_id).cloned());
                OrderWithVehicle { order, vehicle }
            })
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING {}",
            ORDER_COLUMNS
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }
}
