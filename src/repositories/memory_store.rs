//! Almacén en memoria
//!
//! Implementa los mismos contratos que los repositorios PostgreSQL.
//! Se usa en los tests y cuando no hay DATABASE_URL configurada.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{OrderStore, StatsStore, VehicleStore};
use crate::models::{
    DashboardStats, Order, OrderStatus, OrderWithVehicle, Vehicle, VehicleFilter, VehicleRef,
};
use crate::utils::errors::AppResult;

/// Los vectores conservan el orden de inserción; los listados
/// ordenan por fecha de creación descendente.
#[derive(Default)]
pub struct InMemoryStore {
    vehicles: RwLock<Vec<Vehicle>>,
    orders: RwLock<Vec<Order>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleStore for InMemoryStore {
    async fn list(&self, filter: &VehicleFilter) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.vehicles.read().await;

        // Recorrido inverso + orden estable: a igual fecha gana el último insertado
        let mut matched: Vec<Vehicle> = vehicles
            .iter()
            .rev()
            .filter(|v| v.matches(filter))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(match filter.page {
            Some(page) => matched
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.size as usize)
                .collect(),
            None => matched,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn insert(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        self.vehicles.write().await.push(vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn save(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>> {
        let mut vehicles = self.vehicles.write().await;
        Ok(vehicles.iter_mut().find(|v| v.id == vehicle.id).map(|existing| {
            let created_at = existing.created_at;
            *existing = Vehicle {
                created_at,
                ..vehicle.clone()
            };
            existing.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut vehicles = self.vehicles.write().await;
        let before = vehicles.len();
        vehicles.retain(|v| v.id != id);
        Ok(vehicles.len() != before)
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn insert(&self, order: &Order) -> AppResult<Order> {
        self.orders.write().await.push(order.clone());
        Ok(order.clone())
    }

    async fn list_with_vehicles(&self) -> AppResult<Vec<OrderWithVehicle>> {
        // Siempre pedidos antes que vehículos
        let orders = self.orders.read().await;
        let vehicles = self.vehicles.read().await;
        let by_id: HashMap<Uuid, &Vehicle> = vehicles.iter().map(|v| (v.id, v)).collect();

        let mut listed: Vec<OrderWithVehicle> = orders
            .iter()
            .rev()
            .map(|order| OrderWithVehicle {
                vehicle: VehicleRef::resolve(
                    order.vehicle_id,
                    by_id.get(&order.vehicle_id).map(|v| (*v).clone()),
                ),
                order: order.clone(),
            })
            .collect();
        listed.sort_by(|a, b| b.order.created_at.cmp(&a.order.created_at));

        Ok(listed)
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Option<Order>> {
        let mut orders = self.orders.write().await;
        Ok(orders.iter_mut().find(|o| o.id == id).map(|order| {
            order.status = status;
            order.clone()
        }))
    }
}

#[async_trait]
impl StatsStore for InMemoryStore {
    async fn compute_stats(&self) -> AppResult<DashboardStats> {
        let orders = self.orders.read().await;
        let vehicles = self.vehicles.read().await;
        let prices: HashMap<Uuid, Decimal> = vehicles.iter().map(|v| (v.id, v.price)).collect();

        let revenue = orders
            .iter()
            .filter_map(|o| prices.get(&o.vehicle_id))
            .copied()
            .sum::<Decimal>();

        Ok(DashboardStats {
            total_vehicles: vehicles.len() as i64,
            total_orders: orders.len() as i64,
            pending_orders: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count() as i64,
            revenue,
        })
    }
}
