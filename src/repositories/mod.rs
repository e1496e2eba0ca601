//! Repositorios
//!
//! Contratos de almacenamiento del catálogo y sus implementaciones:
//! PostgreSQL (sqlx) y una versión en memoria para tests y desarrollo local.

pub mod memory_store;
pub mod order_repository;
pub mod stats_repository;
pub mod vehicle_repository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{DashboardStats, Order, OrderStatus, OrderWithVehicle, Vehicle, VehicleFilter};
use crate::utils::errors::AppResult;

pub use memory_store::InMemoryStore;
pub use order_repository::OrderRepository;
pub use stats_repository::StatsRepository;
pub use vehicle_repository::VehicleRepository;

/// Almacén de vehículos
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Vehículos que cumplen el filtro, del más reciente al más antiguo
    async fn list(&self, filter: &VehicleFilter) -> AppResult<Vec<Vehicle>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    /// Devuelve el registro tal como quedó almacenado
    async fn insert(&self, vehicle: &Vehicle) -> AppResult<Vehicle>;

    /// Sobrescribe el registro completo. `None` si ya no existe.
    async fn save(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>>;

    /// `false` si no había nada que borrar
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Almacén de pedidos
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert(&self, order: &Order) -> AppResult<Order>;

    /// Todos los pedidos con su vehículo unido, del más reciente al más antiguo
    async fn list_with_vehicles(&self) -> AppResult<Vec<OrderWithVehicle>>;

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Option<Order>>;
}

/// Agregados del dashboard
#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn compute_stats(&self) -> AppResult<DashboardStats>;
}
