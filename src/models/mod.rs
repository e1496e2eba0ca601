//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio del catálogo:
//! vehículos, pedidos y contadores del dashboard.

pub mod order;
pub mod stats;
pub mod vehicle;

pub use order::{NewOrder, Order, OrderStatus, OrderWithVehicle, VehicleRef};
pub use stats::DashboardStats;
pub use vehicle::{
    Classification, Page, SelectionGroup, Vehicle, VehicleFields, VehicleFilter, VehicleKind,
};
