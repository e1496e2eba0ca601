//! Contadores del dashboard de administración

use rust_decimal::Decimal;
use serde::Serialize;

/// Resumen para dashboard. Se recalcula en cada consulta.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DashboardStats {
    #[serde(rename = "totalVehicules")]
    pub total_vehicles: i64,
    #[serde(rename = "totalCommandes")]
    pub total_orders: i64,
    #[serde(rename = "commandesEnAttente")]
    pub pending_orders: i64,
    /// Suma de precios de los vehículos pedidos que todavía existen
    #[serde(rename = "chiffreAffaires")]
    pub revenue: Decimal,
}
