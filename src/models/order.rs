//! Modelo de Order
//!
//! Pedidos enviados desde la tienda. La referencia al vehículo es débil:
//! puede apuntar a un vehículo ya eliminado.

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::vehicle::Vehicle;
use crate::utils::errors::{validation_error, AppError};

/// Estado del pedido
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "En attente", alias = "Pending")]
    Pending,
    #[serde(rename = "Confirmé", alias = "Confirmed")]
    Confirmed,
    #[serde(rename = "Livré", alias = "Delivered")]
    Delivered,
    #[serde(rename = "Annulé", alias = "Cancelled")]
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "En attente",
            OrderStatus::Confirmed => "Confirmé",
            OrderStatus::Delivered => "Livré",
            OrderStatus::Cancelled => "Annulé",
        }
    }

    fn english_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        OrderStatus::ALL
            .into_iter()
            .find(|status| {
                status.as_str() == value || status.english_name().eq_ignore_ascii_case(value)
            })
            .ok_or_else(|| {
                validation_error(format!(
                    "statut must be one of En attente, Confirmé, Livré, Annulé; got '{}'",
                    value
                ))
            })
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Datos de contacto y entrega ya validados
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub vehicle_id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub payment_method: String,
    pub delivery_date: NaiveDate,
    pub delivery_time: String,
}

/// Order principal
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "vehiculeId")]
    pub vehicle_id: Uuid,
    #[serde(rename = "nomComplet")]
    pub full_name: String,
    #[serde(rename = "telephone")]
    pub phone: String,
    #[serde(rename = "adresse")]
    pub address: String,
    #[serde(rename = "moyenPaiement")]
    pub payment_method: String,
    #[serde(rename = "dateLivraison")]
    pub delivery_date: NaiveDate,
    #[serde(rename = "heureLivraison")]
    pub delivery_time: String,
    #[serde(rename = "statut")]
    pub status: OrderStatus,
    #[serde(rename = "dateCommande")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(new_order: NewOrder) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id: new_order.vehicle_id,
            full_name: new_order.full_name,
            phone: new_order.phone,
            address: new_order.address,
            payment_method: new_order.payment_method,
            delivery_date: new_order.delivery_date,
            delivery_time: new_order.delivery_time,
            status: OrderStatus::Pending,
            created_at: Utc::now().trunc_subsecs(6),
        }
    }
}

/// Referencia de un pedido a su vehículo, resuelta o colgante
#[derive(Debug, Clone, PartialEq)]
pub enum VehicleRef {
    Resolved(Box<Vehicle>),
    Missing(Uuid),
}

impl VehicleRef {
    pub fn resolve(id: Uuid, vehicle: Option<Vehicle>) -> Self {
        match vehicle {
            Some(vehicle) => VehicleRef::Resolved(Box::new(vehicle)),
            None => VehicleRef::Missing(id),
        }
    }

    pub fn vehicle(&self) -> Option<&Vehicle> {
        match self {
            VehicleRef::Resolved(vehicle) => Some(vehicle),
            VehicleRef::Missing(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, VehicleRef::Resolved(_))
    }
}

/// Pedido con su vehículo unido, tal como lo lista la consola de administración
#[derive(Debug, Clone, PartialEq)]
pub struct OrderWithVehicle {
    pub order: Order,
    pub vehicle: VehicleRef,
}

impl Serialize for OrderWithVehicle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct View<'a> {
            #[serde(rename = "_id")]
            id: &'a Uuid,
            #[serde(rename = "vehiculeId")]
            vehicle: Option<&'a Vehicle>,
            #[serde(rename = "vehiculeRef")]
            vehicle_ref: &'a Uuid,
            #[serde(rename = "nomComplet")]
            full_name: &'a str,
            #[serde(rename = "telephone")]
            phone: &'a str,
            #[serde(rename = "adresse")]
            address: &'a str,
            #[serde(rename = "moyenPaiement")]
            payment_method: &'a str,
            #[serde(rename = "dateLivraison")]
            delivery_date: &'a NaiveDate,
            #[serde(rename = "heureLivraison")]
            delivery_time: &'a str,
            #[serde(rename = "statut")]
            status: OrderStatus,
            #[serde(rename = "dateCommande")]
            created_at: &'a DateTime<Utc>,
        }

        let order = &self.order;
        View {
            id: &order.id,
            vehicle: self.vehicle.vehicle(),
            vehicle_ref: &order.vehicle_id,
            full_name: &order.full_name,
            phone: &order.phone,
            address: &order.address,
            payment_method: &order.payment_method,
            delivery_date: &order.delivery_date,
            delivery_time: &order.delivery_time,
            status: order.status,
            created_at: &order.created_at,
        }
        .serialize(serializer)
    }
}
