use serde::Deserialize;
use validator::Validate;

use crate::models::{NewOrder, OrderStatus};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::{parse_date, parse_id};

// Request para crear un pedido desde la tienda.
// Los campos ausentes llegan vacíos y los rechaza la validación.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateOrderRequest {
    #[serde(rename = "vehiculeId")]
    #[validate(length(min = 1))]
    pub vehicle_id: String,

    #[serde(rename = "nomComplet")]
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,

    #[serde(rename = "telephone")]
    #[validate(length(min = 1, max = 50))]
    pub phone: String,

    #[serde(rename = "adresse")]
    #[validate(length(min = 1, max = 500))]
    pub address: String,

    #[serde(rename = "moyenPaiement")]
    #[validate(length(min = 1, max = 100))]
    pub payment_method: String,

    #[serde(rename = "dateLivraison")]
    #[validate(length(min = 1))]
    pub delivery_date: String,

    #[serde(rename = "heureLivraison")]
    #[validate(length(min = 1, max = 50))]
    pub delivery_time: String,
}

impl CreateOrderRequest {
    pub fn into_new_order(self) -> AppResult<NewOrder> {
        // Se recorta antes de validar: un campo de solo espacios cuenta como vacío
        let request = self.trimmed();
        request.validate()?;

        Ok(NewOrder {
            vehicle_id: parse_id(&request.vehicle_id, "vehicle")?,
            full_name: request.full_name,
            phone: request.phone,
            address: request.address,
            payment_method: request.payment_method,
            delivery_date: parse_date(&request.delivery_date, "dateLivraison")?,
            delivery_time: request.delivery_time,
        })
    }

    fn trimmed(self) -> Self {
        let trim = |value: String| value.trim().to_string();
        Self {
            vehicle_id: trim(self.vehicle_id),
            full_name: trim(self.full_name),
            phone: trim(self.phone),
            address: trim(self.address),
            payment_method: trim(self.payment_method),
            delivery_date: trim(self.delivery_date),
            delivery_time: trim(self.delivery_time),
        }
    }
}

// Request para cambiar el estado de un pedido: cualquier otro campo se ignora
#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrderStatusRequest {
    #[serde(rename = "statut", alias = "status")]
    pub status: Option<String>,
}

impl UpdateOrderStatusRequest {
    pub fn into_status(self) -> AppResult<OrderStatus> {
        self.status
            .as_deref()
            .ok_or_else(|| validation_error("statut is required"))?
            .parse()
    }
}
