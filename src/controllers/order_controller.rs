use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::dto::order_dto::CreateOrderRequest;
use crate::models::{Order, OrderStatus, OrderWithVehicle};
use crate::repositories::{OrderStore, VehicleStore};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub struct OrderController {
    orders: Arc<dyn OrderStore>,
    vehicles: Arc<dyn VehicleStore>,
}

impl OrderController {
    pub fn new(state: &AppState) -> Self {
        Self {
            orders: state.orders.clone(),
            vehicles: state.vehicles.clone(),
        }
    }

    pub async fn create(&self, request: CreateOrderRequest) -> AppResult<Order> {
        let new_order = request.into_new_order()?;

        // El vehículo debe existir al hacer el pedido; después la referencia puede quedar colgando
        if self.vehicles.find_by_id(new_order.vehicle_id).await?.is_none() {
            return Err(not_found_error("Vehicle", &new_order.vehicle_id.to_string()));
        }

        let order = self.orders.insert(&Order::new(new_order)).await?;

        info!("🛒 Pedido {} recibido para vehículo {}", order.id, order.vehicle_id);
        Ok(order)
    }

    pub async fn list(&self) -> AppResult<Vec<OrderWithVehicle>> {
        self.orders.list_with_vehicles().await
    }

    pub async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Order> {
        let order = self
            .orders
            .update_status(id, status)
            .await?
            .ok_or_else(|| not_found_error("Order", &id.to_string()))?;

        info!("📋 Pedido {} → {}", id, status);
        Ok(order)
    }
}
