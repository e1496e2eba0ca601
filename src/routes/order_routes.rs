use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, put},
    Json, Router,
};

use crate::controllers::OrderController;
use crate::dto::order_dto::{CreateOrderRequest, UpdateOrderStatusRequest};
use crate::models::{Order, OrderWithVehicle};
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::validation::parse_id;

pub fn create_order_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id", put(update_order_status))
}

async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> AppResult<Json<Order>> {
    let Json(request) = payload?;
    let controller = OrderController::new(&state);
    Ok(Json(controller.create(request).await?))
}

async fn list_orders(State(state): State<AppState>) -> AppResult<Json<Vec<OrderWithVehicle>>> {
    let controller = OrderController::new(&state);
    Ok(Json(controller.list().await?))
}

async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateOrderStatusRequest>, JsonRejection>,
) -> AppResult<Json<Order>> {
    let id = parse_id(&id, "order")?;
    let Json(request) = payload?;
    let status = request.into_status()?;
    let controller = OrderController::new(&state);
    Ok(Json(controller.update_status(id, status).await?))
}
