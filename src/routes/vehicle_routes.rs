use axum::{
    extract::{
        multipart::MultipartRejection, rejection::QueryRejection, Multipart, Path, Query, State,
    },
    routing::get,
    Json, Router,
};

use crate::controllers::VehicleController;
use crate::dto::vehicle_dto::{MessageResponse, VehicleForm, VehicleQuery};
use crate::models::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::validation::parse_id;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

async fn list_vehicles(
    State(state): State<AppState>,
    query: Result<Query<VehicleQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Vehicle>>> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let controller = VehicleController::new(&state);
    Ok(Json(controller.list(&filter).await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vehicle>> {
    let id = parse_id(&id, "vehicle")?;
    let controller = VehicleController::new(&state);
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_vehicle(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Vehicle>> {
    let form = VehicleForm::from_multipart(multipart?, state.config.max_images).await?;
    let controller = VehicleController::new(&state);
    Ok(Json(controller.create(form.fields, form.images).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Vehicle>> {
    let id = parse_id(&id, "vehicle")?;
    let form = VehicleForm::from_multipart(multipart?, state.config.max_images).await?;
    let controller = VehicleController::new(&state);
    Ok(Json(controller.update(id, form.fields, form.images).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id, "vehicle")?;
    let controller = VehicleController::new(&state);
    controller.delete(id).await?;
    Ok(Json(MessageResponse::new("Véhicule supprimé")))
}
