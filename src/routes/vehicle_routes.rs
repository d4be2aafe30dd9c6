use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{
    AssignableQuery, CreateVehicleRequest, TransferHubRequest, VehicleResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/assignable", get(list_assignable))
        .route("/:id", get(get_vehicle))
        .route("/hub/:hub_id", get(list_by_hub))
        .route("/:id/maintenance", post(schedule_maintenance))
        .route("/:id/maintenance/complete", post(complete_maintenance))
        .route("/:id/retire", post(retire_vehicle))
        .route("/:id/hub", put(transfer_hub))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_by_hub(
    State(state): State<AppState>,
    Path(hub_id): Path<Uuid>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list_by_hub(hub_id).await?;
    Ok(Json(response))
}

/// Pool asignable del hub - sin hub_id responde lista vacía
async fn list_assignable(
    State(state): State<AppState>,
    Query(query): Query<AssignableQuery>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list_assignable(query.hub_id).await?;
    Ok(Json(response))
}

async fn schedule_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.schedule_maintenance(id).await?;
    Ok(Json(response))
}

async fn complete_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.complete_maintenance(id).await?;
    Ok(Json(response))
}

async fn retire_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.retire(id).await?;
    Ok(Json(response))
}

async fn transfer_hub(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransferHubRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.transfer_hub(id, request).await?;
    Ok(Json(response))
}
