use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::assignment_controller::AssignmentController;
use crate::controllers::kyc_controller::KycController;
use crate::dto::common::ApiResponse;
use crate::dto::kyc_dto::{KycDocumentResponse, SubmitDocumentRequest};
use crate::dto::rider_dto::{
    AssignVehicleRequest, AssignmentResponse, CreateRiderRequest, RiderResponse,
    ToggleActiveRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_rider_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_rider))
        .route("/:id", get(get_rider))
        .route("/hub/:hub_id", get(list_by_hub))
        .route("/:id/active", put(toggle_active))
        .route("/:id/assign", post(assign_vehicle))
        .route("/:id/unassign", post(unassign_vehicle))
        .route("/:id/kyc", post(submit_kyc_document))
        .route("/:id/kyc", get(list_kyc_documents))
}

async fn create_rider(
    State(state): State<AppState>,
    Json(request): Json<CreateRiderRequest>,
) -> Result<Json<ApiResponse<RiderResponse>>, AppError> {
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.create_rider(request).await?;
    Ok(Json(response))
}

async fn get_rider(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RiderResponse>, AppError> {
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.get_rider(id).await?;
    Ok(Json(response))
}

async fn list_by_hub(
    State(state): State<AppState>,
    Path(hub_id): Path<Uuid>,
) -> Result<Json<Vec<RiderResponse>>, AppError> {
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.list_by_hub(hub_id).await?;
    Ok(Json(response))
}

async fn toggle_active(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ToggleActiveRequest>,
) -> Result<Json<ApiResponse<RiderResponse>>, AppError> {
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller
        .toggle_active(id, request, state.config.auto_unassign_on_deactivate)
        .await?;
    Ok(Json(response))
}

async fn assign_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignVehicleRequest>,
) -> Result<Json<ApiResponse<AssignmentResponse>>, AppError> {
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.assign_vehicle(id, request).await?;
    Ok(Json(response))
}

async fn unassign_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AssignmentResponse>>, AppError> {
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.unassign_vehicle(id).await?;
    Ok(Json(response))
}

async fn submit_kyc_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SubmitDocumentRequest>,
) -> Result<Json<ApiResponse<KycDocumentResponse>>, AppError> {
    let controller = KycController::new(state.pool.clone());
    let response = controller.submit_document(id, request).await?;
    Ok(Json(response))
}

async fn list_kyc_documents(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<KycDocumentResponse>>, AppError> {
    let controller = KycController::new(state.pool.clone());
    let response = controller.list_documents(id).await?;
    Ok(Json(response))
}
