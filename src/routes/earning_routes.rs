use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::earning_controller::EarningController;
use crate::dto::common::ApiResponse;
use crate::dto::earning_dto::{
    CreateEarningRequest, EarningListResponse, EarningResponse, ListEarningsQuery,
    RiderSummaryResponse, StatusSummaryResponse, TransitionPaymentRequest, UpdateEarningRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_earning_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_earning))
        .route("/", get(list_earnings))
        .route("/:id", get(get_earning))
        .route("/:id", put(update_earning))
        .route("/:id", delete(delete_earning))
        .route("/:id/status", post(transition_payment_status))
        .route("/summary/rider/:rider_id", get(rider_summary))
        .route("/summary/status", get(status_summary))
}

async fn create_earning(
    State(state): State<AppState>,
    Json(request): Json<CreateEarningRequest>,
) -> Result<Json<ApiResponse<EarningResponse>>, AppError> {
    let controller = EarningController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_earning(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EarningResponse>, AppError> {
    let controller = EarningController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_earnings(
    State(state): State<AppState>,
    Query(query): Query<ListEarningsQuery>,
) -> Result<Json<EarningListResponse>, AppError> {
    let controller = EarningController::new(state.pool.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn update_earning(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEarningRequest>,
) -> Result<Json<ApiResponse<EarningResponse>>, AppError> {
    let controller = EarningController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn transition_payment_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionPaymentRequest>,
) -> Result<Json<ApiResponse<EarningResponse>>, AppError> {
    let controller = EarningController::new(state.pool.clone());
    let response = controller.transition_status(id, request).await?;
    Ok(Json(response))
}

async fn rider_summary(
    State(state): State<AppState>,
    Path(rider_id): Path<Uuid>,
) -> Result<Json<RiderSummaryResponse>, AppError> {
    let controller = EarningController::new(state.pool.clone());
    let response = controller.summary_by_rider(rider_id).await?;
    Ok(Json(response))
}

async fn status_summary(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusSummaryResponse>>, AppError> {
    let controller = EarningController::new(state.pool.clone());
    let response = controller.summary_by_status().await?;
    Ok(Json(response))
}

async fn delete_earning(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = EarningController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
