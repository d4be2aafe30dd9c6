use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::damage_controller::DamageController;
use crate::dto::common::ApiResponse;
use crate::dto::damage_dto::{
    DamageRecordResponse, ReportDamageRequest, TransitionDamageRequest,
};
use crate::middleware::auth::AuthenticatedOperator;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Router de daños - requiere operador autenticado (ver main.rs)
pub fn create_damage_router() -> Router<AppState> {
    Router::new()
        .route("/", post(report_damage))
        .route("/:id", get(get_damage))
        .route("/vehicle/:vehicle_id", get(list_by_vehicle))
        .route("/:id/status", put(transition_damage))
}

async fn report_damage(
    State(state): State<AppState>,
    Extension(operator): Extension<AuthenticatedOperator>,
    Json(request): Json<ReportDamageRequest>,
) -> Result<Json<ApiResponse<DamageRecordResponse>>, AppError> {
    let controller = DamageController::new(state.pool.clone());
    let response = controller
        .report(
            request,
            operator.operator_id,
            state.config.damage_forces_vehicle_status,
        )
        .await?;
    Ok(Json(response))
}

async fn get_damage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DamageRecordResponse>, AppError> {
    let controller = DamageController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_by_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<Vec<DamageRecordResponse>>, AppError> {
    let controller = DamageController::new(state.pool.clone());
    let response = controller.list_by_vehicle(vehicle_id).await?;
    Ok(Json(response))
}

async fn transition_damage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionDamageRequest>,
) -> Result<Json<ApiResponse<DamageRecordResponse>>, AppError> {
    let controller = DamageController::new(state.pool.clone());
    let response = controller.transition(id, request).await?;
    Ok(Json(response))
}
