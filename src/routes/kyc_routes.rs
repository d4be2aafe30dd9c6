use axum::{
    extract::{Path, State},
    routing::post,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::kyc_controller::KycController;
use crate::dto::common::ApiResponse;
use crate::dto::kyc_dto::{VerifyDocumentRequest, VerifyDocumentResponse};
use crate::middleware::auth::AuthenticatedOperator;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Router de decisiones KYC - requiere operador autenticado (ver main.rs)
pub fn create_kyc_router() -> Router<AppState> {
    Router::new().route("/:document_id/verify", post(verify_document))
}

async fn verify_document(
    State(state): State<AppState>,
    Extension(operator): Extension<AuthenticatedOperator>,
    Path(document_id): Path<Uuid>,
    Json(request): Json<VerifyDocumentRequest>,
) -> Result<Json<ApiResponse<VerifyDocumentResponse>>, AppError> {
    let controller = KycController::new(state.pool.clone());
    let response = controller
        .verify_document(document_id, request, operator.operator_id)
        .await?;
    Ok(Json(response))
}
