//! Controller del flujo KYC

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::kyc_dto::{
    KycDocumentResponse, SubmitDocumentRequest, VerifyDocumentRequest, VerifyDocumentResponse,
};
use crate::repositories::kyc_repository::KycRepository;
use crate::services::kyc_service;
use crate::utils::errors::AppError;

pub struct KycController {
    repository: KycRepository,
}

impl KycController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: KycRepository::new(pool),
        }
    }

    pub async fn submit_document(
        &self,
        rider_id: Uuid,
        request: SubmitDocumentRequest,
    ) -> Result<ApiResponse<KycDocumentResponse>, AppError> {
        request.validate()?;

        let document = self
            .repository
            .submit(
                rider_id,
                request.document_type,
                request.document_number,
                request.file_url,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            document.into(),
            "Documento enviado para verificación".to_string(),
        ))
    }

    pub async fn list_documents(
        &self,
        rider_id: Uuid,
    ) -> Result<Vec<KycDocumentResponse>, AppError> {
        let documents = self.repository.list_by_rider(rider_id).await?;
        Ok(documents.into_iter().map(KycDocumentResponse::from).collect())
    }

    /// Decidir sobre un documento. El actor viene del colaborador de
    /// identidad y queda como campo de auditoría.
    pub async fn verify_document(
        &self,
        document_id: Uuid,
        request: VerifyDocumentRequest,
        actor_id: Uuid,
    ) -> Result<ApiResponse<VerifyDocumentResponse>, AppError> {
        kyc_service::validate_decision(request.decision, request.notes.as_deref())?;

        let (document, rider_kyc_status) = self
            .repository
            .verify(document_id, request.decision, request.notes, actor_id)
            .await?;

        Ok(ApiResponse::success_with_message(
            VerifyDocumentResponse {
                document: document.into(),
                rider_kyc_status,
            },
            "Documento decidido; estado KYC del rider recalculado".to_string(),
        ))
    }
}
