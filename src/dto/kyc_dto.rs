//! DTOs del flujo KYC

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::kyc_document::{DocumentType, KycDocument, VerificationStatus};
use crate::models::rider::KycStatus;

/// Request para enviar un documento KYC
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitDocumentRequest {
    pub document_type: DocumentType,

    #[validate(length(min = 4, max = 32))]
    pub document_number: Option<String>,

    #[validate(url)]
    pub file_url: Option<String>,
}

/// Request para decidir sobre un documento: verified o rejected
#[derive(Debug, Deserialize)]
pub struct VerifyDocumentRequest {
    pub decision: VerificationStatus,
    pub notes: Option<String>,
}

/// Response de documento KYC
#[derive(Debug, Serialize)]
pub struct KycDocumentResponse {
    pub id: Uuid,
    pub rider_id: Uuid,
    pub document_type: String,
    pub document_number: Option<String>,
    pub file_url: Option<String>,
    pub verification_status: String,
    pub verified_by: Option<Uuid>,
    pub verification_notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}

impl From<KycDocument> for KycDocumentResponse {
    fn from(d: KycDocument) -> Self {
        Self {
            id: d.id,
            rider_id: d.rider_id,
            document_type: d.document_type,
            document_number: d.document_number,
            file_url: d.file_url,
            verification_status: d.verification_status,
            verified_by: d.verified_by,
            verification_notes: d.verification_notes,
            submitted_at: d.submitted_at,
            verified_at: d.verified_at,
        }
    }
}

/// Response de una decisión: el documento y el estado agregado resultante
#[derive(Debug, Serialize)]
pub struct VerifyDocumentResponse {
    pub document: KycDocumentResponse,
    pub rider_kyc_status: KycStatus,
}
