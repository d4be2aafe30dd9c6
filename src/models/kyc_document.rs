//! Modelo de KycDocument
//!
//! Documentos de identidad de un rider. Cada reenvío crea un registro nuevo;
//! la agregación considera el documento más reciente por tipo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Tipo de documento KYC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Aadhaar,
    Pan,
    Dl,
    Selfie,
    Rc,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Aadhaar => "aadhaar",
            DocumentType::Pan => "pan",
            DocumentType::Dl => "dl",
            DocumentType::Selfie => "selfie",
            DocumentType::Rc => "rc",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "aadhaar" => Ok(DocumentType::Aadhaar),
            "pan" => Ok(DocumentType::Pan),
            "dl" => Ok(DocumentType::Dl),
            "selfie" => Ok(DocumentType::Selfie),
            "rc" => Ok(DocumentType::Rc),
            other => Err(AppError::Internal(format!(
                "Unknown document type '{}'",
                other
            ))),
        }
    }
}

/// Estado de verificación de un documento individual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "pending" => Ok(VerificationStatus::Pending),
            "verified" => Ok(VerificationStatus::Verified),
            "rejected" => Ok(VerificationStatus::Rejected),
            other => Err(AppError::Internal(format!(
                "Unknown verification status '{}'",
                other
            ))),
        }
    }
}

/// KycDocument - mapea a la tabla kyc_documents
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct KycDocument {
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

impl KycDocument {
    pub fn document_type(&self) -> Result<DocumentType, AppError> {
        DocumentType::parse(&self.document_type)
    }

    pub fn verification_status(&self) -> Result<VerificationStatus, AppError> {
        VerificationStatus::parse(&self.verification_status)
    }
}
