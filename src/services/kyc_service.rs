//! Servicio de verificación KYC
//!
//! Agregación pura del estado KYC del rider a partir de sus documentos.
//! Cada reenvío crea un documento nuevo; solo cuenta el más reciente por tipo.

use std::collections::HashMap;

use crate::models::kyc_document::{DocumentType, KycDocument, VerificationStatus};
use crate::models::rider::KycStatus;
use crate::utils::errors::AppError;

/// Tipos de documento requeridos para que un rider quede verificado.
/// El RC es opcional: solo aplica a vehículos propios.
pub const REQUIRED_DOCUMENT_TYPES: [DocumentType; 4] = [
    DocumentType::Aadhaar,
    DocumentType::Pan,
    DocumentType::Dl,
    DocumentType::Selfie,
];

/// Validar una decisión de verificación: el rechazo exige notas
pub fn validate_decision(
    decision: VerificationStatus,
    notes: Option<&str>,
) -> Result<(), AppError> {
    match decision {
        VerificationStatus::Verified => Ok(()),
        VerificationStatus::Rejected => {
            let has_notes = notes.map(|n| !n.trim().is_empty()).unwrap_or(false);
            if has_notes {
                Ok(())
            } else {
                Err(AppError::ValidationError(
                    "El rechazo de un documento requiere notas".to_string(),
                ))
            }
        }
        VerificationStatus::Pending => Err(AppError::ValidationError(
            "La decisión debe ser 'verified' o 'rejected'".to_string(),
        )),
    }
}

/// Una decisión es terminal para ese envío; re-decidir requiere un reenvío
pub fn ensure_document_is_decidable(current: VerificationStatus) -> Result<(), AppError> {
    match current {
        VerificationStatus::Pending => Ok(()),
        VerificationStatus::Verified | VerificationStatus::Rejected => {
            Err(AppError::InvalidTransition(
                "El documento ya fue decidido; un reenvío crea un documento nuevo".to_string(),
            ))
        }
    }
}

/// Recalcular el estado KYC agregado del rider.
///
/// Sobre el documento más reciente de cada tipo requerido:
/// - alguno rechazado => rejected
/// - al menos uno enviado y todos los enviados verificados => verified
/// - en cualquier otro caso => pending
pub fn aggregate_kyc_status(documents: &[KycDocument]) -> Result<KycStatus, AppError> {
    let mut latest: HashMap<DocumentType, &KycDocument> = HashMap::new();

    for doc in documents {
        let doc_type = doc.document_type()?;
        if !REQUIRED_DOCUMENT_TYPES.contains(&doc_type) {
            continue;
        }

        match latest.get(&doc_type) {
            Some(existing) if existing.submitted_at >= doc.submitted_at => {}
            _ => {
                latest.insert(doc_type, doc);
            }
        }
    }

    if latest.is_empty() {
        return Ok(KycStatus::Pending);
    }

    let mut all_verified = true;
    for doc in latest.values() {
        match doc.verification_status()? {
            VerificationStatus::Rejected => return Ok(KycStatus::Rejected),
            VerificationStatus::Pending => all_verified = false,
            VerificationStatus::Verified => {}
        }
    }

    if all_verified {
        Ok(KycStatus::Verified)
    } else {
        Ok(KycStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn doc(document_type: &str, status: &str) -> KycDocument {
        KycDocument {
            id: Uuid::new_v4(),
            rider_id: Uuid::new_v4(),
            document_type: document_type.to_string(),
            document_number: None,
            file_url: None,
            verification_status: status.to_string(),
            verified_by: None,
            verification_notes: None,
            submitted_at: Utc::now(),
            verified_at: None,
        }
    }

    #[test]
    fn test_aggregate_pending_when_any_pending() {
        let docs = vec![doc("aadhaar", "verified"), doc("pan", "pending")];
        assert_eq!(aggregate_kyc_status(&docs).unwrap(), KycStatus::Pending);
    }

    #[test]
    fn test_aggregate_verified_when_all_submitted_verified() {
        let docs = vec![doc("aadhaar", "verified"), doc("pan", "verified")];
        assert_eq!(aggregate_kyc_status(&docs).unwrap(), KycStatus::Verified);
    }

    #[test]
    fn test_aggregate_rejected_wins() {
        let docs = vec![doc("aadhaar", "rejected"), doc("pan", "verified")];
        assert_eq!(aggregate_kyc_status(&docs).unwrap(), KycStatus::Rejected);
    }

    #[test]
    fn test_aggregate_no_documents_is_pending() {
        assert_eq!(aggregate_kyc_status(&[]).unwrap(), KycStatus::Pending);
    }

    #[test]
    fn test_resubmission_supersedes_rejected() {
        let mut old = doc("aadhaar", "rejected");
        old.submitted_at = Utc::now() - Duration::days(1);
        let docs = vec![old, doc("aadhaar", "verified")];
        assert_eq!(aggregate_kyc_status(&docs).unwrap(), KycStatus::Verified);
    }

    #[test]
    fn test_optional_rc_does_not_block() {
        let docs = vec![
            doc("aadhaar", "verified"),
            doc("pan", "verified"),
            doc("rc", "pending"),
        ];
        assert_eq!(aggregate_kyc_status(&docs).unwrap(), KycStatus::Verified);
    }

    #[test]
    fn test_rejection_requires_notes() {
        assert!(validate_decision(VerificationStatus::Rejected, None).is_err());
        assert!(validate_decision(VerificationStatus::Rejected, Some("  ")).is_err());
        assert!(validate_decision(VerificationStatus::Rejected, Some("foto ilegible")).is_ok());
        assert!(validate_decision(VerificationStatus::Verified, None).is_ok());
    }

    #[test]
    fn test_decision_is_terminal() {
        assert!(ensure_document_is_decidable(VerificationStatus::Pending).is_ok());
        assert!(ensure_document_is_decidable(VerificationStatus::Verified).is_err());
        assert!(ensure_document_is_decidable(VerificationStatus::Rejected).is_err());
    }
}
