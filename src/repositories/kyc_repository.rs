//! Repositorio de documentos KYC
//!
//! La decisión sobre un documento y el recálculo del estado KYC agregado del
//! rider ocurren en la misma transacción: el kyc_status guardado nunca queda
//! desincronizado de los documentos.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::kyc_document::{DocumentType, KycDocument, VerificationStatus};
use crate::models::rider::KycStatus;
use crate::services::kyc_service;
use crate::utils::errors::AppError;

pub struct KycRepository {
    pool: PgPool,
}

impl KycRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registrar un envío de documento. Un reenvío después de un rechazo
    /// inserta un registro nuevo; el anterior queda como historial.
    pub async fn submit(
        &self,
        rider_id: Uuid,
        document_type: DocumentType,
        document_number: Option<String>,
        file_url: Option<String>,
    ) -> Result<KycDocument, AppError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM riders WHERE id = $1)")
                .bind(rider_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Error checking rider: {}", e)))?;

        if !exists.0 {
            return Err(AppError::NotFound(format!("Rider '{}' not found", rider_id)));
        }

        let document = sqlx::query_as::<_, KycDocument>(
            r#"
            INSERT INTO kyc_documents (
                id, rider_id, document_type, document_number, file_url,
                verification_status, verified_by, verification_notes,
                submitted_at, verified_at
            )
            VALUES ($1, $2, $3, $4, $5, 'pending', NULL, NULL, $6, NULL)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(rider_id)
        .bind(document_type.as_str())
        .bind(document_number)
        .bind(file_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error submitting document: {}", e)))?;

        Ok(document)
    }

    pub async fn list_by_rider(&self, rider_id: Uuid) -> Result<Vec<KycDocument>, AppError> {
        let documents = sqlx::query_as::<_, KycDocument>(
            "SELECT * FROM kyc_documents WHERE rider_id = $1 ORDER BY submitted_at DESC",
        )
        .bind(rider_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing documents: {}", e)))?;

        Ok(documents)
    }

    /// Decidir un documento y recalcular el estado KYC del rider.
    /// Devuelve el documento actualizado y el nuevo estado agregado.
    pub async fn verify(
        &self,
        document_id: Uuid,
        decision: VerificationStatus,
        notes: Option<String>,
        actor_id: Uuid,
    ) -> Result<(KycDocument, KycStatus), AppError> {
        let mut tx = self.pool.begin().await?;

        let document = sqlx::query_as::<_, KycDocument>(
            "SELECT * FROM kyc_documents WHERE id = $1 FOR UPDATE",
        )
        .bind(document_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error locking document: {}", e)))?
        .ok_or_else(|| AppError::NotFound(format!("Document '{}' not found", document_id)))?;

        kyc_service::ensure_document_is_decidable(document.verification_status()?)?;

        let document = sqlx::query_as::<_, KycDocument>(
            r#"
            UPDATE kyc_documents
            SET verification_status = $2, verified_by = $3,
                verification_notes = $4, verified_at = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(document_id)
        .bind(decision.as_str())
        .bind(actor_id)
        .bind(notes)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating document: {}", e)))?;

        let all_documents = sqlx::query_as::<_, KycDocument>(
            "SELECT * FROM kyc_documents WHERE rider_id = $1",
        )
        .bind(document.rider_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error loading documents: {}", e)))?;

        let kyc_status = kyc_service::aggregate_kyc_status(&all_documents)?;

        sqlx::query("UPDATE riders SET kyc_status = $2 WHERE id = $1")
            .bind(document.rider_id)
            .bind(kyc_status.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error updating rider KYC: {}", e)))?;

        tx.commit().await?;

        tracing::info!(
            "Documento {} decidido como {} por {}; rider {} ahora {}",
            document_id,
            decision.as_str(),
            actor_id,
            document.rider_id,
            kyc_status.as_str()
        );

        Ok((document, kyc_status))
    }
}
