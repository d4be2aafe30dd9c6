//! Repositorio de registros de daño
//!
//! El reporte y sus efectos sobre el estado del vehículo (política de
//! severidad, retorno a 'available' al resolver) se escriben en la misma
//! transacción que el registro de daño.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::damage_record::{DamageRecord, DamageSeverity, DamageStatus, DamageType};
use crate::models::vehicle::{OperationalStatus, Vehicle};
use crate::services::{assignment_service, damage_service};
use crate::utils::errors::AppError;

pub struct DamageRepository {
    pool: PgPool,
}

impl DamageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reportar un daño. Con la política activa, severidad moderada o mayor
    /// fuerza el vehículo a 'damaged' en la misma transacción; la asignación
    /// vigente no se toca.
    pub async fn create(
        &self,
        vehicle_id: Uuid,
        reported_by: Uuid,
        damage_type: DamageType,
        severity: DamageSeverity,
        description: String,
        estimated_cost: Option<Decimal>,
        force_vehicle_status: bool,
    ) -> Result<DamageRecord, AppError> {
        let mut tx = self.pool.begin().await?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE id = $1 FOR UPDATE",
        )
        .bind(vehicle_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error locking vehicle: {}", e)))?
        .ok_or_else(|| AppError::NotFound(format!("Vehicle '{}' not found", vehicle_id)))?;

        let record = sqlx::query_as::<_, DamageRecord>(
            r#"
            INSERT INTO damage_records (
                id, vehicle_id, reported_by, damage_type, severity,
                damage_status, description, estimated_cost, actual_cost,
                resolution_notes, reported_at, resolved_at
            )
            VALUES ($1, $2, $3, $4, $5, 'reported', $6, $7, NULL, NULL, $8, NULL)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(reported_by)
        .bind(damage_type.as_str())
        .bind(severity.as_str())
        .bind(description)
        .bind(estimated_cost)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating damage record: {}", e)))?;

        if force_vehicle_status && damage_service::forces_vehicle_damaged(severity) {
            let from = vehicle.operational_status()?;
            // Un vehículo retirado o ya dañado no cambia de estado
            if assignment_service::can_transition(from, OperationalStatus::Damaged) {
                sqlx::query("UPDATE vehicles SET operational_status = 'damaged' WHERE id = $1")
                    .bind(vehicle_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::DatabaseError(format!("Error updating vehicle status: {}", e))
                    })?;

                tracing::warn!(
                    "Vehículo {} marcado como dañado por daño {} (severidad {})",
                    vehicle_id,
                    record.id,
                    severity.as_str()
                );
            }
        }

        tx.commit().await?;
        Ok(record)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<DamageRecord>, AppError> {
        let record = sqlx::query_as::<_, DamageRecord>(
            "SELECT * FROM damage_records WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error finding damage record: {}", e)))?;

        Ok(record)
    }

    pub async fn list_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<DamageRecord>, AppError> {
        let records = sqlx::query_as::<_, DamageRecord>(
            "SELECT * FROM damage_records WHERE vehicle_id = $1 ORDER BY reported_at DESC",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing damage records: {}", e)))?;

        Ok(records)
    }

    /// Avanzar el flujo de un daño. Resolverlo devuelve a 'available' un
    /// vehículo que quedó en 'damaged'.
    pub async fn transition(
        &self,
        record_id: Uuid,
        to: DamageStatus,
        actual_cost: Option<Decimal>,
        resolution_notes: Option<String>,
    ) -> Result<DamageRecord, AppError> {
        let mut tx = self.pool.begin().await?;

        let record = sqlx::query_as::<_, DamageRecord>(
            "SELECT * FROM damage_records WHERE id = $1 FOR UPDATE",
        )
        .bind(record_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error locking damage record: {}", e)))?
        .ok_or_else(|| AppError::NotFound(format!("Damage record '{}' not found", record_id)))?;

        let from = record.damage_status()?;
        damage_service::ensure_transition(from, to, actual_cost, resolution_notes.as_deref())?;

        let is_terminal = matches!(to, DamageStatus::Resolved | DamageStatus::Rejected);
        let resolved_at = if is_terminal { Some(Utc::now()) } else { None };

        let record = sqlx::query_as::<_, DamageRecord>(
            r#"
            UPDATE damage_records
            SET damage_status = $2,
                actual_cost = COALESCE($3, actual_cost),
                resolution_notes = COALESCE($4, resolution_notes),
                resolved_at = COALESCE($5, resolved_at)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(record_id)
        .bind(to.as_str())
        .bind(actual_cost)
        .bind(resolution_notes)
        .bind(resolved_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating damage record: {}", e)))?;

        // El vehículo solo se restaura si sigue en 'damaged'; si un operador
        // lo movió mientras tanto, se respeta. Vuelve a 'assigned' cuando
        // conserva su rider: nunca al pool asignable con la relación viva.
        if to == DamageStatus::Resolved {
            let vehicle = sqlx::query_as::<_, Vehicle>(
                "SELECT * FROM vehicles WHERE id = $1 FOR UPDATE",
            )
            .bind(record.vehicle_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error locking vehicle: {}", e)))?;

            if let Some(vehicle) = vehicle {
                if vehicle.operational_status()? == OperationalStatus::Damaged {
                    let back_to = assignment_service::resume_status(vehicle.current_rider_id);

                    sqlx::query("UPDATE vehicles SET operational_status = $2 WHERE id = $1")
                        .bind(vehicle.id)
                        .bind(back_to.as_str())
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| {
                            AppError::DatabaseError(format!("Error restoring vehicle: {}", e))
                        })?;
                }
            }
        }

        tx.commit().await?;
        Ok(record)
    }
}
