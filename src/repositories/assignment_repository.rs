//! Repositorio de asignación rider-vehículo
//!
//! La relación es bidireccional (vehicles.current_rider_id y
//! riders.assigned_vehicle_id) y se escribe siempre en una sola transacción:
//! nunca un vehículo 'assigned' sin rider ni un rider apuntando a un
//! vehículo libre. El lado del vehículo es un update condicional sobre
//! operational_status = 'available', así dos asignaciones concurrentes del
//! mismo vehículo no pueden tener éxito las dos.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::rider::Rider;
use crate::models::vehicle::Vehicle;
use crate::services::assignment_service;
use crate::utils::errors::AppError;

pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn assign(
        &self,
        rider_id: Uuid,
        vehicle_id: Uuid,
        hub_id: Uuid,
    ) -> Result<(Rider, Vehicle), AppError> {
        let mut tx = self.pool.begin().await?;

        let rider = sqlx::query_as::<_, Rider>("SELECT * FROM riders WHERE id = $1 FOR UPDATE")
            .bind(rider_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error locking rider: {}", e)))?
            .ok_or_else(|| AppError::NotFound(format!("Rider '{}' not found", rider_id)))?;

        assignment_service::check_rider_can_receive_vehicle(&rider)?;

        // Check-and-set atómico: solo gana una de dos asignaciones concurrentes
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET operational_status = 'assigned', current_rider_id = $2
            WHERE id = $1 AND hub_id = $3 AND operational_status = 'available'
            RETURNING *
            "#,
        )
        .bind(vehicle_id)
        .bind(rider_id)
        .bind(hub_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error assigning vehicle: {}", e)))?;

        let vehicle = match vehicle {
            Some(v) => v,
            None => {
                // Distinguir por qué falló el update condicional
                let existing = sqlx::query_as::<_, Vehicle>(
                    "SELECT * FROM vehicles WHERE id = $1",
                )
                .bind(vehicle_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Error finding vehicle: {}", e)))?;

                return match existing {
                    None => Err(AppError::NotFound(format!(
                        "Vehicle '{}' not found",
                        vehicle_id
                    ))),
                    Some(v) if v.hub_id != hub_id => Err(AppError::InvalidState(
                        "El vehículo no pertenece al hub indicado".to_string(),
                    )),
                    Some(v) => Err(AppError::InvalidState(format!(
                        "El vehículo no está disponible (estado actual: {})",
                        v.operational_status
                    ))),
                };
            }
        };

        let rider = sqlx::query_as::<_, Rider>(
            "UPDATE riders SET assigned_vehicle_id = $2 WHERE id = $1 RETURNING *",
        )
        .bind(rider_id)
        .bind(vehicle_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating rider: {}", e)))?;

        tx.commit().await?;

        tracing::info!(
            "Vehículo {} asignado al rider {} en hub {}",
            vehicle_id,
            rider_id,
            hub_id
        );

        Ok((rider, vehicle))
    }

    /// Desasignar es idempotente: sin vehículo asignado es un no-op exitoso
    /// que no toca ningún registro de vehículo.
    pub async fn unassign(&self, rider_id: Uuid) -> Result<(Rider, Option<Vehicle>), AppError> {
        let mut tx = self.pool.begin().await?;

        let rider = sqlx::query_as::<_, Rider>("SELECT * FROM riders WHERE id = $1 FOR UPDATE")
            .bind(rider_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error locking rider: {}", e)))?
            .ok_or_else(|| AppError::NotFound(format!("Rider '{}' not found", rider_id)))?;

        let vehicle_id = match rider.assigned_vehicle_id {
            Some(id) => id,
            None => {
                tx.commit().await?;
                return Ok((rider, None));
            }
        };

        // El vehículo vuelve a 'available' solo desde 'assigned'; un vehículo
        // dañado o retirado conserva su estado al soltar la relación.
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET current_rider_id = NULL,
                operational_status = CASE
                    WHEN operational_status = 'assigned' THEN 'available'
                    ELSE operational_status
                END
            WHERE id = $1 AND current_rider_id = $2
            RETURNING *
            "#,
        )
        .bind(vehicle_id)
        .bind(rider_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error releasing vehicle: {}", e)))?;

        let rider = sqlx::query_as::<_, Rider>(
            "UPDATE riders SET assigned_vehicle_id = NULL WHERE id = $1 RETURNING *",
        )
        .bind(rider_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating rider: {}", e)))?;

        tx.commit().await?;

        tracing::info!("Rider {} desasignado del vehículo {}", rider_id, vehicle_id);
        Ok((rider, vehicle))
    }

    /// Activar/desactivar un rider. Política configurable: por defecto la
    /// desactivación NO desasigna el vehículo; con auto_unassign el vehículo
    /// se libera en la misma transacción.
    pub async fn set_rider_active(
        &self,
        rider_id: Uuid,
        new_status: bool,
        auto_unassign: bool,
    ) -> Result<Rider, AppError> {
        let mut tx = self.pool.begin().await?;

        let rider = sqlx::query_as::<_, Rider>(
            "UPDATE riders SET is_active = $2 WHERE id = $1 RETURNING *",
        )
        .bind(rider_id)
        .bind(new_status)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating rider: {}", e)))?
        .ok_or_else(|| AppError::NotFound(format!("Rider '{}' not found", rider_id)))?;

        let rider = if !new_status && auto_unassign {
            if let Some(vehicle_id) = rider.assigned_vehicle_id {
                sqlx::query(
                    r#"
                    UPDATE vehicles
                    SET current_rider_id = NULL,
                        operational_status = CASE
                            WHEN operational_status = 'assigned' THEN 'available'
                            ELSE operational_status
                        END
                    WHERE id = $1 AND current_rider_id = $2
                    "#,
                )
                .bind(vehicle_id)
                .bind(rider_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Error releasing vehicle: {}", e)))?;

                sqlx::query_as::<_, Rider>(
                    "UPDATE riders SET assigned_vehicle_id = NULL WHERE id = $1 RETURNING *",
                )
                .bind(rider_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Error updating rider: {}", e)))?
            } else {
                rider
            }
        } else {
            rider
        };

        tx.commit().await?;
        Ok(rider)
    }
}
