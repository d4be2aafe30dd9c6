//! Repositorio de vehículos
//!
//! Persistencia de vehicles. Las transiciones de estado operacional son
//! updates condicionales sobre el estado actual: perder la carrera atómica
//! se reporta como InvalidState.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::{OperationalStatus, Vehicle};
use crate::services::assignment_service;
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        hub_id: Uuid,
        registration_number: String,
        make: Option<String>,
        model: Option<String>,
        battery_capacity_kwh: Option<Decimal>,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, hub_id, registration_number, make, model,
                battery_capacity_kwh, operational_status, current_rider_id, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, 'available', NULL, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(hub_id)
        .bind(registration_number)
        .bind(make)
        .bind(model)
        .bind(battery_capacity_kwh)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating vehicle: {}", e)))?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding vehicle: {}", e)))?;

        Ok(vehicle)
    }

    pub async fn registration_exists(&self, registration_number: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE registration_number = $1)",
        )
        .bind(registration_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error checking registration: {}", e)))?;

        Ok(result.0)
    }

    /// Pool asignable: vehículos disponibles del hub, nada más
    pub async fn list_available_by_hub(&self, hub_id: Uuid) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE hub_id = $1 AND operational_status = 'available'
            ORDER BY registration_number
            "#,
        )
        .bind(hub_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing available vehicles: {}", e)))?;

        Ok(vehicles)
    }

    pub async fn list_by_hub(&self, hub_id: Uuid) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE hub_id = $1 ORDER BY registration_number",
        )
        .bind(hub_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing vehicles: {}", e)))?;

        Ok(vehicles)
    }

    /// Transición de estado operacional validada por la tabla del servicio
    /// y aplicada con update condicional sobre el estado actual.
    pub async fn transition_status(
        &self,
        id: Uuid,
        to: OperationalStatus,
    ) -> Result<Vehicle, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle '{}' not found", id)))?;

        let from = current.operational_status()?;
        assignment_service::ensure_transition(from, to)?;

        // Retirar un vehículo limpia la relación con el rider en ambos lados
        if to == OperationalStatus::Retired {
            return self.retire(id, from).await;
        }

        let updated = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET operational_status = $2
            WHERE id = $1 AND operational_status = $3
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(to.as_str())
        .bind(from.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating vehicle status: {}", e)))?
        .ok_or_else(|| {
            AppError::InvalidState(
                "El estado del vehículo cambió concurrentemente; re-consultar y reintentar"
                    .to_string(),
            )
        })?;

        Ok(updated)
    }

    /// Completar mantenimiento. El vehículo vuelve al estado que dicta su
    /// asignación vigente: 'assigned' si conserva rider, 'available' si no.
    /// El FOR UPDATE fija la relación mientras se decide el estado destino.
    pub async fn complete_maintenance(&self, id: Uuid) -> Result<Vehicle, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error locking vehicle: {}", e)))?
        .ok_or_else(|| AppError::NotFound(format!("Vehicle '{}' not found", id)))?;

        assignment_service::ensure_maintenance_completable(current.operational_status()?)?;
        let back_to = assignment_service::resume_status(current.current_rider_id);

        let updated = sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET operational_status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(back_to.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error completing maintenance: {}", e)))?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn retire(&self, id: Uuid, from: OperationalStatus) -> Result<Vehicle, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET operational_status = 'retired', current_rider_id = NULL
            WHERE id = $1 AND operational_status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(from.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error retiring vehicle: {}", e)))?
        .ok_or_else(|| {
            AppError::InvalidState(
                "El estado del vehículo cambió concurrentemente; re-consultar y reintentar"
                    .to_string(),
            )
        })?;

        sqlx::query("UPDATE riders SET assigned_vehicle_id = NULL WHERE assigned_vehicle_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error clearing rider link: {}", e)))?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Cambio de hub: prohibido mientras el vehículo esté asignado
    pub async fn transfer_hub(&self, id: Uuid, new_hub_id: Uuid) -> Result<Vehicle, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle '{}' not found", id)))?;

        if current.operational_status()? == OperationalStatus::Assigned {
            return Err(AppError::InvalidState(
                "No se puede cambiar el hub de un vehículo asignado; desasignar primero"
                    .to_string(),
            ));
        }

        let updated = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET hub_id = $2
            WHERE id = $1 AND operational_status != 'assigned'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new_hub_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error transferring vehicle: {}", e)))?
        .ok_or_else(|| {
            AppError::InvalidState(
                "El vehículo fue asignado concurrentemente; re-consultar y reintentar".to_string(),
            )
        })?;

        Ok(updated)
    }
}
