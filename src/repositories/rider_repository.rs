//! Repositorio de riders
//!
//! Persistencia básica de riders. La asignación de vehículos y el toggle de
//! actividad viven en assignment_repository porque tocan las dos tablas.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::rider::Rider;
use crate::utils::errors::AppError;

pub struct RiderRepository {
    pool: PgPool,
}

impl RiderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        full_name: String,
        phone: String,
        hub_id: Uuid,
    ) -> Result<Rider, AppError> {
        let rider = sqlx::query_as::<_, Rider>(
            r#"
            INSERT INTO riders (
                id, full_name, phone, hub_id, is_active,
                kyc_status, assigned_vehicle_id, created_at
            )
            VALUES ($1, $2, $3, $4, TRUE, 'pending', NULL, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(full_name)
        .bind(phone)
        .bind(hub_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating rider: {}", e)))?;

        Ok(rider)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Rider>, AppError> {
        let rider = sqlx::query_as::<_, Rider>("SELECT * FROM riders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding rider: {}", e)))?;

        Ok(rider)
    }

    pub async fn phone_exists(&self, phone: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM riders WHERE phone = $1)")
                .bind(phone)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Error checking phone: {}", e)))?;

        Ok(result.0)
    }

    pub async fn list_by_hub(&self, hub_id: Uuid) -> Result<Vec<Rider>, AppError> {
        let riders = sqlx::query_as::<_, Rider>(
            "SELECT * FROM riders WHERE hub_id = $1 ORDER BY full_name",
        )
        .bind(hub_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing riders: {}", e)))?;

        Ok(riders)
    }
}
