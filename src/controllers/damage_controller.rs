//! Controller del flujo de daños

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::damage_dto::{
    DamageRecordResponse, ReportDamageRequest, TransitionDamageRequest,
};
use crate::repositories::damage_repository::DamageRepository;
use crate::utils::errors::AppError;

pub struct DamageController {
    repository: DamageRepository,
}

impl DamageController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DamageRepository::new(pool),
        }
    }

    pub async fn report(
        &self,
        request: ReportDamageRequest,
        actor_id: Uuid,
        force_vehicle_status: bool,
    ) -> Result<ApiResponse<DamageRecordResponse>, AppError> {
        request.validate()?;

        let record = self
            .repository
            .create(
                request.vehicle_id,
                actor_id,
                request.damage_type,
                request.severity,
                request.description,
                request.estimated_cost,
                force_vehicle_status,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            record.into(),
            "Daño reportado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<DamageRecordResponse, AppError> {
        let record = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Registro de daño no encontrado".to_string()))?;

        Ok(record.into())
    }

    pub async fn list_by_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Vec<DamageRecordResponse>, AppError> {
        let records = self.repository.list_by_vehicle(vehicle_id).await?;
        Ok(records.into_iter().map(DamageRecordResponse::from).collect())
    }

    pub async fn transition(
        &self,
        id: Uuid,
        request: TransitionDamageRequest,
    ) -> Result<ApiResponse<DamageRecordResponse>, AppError> {
        let record = self
            .repository
            .transition(
                id,
                request.new_status,
                request.actual_cost,
                request.resolution_notes,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            record.into(),
            format!("Daño actualizado a {}", request.new_status.as_str()),
        ))
    }
}
