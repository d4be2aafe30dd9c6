//! Controller de vehículos
//!
//! Alta de vehículos y transiciones operacionales administrativas:
//! mantenimiento, retiro y traslado de hub.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, TransferHubRequest, VehicleResponse};
use crate::models::vehicle::OperationalStatus;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if request.registration_number.trim().is_empty() {
            return Err(AppError::ValidationError(
                "La matrícula es requerida".to_string(),
            ));
        }

        if self
            .repository
            .registration_exists(&request.registration_number)
            .await?
        {
            return Err(AppError::Conflict(
                "La matrícula ya está registrada".to_string(),
            ));
        }

        let vehicle = self
            .repository
            .create(
                request.hub_id,
                request.registration_number,
                request.make,
                request.model,
                request.battery_capacity_kwh,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(vehicle.into())
    }

    pub async fn list_by_hub(&self, hub_id: Uuid) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.list_by_hub(hub_id).await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    /// Pool asignable del hub. Sin hub la lista es vacía, nunca "todos los
    /// vehículos": es un comportamiento de seguridad deliberado.
    pub async fn list_assignable(
        &self,
        hub_id: Option<Uuid>,
    ) -> Result<Vec<VehicleResponse>, AppError> {
        let hub_id = match hub_id {
            Some(id) if !id.is_nil() => id,
            _ => return Ok(Vec::new()),
        };

        let vehicles = self.repository.list_available_by_hub(hub_id).await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn schedule_maintenance(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self
            .repository
            .transition_status(id, OperationalStatus::UnderMaintenance)
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo en mantenimiento".to_string(),
        ))
    }

    pub async fn complete_maintenance(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self.repository.complete_maintenance(id).await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Mantenimiento completado".to_string(),
        ))
    }

    pub async fn retire(&self, id: Uuid) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self
            .repository
            .transition_status(id, OperationalStatus::Retired)
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo retirado de la flota".to_string(),
        ))
    }

    pub async fn transfer_hub(
        &self,
        id: Uuid,
        request: TransferHubRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self.repository.transfer_hub(id, request.hub_id).await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo trasladado de hub".to_string(),
        ))
    }
}
