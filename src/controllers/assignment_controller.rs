//! Controller de riders y asignación
//!
//! Alta de riders, toggle de actividad y las dos operaciones de la relación
//! rider-vehículo. La política de desasignación automática al desactivar
//! viene de configuración.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::rider_dto::{
    AssignVehicleRequest, AssignmentResponse, CreateRiderRequest, RiderResponse,
    ToggleActiveRequest,
};
use crate::repositories::assignment_repository::AssignmentRepository;
use crate::repositories::rider_repository::RiderRepository;
use crate::utils::errors::AppError;

pub struct AssignmentController {
    riders: RiderRepository,
    assignments: AssignmentRepository,
}

impl AssignmentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            riders: RiderRepository::new(pool.clone()),
            assignments: AssignmentRepository::new(pool),
        }
    }

    pub async fn create_rider(
        &self,
        request: CreateRiderRequest,
    ) -> Result<ApiResponse<RiderResponse>, AppError> {
        request.validate()?;

        if self.riders.phone_exists(&request.phone).await? {
            return Err(AppError::Conflict(
                "El teléfono ya está registrado".to_string(),
            ));
        }

        let rider = self
            .riders
            .create(request.full_name, request.phone, request.hub_id)
            .await?;

        Ok(ApiResponse::success_with_message(
            rider.into(),
            "Rider registrado exitosamente".to_string(),
        ))
    }

    pub async fn get_rider(&self, id: Uuid) -> Result<RiderResponse, AppError> {
        let rider = self
            .riders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rider no encontrado".to_string()))?;

        Ok(rider.into())
    }

    pub async fn list_by_hub(&self, hub_id: Uuid) -> Result<Vec<RiderResponse>, AppError> {
        let riders = self.riders.list_by_hub(hub_id).await?;
        Ok(riders.into_iter().map(RiderResponse::from).collect())
    }

    pub async fn toggle_active(
        &self,
        rider_id: Uuid,
        request: ToggleActiveRequest,
        auto_unassign: bool,
    ) -> Result<ApiResponse<RiderResponse>, AppError> {
        let rider = self
            .assignments
            .set_rider_active(rider_id, request.is_active, auto_unassign)
            .await?;

        let message = if request.is_active {
            "Rider activado"
        } else if auto_unassign {
            "Rider desactivado; su vehículo fue liberado"
        } else {
            "Rider desactivado; su vehículo sigue asignado hasta desasignar"
        };

        Ok(ApiResponse::success_with_message(
            rider.into(),
            message.to_string(),
        ))
    }

    pub async fn assign_vehicle(
        &self,
        rider_id: Uuid,
        request: AssignVehicleRequest,
    ) -> Result<ApiResponse<AssignmentResponse>, AppError> {
        if request.hub_id.is_nil() {
            return Err(AppError::ValidationError(
                "hub_id es requerido para asignar".to_string(),
            ));
        }

        let (rider, vehicle) = self
            .assignments
            .assign(rider_id, request.vehicle_id, request.hub_id)
            .await?;

        Ok(ApiResponse::success_with_message(
            AssignmentResponse {
                rider: rider.into(),
                vehicle: Some(vehicle.into()),
            },
            "Vehículo asignado exitosamente".to_string(),
        ))
    }

    pub async fn unassign_vehicle(
        &self,
        rider_id: Uuid,
    ) -> Result<ApiResponse<AssignmentResponse>, AppError> {
        let (rider, vehicle) = self.assignments.unassign(rider_id).await?;

        let message = if vehicle.is_some() {
            "Vehículo desasignado exitosamente"
        } else {
            "El rider no tenía vehículo asignado"
        };

        Ok(ApiResponse::success_with_message(
            AssignmentResponse {
                rider: rider.into(),
                vehicle: vehicle.map(Into::into),
            },
            message.to_string(),
        ))
    }
}
