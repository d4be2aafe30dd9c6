//! DTOs de riders y asignación

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::VehicleResponse;
use crate::models::rider::Rider;

/// Request para registrar un rider
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRiderRequest {
    #[validate(length(min = 2, max = 100))]
    pub full_name: String,

    #[validate(length(min = 8, max = 16))]
    pub phone: String,

    pub hub_id: Uuid,
}

/// Request para activar/desactivar un rider
#[derive(Debug, Deserialize)]
pub struct ToggleActiveRequest {
    pub is_active: bool,
}

/// Request para asignar un vehículo del hub al rider
#[derive(Debug, Deserialize)]
pub struct AssignVehicleRequest {
    pub vehicle_id: Uuid,
    pub hub_id: Uuid,
}

/// Response de rider
#[derive(Debug, Serialize)]
pub struct RiderResponse {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub hub_id: Uuid,
    pub is_active: bool,
    pub kyc_status: String,
    pub assigned_vehicle_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Rider> for RiderResponse {
    fn from(r: Rider) -> Self {
        Self {
            id: r.id,
            full_name: r.full_name,
            phone: r.phone,
            hub_id: r.hub_id,
            is_active: r.is_active,
            kyc_status: r.kyc_status,
            assigned_vehicle_id: r.assigned_vehicle_id,
            created_at: r.created_at,
        }
    }
}

/// Response de una operación de asignación: ambos lados de la relación
#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub rider: RiderResponse,
    pub vehicle: Option<VehicleResponse>,
}
