//! DTOs de vehículos

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::Vehicle;

/// Request para registrar un vehículo en un hub
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    pub hub_id: Uuid,

    #[validate(length(min = 4, max = 20))]
    pub registration_number: String,

    #[validate(length(min = 2, max = 100))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    pub battery_capacity_kwh: Option<Decimal>,
}

/// Request para mover un vehículo a otro hub
#[derive(Debug, Deserialize)]
pub struct TransferHubRequest {
    pub hub_id: Uuid,
}

/// Query del pool asignable - sin hub no hay resultados, por diseño
#[derive(Debug, Deserialize)]
pub struct AssignableQuery {
    pub hub_id: Option<Uuid>,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub hub_id: Uuid,
    pub registration_number: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub battery_capacity_kwh: Option<Decimal>,
    pub operational_status: String,
    pub current_rider_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            hub_id: v.hub_id,
            registration_number: v.registration_number,
            make: v.make,
            model: v.model,
            battery_capacity_kwh: v.battery_capacity_kwh,
            operational_status: v.operational_status,
            current_rider_id: v.current_rider_id,
            created_at: v.created_at,
        }
    }
}
