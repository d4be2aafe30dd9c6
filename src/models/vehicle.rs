//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y el enum de estado operacional.
//! Mapea a la tabla vehicles; cada vehículo pertenece a exactamente un hub.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Estado operacional del vehículo - máquina de estados finita
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationalStatus {
    Available,
    Assigned,
    UnderMaintenance,
    Retired,
    Damaged,
}

impl OperationalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationalStatus::Available => "available",
            OperationalStatus::Assigned => "assigned",
            OperationalStatus::UnderMaintenance => "under_maintenance",
            OperationalStatus::Retired => "retired",
            OperationalStatus::Damaged => "damaged",
        }
    }

    /// Parsear el valor almacenado en la base de datos
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "available" => Ok(OperationalStatus::Available),
            "assigned" => Ok(OperationalStatus::Assigned),
            "under_maintenance" => Ok(OperationalStatus::UnderMaintenance),
            "retired" => Ok(OperationalStatus::Retired),
            "damaged" => Ok(OperationalStatus::Damaged),
            other => Err(AppError::Internal(format!(
                "Unknown operational status '{}'",
                other
            ))),
        }
    }
}

/// Vehicle - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Vehicle {
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

impl Vehicle {
    pub fn operational_status(&self) -> Result<OperationalStatus, AppError> {
        OperationalStatus::parse(&self.operational_status)
    }
}
