//! Modelo de DamageRecord
//!
//! Registros de daños de vehículos con su flujo de trabajo ordenado.
//! Mapea a la tabla damage_records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Estado del flujo de trabajo de un daño
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageStatus {
    Reported,
    UnderReview,
    ApprovedForRepair,
    InRepair,
    Resolved,
    Rejected,
}

impl DamageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageStatus::Reported => "reported",
            DamageStatus::UnderReview => "under_review",
            DamageStatus::ApprovedForRepair => "approved_for_repair",
            DamageStatus::InRepair => "in_repair",
            DamageStatus::Resolved => "resolved",
            DamageStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "reported" => Ok(DamageStatus::Reported),
            "under_review" => Ok(DamageStatus::UnderReview),
            "approved_for_repair" => Ok(DamageStatus::ApprovedForRepair),
            "in_repair" => Ok(DamageStatus::InRepair),
            "resolved" => Ok(DamageStatus::Resolved),
            "rejected" => Ok(DamageStatus::Rejected),
            other => Err(AppError::Internal(format!(
                "Unknown damage status '{}'",
                other
            ))),
        }
    }
}

/// Severidad del daño - el orden importa para la política de estado del vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageSeverity {
    Minor,
    Moderate,
    Major,
}

impl DamageSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageSeverity::Minor => "minor",
            DamageSeverity::Moderate => "moderate",
            DamageSeverity::Major => "major",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "minor" => Ok(DamageSeverity::Minor),
            "moderate" => Ok(DamageSeverity::Moderate),
            "major" => Ok(DamageSeverity::Major),
            other => Err(AppError::Internal(format!(
                "Unknown damage severity '{}'",
                other
            ))),
        }
    }
}

/// Tipo de daño
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Cosmetic,
    Mechanical,
    Electrical,
    Structural,
}

impl DamageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageType::Cosmetic => "cosmetic",
            DamageType::Mechanical => "mechanical",
            DamageType::Electrical => "electrical",
            DamageType::Structural => "structural",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "cosmetic" => Ok(DamageType::Cosmetic),
            "mechanical" => Ok(DamageType::Mechanical),
            "electrical" => Ok(DamageType::Electrical),
            "structural" => Ok(DamageType::Structural),
            other => Err(AppError::Internal(format!(
                "Unknown damage type '{}'",
                other
            ))),
        }
    }
}

/// DamageRecord - mapea a la tabla damage_records
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DamageRecord {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub reported_by: Uuid,
    pub damage_type: String,
    pub severity: String,
    pub damage_status: String,
    pub description: String,
    pub estimated_cost: Option<Decimal>,
    pub actual_cost: Option<Decimal>,
    pub resolution_notes: Option<String>,
    pub reported_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl DamageRecord {
    pub fn damage_status(&self) -> Result<DamageStatus, AppError> {
        DamageStatus::parse(&self.damage_status)
    }
}
