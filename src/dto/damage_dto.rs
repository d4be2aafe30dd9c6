//! DTOs del flujo de daños

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::damage_record::{DamageRecord, DamageSeverity, DamageStatus, DamageType};

/// Request para reportar un daño
#[derive(Debug, Deserialize, Validate)]
pub struct ReportDamageRequest {
    pub vehicle_id: Uuid,
    pub damage_type: DamageType,
    pub severity: DamageSeverity,

    #[validate(length(min = 10, max = 1000))]
    pub description: String,

    pub estimated_cost: Option<Decimal>,
}

/// Request para avanzar el estado de un daño.
/// actual_cost es obligatorio al resolver; resolution_notes al rechazar.
#[derive(Debug, Deserialize)]
pub struct TransitionDamageRequest {
    pub new_status: DamageStatus,
    pub actual_cost: Option<Decimal>,
    pub resolution_notes: Option<String>,
}

/// Response de registro de daño
#[derive(Debug, Serialize)]
pub struct DamageRecordResponse {
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

impl From<DamageRecord> for DamageRecordResponse {
    fn from(r: DamageRecord) -> Self {
        Self {
            id: r.id,
            vehicle_id: r.vehicle_id,
            reported_by: r.reported_by,
            damage_type: r.damage_type,
            severity: r.severity,
            damage_status: r.damage_status,
            description: r.description,
            estimated_cost: r.estimated_cost,
            actual_cost: r.actual_cost,
            resolution_notes: r.resolution_notes,
            reported_at: r.reported_at,
            resolved_at: r.resolved_at,
        }
    }
}
