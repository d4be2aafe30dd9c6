//! Modelo de Rider
//!
//! Este módulo contiene el struct Rider y el enum de estado KYC agregado.
//! Mapea a la tabla riders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado KYC agregado del rider - derivado de sus documentos.
/// La columna kyc_status solo se escribe desde la agregación, nunca se
/// re-parsea en lecturas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    Pending,
    Verified,
    Rejected,
}

impl KycStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::Pending => "pending",
            KycStatus::Verified => "verified",
            KycStatus::Rejected => "rejected",
        }
    }
}

/// Rider - mapea a la tabla riders
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Rider {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub hub_id: Uuid,
    pub is_active: bool,
    pub kyc_status: String,
    pub assigned_vehicle_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
