//! Modelo de RiderEarning
//!
//! Este módulo contiene el struct RiderEarning, sus componentes monetarios
//! y el enum de estado de pago. Mapea a la tabla rider_earnings.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Estado de pago de una ganancia - el ciclo de vida lo maneja back-office
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Paid,
    Failed,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Processing => "processing",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Cancelled => "cancelled",
        }
    }

    /// Parsear el valor almacenado en la base de datos
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "pending" => Ok(PaymentStatus::Pending),
            "processing" => Ok(PaymentStatus::Processing),
            "paid" => Ok(PaymentStatus::Paid),
            "failed" => Ok(PaymentStatus::Failed),
            "cancelled" => Ok(PaymentStatus::Cancelled),
            other => Err(AppError::Internal(format!(
                "Unknown payment status '{}'",
                other
            ))),
        }
    }
}

/// Componentes de la fórmula de ganancias por pedido.
/// Todos los montos son no-negativos; la penalización se resta.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EarningComponents {
    pub base_earning: Decimal,
    pub distance_bonus: Decimal,
    pub time_bonus: Decimal,
    pub store_offer_bonus: Decimal,
    pub ev_bonus: Decimal,
    pub peak_time_bonus: Decimal,
    pub quality_bonus: Decimal,
    pub bonus_earning: Decimal,
    pub penalty_amount: Decimal,
}

/// Edición parcial de componentes - los campos ausentes conservan su valor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EarningComponentsPatch {
    pub base_earning: Option<Decimal>,
    pub distance_bonus: Option<Decimal>,
    pub time_bonus: Option<Decimal>,
    pub store_offer_bonus: Option<Decimal>,
    pub ev_bonus: Option<Decimal>,
    pub peak_time_bonus: Option<Decimal>,
    pub quality_bonus: Option<Decimal>,
    pub bonus_earning: Option<Decimal>,
    pub penalty_amount: Option<Decimal>,
}

/// RiderEarning - mapea a la tabla rider_earnings
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RiderEarning {
    pub id: Uuid,
    pub rider_id: Uuid,
    pub store_id: Uuid,
    pub order_id: String,
    pub base_earning: Decimal,
    pub distance_bonus: Decimal,
    pub time_bonus: Decimal,
    pub store_offer_bonus: Decimal,
    pub ev_bonus: Decimal,
    pub peak_time_bonus: Decimal,
    pub quality_bonus: Decimal,
    pub bonus_earning: Decimal,
    pub penalty_amount: Decimal,
    pub total_earning: Decimal,
    pub payment_status: String,
    pub order_date: NaiveDate,
    pub delivery_start_time: Option<DateTime<Utc>>,
    pub delivery_end_time: Option<DateTime<Utc>>,
    pub distance_traveled: Option<Decimal>,
    pub energy_used: Option<Decimal>,
    pub notes: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RiderEarning {
    /// Componentes actuales del registro, para recalcular el total
    pub fn components(&self) -> EarningComponents {
        EarningComponents {
            base_earning: self.base_earning,
            distance_bonus: self.distance_bonus,
            time_bonus: self.time_bonus,
            store_offer_bonus: self.store_offer_bonus,
            ev_bonus: self.ev_bonus,
            peak_time_bonus: self.peak_time_bonus,
            quality_bonus: self.quality_bonus,
            bonus_earning: self.bonus_earning,
            penalty_amount: self.penalty_amount,
        }
    }

    pub fn payment_status(&self) -> Result<PaymentStatus, AppError> {
        PaymentStatus::parse(&self.payment_status)
    }
}
