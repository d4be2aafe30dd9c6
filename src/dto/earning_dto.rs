//! DTOs de ganancias de riders

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::earning::{
    EarningComponents, EarningComponentsPatch, PaymentStatus, RiderEarning,
};

/// Request para registrar la ganancia de un pedido completado
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEarningRequest {
    pub rider_id: Uuid,
    pub store_id: Uuid,

    #[validate(length(min = 1, max = 64))]
    pub order_id: String,

    pub order_date: NaiveDate,

    #[serde(flatten)]
    pub components: EarningComponents,

    pub delivery_start_time: Option<DateTime<Utc>>,
    pub delivery_end_time: Option<DateTime<Utc>>,
    pub distance_traveled: Option<Decimal>,
    pub energy_used: Option<Decimal>,

    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Request para editar componentes - el total NO es editable, se recalcula
#[derive(Debug, Deserialize)]
pub struct UpdateEarningRequest {
    #[serde(flatten)]
    pub components: EarningComponentsPatch,
    pub notes: Option<String>,
}

/// Request para avanzar el estado de pago
#[derive(Debug, Deserialize)]
pub struct TransitionPaymentRequest {
    pub new_status: PaymentStatus,
}

/// Filtros de listado via query string
#[derive(Debug, Deserialize)]
pub struct ListEarningsQuery {
    pub rider_id: Option<Uuid>,
    pub store_id: Option<Uuid>,
    pub payment_status: Option<PaymentStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response de una ganancia
#[derive(Debug, Serialize)]
pub struct EarningResponse {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RiderEarning> for EarningResponse {
    fn from(e: RiderEarning) -> Self {
        Self {
            id: e.id,
            rider_id: e.rider_id,
            store_id: e.store_id,
            order_id: e.order_id,
            base_earning: e.base_earning,
            distance_bonus: e.distance_bonus,
            time_bonus: e.time_bonus,
            store_offer_bonus: e.store_offer_bonus,
            ev_bonus: e.ev_bonus,
            peak_time_bonus: e.peak_time_bonus,
            quality_bonus: e.quality_bonus,
            bonus_earning: e.bonus_earning,
            penalty_amount: e.penalty_amount,
            total_earning: e.total_earning,
            payment_status: e.payment_status,
            order_date: e.order_date,
            delivery_start_time: e.delivery_start_time,
            delivery_end_time: e.delivery_end_time,
            distance_traveled: e.distance_traveled,
            energy_used: e.energy_used,
            notes: e.notes,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Response de listado: el subtotal es de la PÁGINA, no el total general
#[derive(Debug, Serialize)]
pub struct EarningListResponse {
    pub earnings: Vec<EarningResponse>,
    pub page_count: usize,
    pub page_total: Decimal,
}

/// Total general de un rider (agregación sin paginar)
#[derive(Debug, Serialize)]
pub struct RiderSummaryResponse {
    pub rider_id: Uuid,
    pub total_earning: Decimal,
    pub orders_count: i64,
}

/// Totales generales por estado de pago (agregación sin paginar)
#[derive(Debug, Serialize)]
pub struct StatusSummaryResponse {
    pub payment_status: String,
    pub total_earning: Decimal,
    pub count: i64,
}
