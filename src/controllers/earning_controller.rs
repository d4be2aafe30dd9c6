//! Controller de ganancias de riders
//!
//! Orquesta la validación de negocio, el cálculo puro del servicio y la
//! persistencia del repositorio.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::earning_dto::{
    CreateEarningRequest, EarningListResponse, EarningResponse, ListEarningsQuery,
    RiderSummaryResponse, StatusSummaryResponse, TransitionPaymentRequest, UpdateEarningRequest,
};
use crate::repositories::earning_repository::{EarningFilters, EarningRepository, OrderMeta};
use crate::services::earnings_service;
use crate::utils::errors::AppError;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;

pub struct EarningController {
    repository: EarningRepository,
}

impl EarningController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: EarningRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateEarningRequest,
    ) -> Result<ApiResponse<EarningResponse>, AppError> {
        request.validate()?;

        if request.rider_id.is_nil() || request.store_id.is_nil() {
            return Err(AppError::ValidationError(
                "rider_id y store_id son requeridos".to_string(),
            ));
        }
        if request.order_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "order_id es requerido".to_string(),
            ));
        }

        earnings_service::validate_components(&request.components)?;

        let earning = self
            .repository
            .create(
                request.rider_id,
                request.store_id,
                request.order_id,
                request.order_date,
                &request.components,
                OrderMeta {
                    delivery_start_time: request.delivery_start_time,
                    delivery_end_time: request.delivery_end_time,
                    distance_traveled: request.distance_traveled,
                    energy_used: request.energy_used,
                    notes: request.notes,
                },
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            earning.into(),
            "Ganancia registrada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<EarningResponse, AppError> {
        let earning = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ganancia no encontrada".to_string()))?;

        Ok(earning.into())
    }

    pub async fn list(&self, query: ListEarningsQuery) -> Result<EarningListResponse, AppError> {
        let filters = EarningFilters {
            rider_id: query.rider_id,
            store_id: query.store_id,
            payment_status: query.payment_status,
            date_from: query.date_from,
            date_to: query.date_to,
            limit: query
                .limit
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
            offset: query.offset.unwrap_or(0).max(0),
        };

        let earnings = self.repository.list(&filters).await?;
        let page_total = earnings_service::page_total(&earnings);

        Ok(EarningListResponse {
            page_count: earnings.len(),
            page_total,
            earnings: earnings.into_iter().map(EarningResponse::from).collect(),
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateEarningRequest,
    ) -> Result<ApiResponse<EarningResponse>, AppError> {
        let earning = self
            .repository
            .update_components(id, &request.components, request.notes)
            .await?;

        Ok(ApiResponse::success_with_message(
            earning.into(),
            "Ganancia actualizada exitosamente".to_string(),
        ))
    }

    pub async fn transition_status(
        &self,
        id: Uuid,
        request: TransitionPaymentRequest,
    ) -> Result<ApiResponse<EarningResponse>, AppError> {
        let earning = self
            .repository
            .transition_status(id, request.new_status)
            .await?;

        Ok(ApiResponse::success_with_message(
            earning.into(),
            format!("Estado de pago actualizado a {}", request.new_status.as_str()),
        ))
    }

    /// Total general del rider - agregación sin paginar, nunca el subtotal de página
    pub async fn summary_by_rider(&self, rider_id: Uuid) -> Result<RiderSummaryResponse, AppError> {
        let (total_earning, orders_count) = self.repository.sum_by_rider(rider_id).await?;

        Ok(RiderSummaryResponse {
            rider_id,
            total_earning,
            orders_count,
        })
    }

    pub async fn summary_by_status(&self) -> Result<Vec<StatusSummaryResponse>, AppError> {
        let rows = self.repository.sum_by_status().await?;

        Ok(rows
            .into_iter()
            .map(|(payment_status, total_earning, count)| StatusSummaryResponse {
                payment_status,
                total_earning,
                count,
            })
            .collect())
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        let soft = self.repository.delete(id).await?;

        let message = if soft {
            "Ganancia pagada marcada como eliminada (se conserva para auditoría)"
        } else {
            "Ganancia eliminada exitosamente"
        };

        Ok(ApiResponse::success_with_message((), message.to_string()))
    }
}
