//! Repositorio de ganancias de riders
//!
//! Persistencia de rider_earnings. El total guardado siempre sale de la
//! fórmula: toda edición de componentes recalcula dentro de la misma
//! transacción, y los cambios de estado de pago son updates condicionales.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::models::earning::{
    EarningComponents, EarningComponentsPatch, PaymentStatus, RiderEarning,
};
use crate::services::earnings_service;
use crate::utils::errors::AppError;

/// Filtros de listado de ganancias
#[derive(Debug, Default)]
pub struct EarningFilters {
    pub rider_id: Option<Uuid>,
    pub store_id: Option<Uuid>,
    pub payment_status: Option<PaymentStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub limit: i64,
    pub offset: i64,
}

/// Metadatos del pedido que acompañan a los componentes
#[derive(Debug, Default)]
pub struct OrderMeta {
    pub delivery_start_time: Option<DateTime<Utc>>,
    pub delivery_end_time: Option<DateTime<Utc>>,
    pub distance_traveled: Option<Decimal>,
    pub energy_used: Option<Decimal>,
    pub notes: Option<String>,
}

pub struct EarningRepository {
    pool: PgPool,
}

impl EarningRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        rider_id: Uuid,
        store_id: Uuid,
        order_id: String,
        order_date: NaiveDate,
        components: &EarningComponents,
        meta: OrderMeta,
    ) -> Result<RiderEarning, AppError> {
        let total = earnings_service::compute_total(components);
        let now = Utc::now();

        let earning = sqlx::query_as::<_, RiderEarning>(
            r#"
            INSERT INTO rider_earnings (
                id, rider_id, store_id, order_id,
                base_earning, distance_bonus, time_bonus, store_offer_bonus,
                ev_bonus, peak_time_bonus, quality_bonus, bonus_earning,
                penalty_amount, total_earning, payment_status, order_date,
                delivery_start_time, delivery_end_time, distance_traveled,
                energy_used, notes, deleted_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, 'pending', $15, $16, $17, $18, $19, $20, NULL, $21, $21)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(rider_id)
        .bind(store_id)
        .bind(order_id)
        .bind(components.base_earning)
        .bind(components.distance_bonus)
        .bind(components.time_bonus)
        .bind(components.store_offer_bonus)
        .bind(components.ev_bonus)
        .bind(components.peak_time_bonus)
        .bind(components.quality_bonus)
        .bind(components.bonus_earning)
        .bind(components.penalty_amount)
        .bind(total)
        .bind(order_date)
        .bind(meta.delivery_start_time)
        .bind(meta.delivery_end_time)
        .bind(meta.distance_traveled)
        .bind(meta.energy_used)
        .bind(meta.notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating earning: {}", e)))?;

        Ok(earning)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<RiderEarning>, AppError> {
        let earning = sqlx::query_as::<_, RiderEarning>(
            "SELECT * FROM rider_earnings WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error finding earning: {}", e)))?;

        Ok(earning)
    }

    /// Editar componentes y recalcular el total en la misma transacción.
    /// El SELECT ... FOR UPDATE serializa ediciones concurrentes: el total
    /// siempre refleja el conjunto de componentes final, nunca una suma parcial.
    pub async fn update_components(
        &self,
        id: Uuid,
        patch: &EarningComponentsPatch,
        notes: Option<String>,
    ) -> Result<RiderEarning, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, RiderEarning>(
            "SELECT * FROM rider_earnings WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error locking earning: {}", e)))?
        .ok_or_else(|| AppError::NotFound(format!("Earning '{}' not found", id)))?;

        let merged = earnings_service::merge_components(current.components(), patch);
        earnings_service::validate_components(&merged)?;
        let total = earnings_service::compute_total(&merged);

        let updated = sqlx::query_as::<_, RiderEarning>(
            r#"
            UPDATE rider_earnings
            SET base_earning = $2, distance_bonus = $3, time_bonus = $4,
                store_offer_bonus = $5, ev_bonus = $6, peak_time_bonus = $7,
                quality_bonus = $8, bonus_earning = $9, penalty_amount = $10,
                total_earning = $11, notes = COALESCE($12, notes), updated_at = $13
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(merged.base_earning)
        .bind(merged.distance_bonus)
        .bind(merged.time_bonus)
        .bind(merged.store_offer_bonus)
        .bind(merged.ev_bonus)
        .bind(merged.peak_time_bonus)
        .bind(merged.quality_bonus)
        .bind(merged.bonus_earning)
        .bind(merged.penalty_amount)
        .bind(total)
        .bind(notes)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating earning: {}", e)))?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Transición de estado de pago con update condicional sobre el estado
    /// esperado. Perder la carrera devuelve InvalidState para que el cliente
    /// re-consulte y reintente.
    pub async fn transition_status(
        &self,
        id: Uuid,
        new_status: PaymentStatus,
    ) -> Result<RiderEarning, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Earning '{}' not found", id)))?;

        let from = current.payment_status()?;
        earnings_service::ensure_transition(from, new_status)?;

        let updated = sqlx::query_as::<_, RiderEarning>(
            r#"
            UPDATE rider_earnings
            SET payment_status = $2, updated_at = $3
            WHERE id = $1 AND payment_status = $4 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new_status.as_str())
        .bind(Utc::now())
        .bind(from.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating payment status: {}", e)))?
        .ok_or_else(|| {
            AppError::InvalidState(
                "El estado de pago cambió concurrentemente; re-consultar y reintentar"
                    .to_string(),
            )
        })?;

        Ok(updated)
    }

    pub async fn list(&self, filters: &EarningFilters) -> Result<Vec<RiderEarning>, AppError> {
        let mut qb: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT * FROM rider_earnings WHERE deleted_at IS NULL");

        if let Some(rider_id) = filters.rider_id {
            qb.push(" AND rider_id = ").push_bind(rider_id);
        }
        if let Some(store_id) = filters.store_id {
            qb.push(" AND store_id = ").push_bind(store_id);
        }
        if let Some(status) = filters.payment_status {
            qb.push(" AND payment_status = ").push_bind(status.as_str());
        }
        if let Some(from) = filters.date_from {
            qb.push(" AND order_date >= ").push_bind(from);
        }
        if let Some(to) = filters.date_to {
            qb.push(" AND order_date <= ").push_bind(to);
        }

        qb.push(" ORDER BY order_date DESC, created_at DESC");
        qb.push(" LIMIT ").push_bind(filters.limit);
        qb.push(" OFFSET ").push_bind(filters.offset);

        let earnings = qb
            .build_query_as::<RiderEarning>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error listing earnings: {}", e)))?;

        Ok(earnings)
    }

    /// Total general por rider - agregación SIN paginar.
    /// Nunca reportar un subtotal de página como total general.
    pub async fn sum_by_rider(&self, rider_id: Uuid) -> Result<(Decimal, i64), AppError> {
        let row: (Decimal, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(total_earning), 0), COUNT(*)
            FROM rider_earnings
            WHERE rider_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(rider_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error summing earnings: {}", e)))?;

        Ok(row)
    }

    /// Totales generales agrupados por estado de pago - sin paginar
    pub async fn sum_by_status(&self) -> Result<Vec<(String, Decimal, i64)>, AppError> {
        let rows: Vec<(String, Decimal, i64)> = sqlx::query_as(
            r#"
            SELECT payment_status, COALESCE(SUM(total_earning), 0), COUNT(*)
            FROM rider_earnings
            WHERE deleted_at IS NULL
            GROUP BY payment_status
            ORDER BY payment_status
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error summing by status: {}", e)))?;

        Ok(rows)
    }

    /// Borrado: duro mientras no esté pagada; una ganancia pagada se marca
    /// con deleted_at para conservar el rastro de auditoría.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Earning '{}' not found", id)))?;

        let soft = current.payment_status()? == PaymentStatus::Paid;

        if soft {
            sqlx::query(
                "UPDATE rider_earnings SET deleted_at = $2, updated_at = $2 WHERE id = $1",
            )
            .bind(id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error soft-deleting earning: {}", e)))?;
        } else {
            sqlx::query("DELETE FROM rider_earnings WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Error deleting earning: {}", e)))?;
        }

        Ok(soft)
    }
}
