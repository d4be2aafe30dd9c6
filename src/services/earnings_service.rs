//! Servicio de cálculo de ganancias
//!
//! Reglas puras de la fórmula de ganancias por pedido y de la tabla de
//! transiciones del estado de pago. Sin estado global: el total se recalcula
//! explícitamente en cada mutación, nunca como efecto implícito.

use rust_decimal::Decimal;

use crate::models::earning::{EarningComponents, EarningComponentsPatch, PaymentStatus, RiderEarning};
use crate::utils::errors::AppError;

/// Calcular el total de una ganancia a partir de sus componentes.
/// Suma los componentes aditivos, resta la penalización y nunca baja de cero.
pub fn compute_total(components: &EarningComponents) -> Decimal {
    let gross = components.base_earning
        + components.distance_bonus
        + components.time_bonus
        + components.store_offer_bonus
        + components.ev_bonus
        + components.peak_time_bonus
        + components.quality_bonus
        + components.bonus_earning;

    let total = gross - components.penalty_amount;
    total.max(Decimal::ZERO)
}

/// Validar que ningún componente monetario sea negativo
pub fn validate_components(components: &EarningComponents) -> Result<(), AppError> {
    let named = [
        ("base_earning", components.base_earning),
        ("distance_bonus", components.distance_bonus),
        ("time_bonus", components.time_bonus),
        ("store_offer_bonus", components.store_offer_bonus),
        ("ev_bonus", components.ev_bonus),
        ("peak_time_bonus", components.peak_time_bonus),
        ("quality_bonus", components.quality_bonus),
        ("bonus_earning", components.bonus_earning),
        ("penalty_amount", components.penalty_amount),
    ];

    for (name, value) in named {
        if value < Decimal::ZERO {
            return Err(AppError::ValidationError(format!(
                "El componente '{}' no puede ser negativo",
                name
            )));
        }
    }

    Ok(())
}

/// Aplicar una edición parcial sobre los componentes actuales (last-writer-wins)
pub fn merge_components(
    current: EarningComponents,
    patch: &EarningComponentsPatch,
) -> EarningComponents {
    EarningComponents {
        base_earning: patch.base_earning.unwrap_or(current.base_earning),
        distance_bonus: patch.distance_bonus.unwrap_or(current.distance_bonus),
        time_bonus: patch.time_bonus.unwrap_or(current.time_bonus),
        store_offer_bonus: patch.store_offer_bonus.unwrap_or(current.store_offer_bonus),
        ev_bonus: patch.ev_bonus.unwrap_or(current.ev_bonus),
        peak_time_bonus: patch.peak_time_bonus.unwrap_or(current.peak_time_bonus),
        quality_bonus: patch.quality_bonus.unwrap_or(current.quality_bonus),
        bonus_earning: patch.bonus_earning.unwrap_or(current.bonus_earning),
        penalty_amount: patch.penalty_amount.unwrap_or(current.penalty_amount),
    }
}

/// Tabla de transiciones del estado de pago.
/// pending → processing → paid; processing → failed → pending (reintento);
/// cualquier estado no terminal → cancelled.
pub fn can_transition(from: PaymentStatus, to: PaymentStatus) -> bool {
    use PaymentStatus::*;

    match from {
        Pending => matches!(to, Processing | Cancelled),
        Processing => matches!(to, Paid | Failed | Cancelled),
        Failed => matches!(to, Pending | Cancelled),
        Paid => matches!(to, Cancelled),
        Cancelled => false,
    }
}

/// Verificar una transición de estado de pago o fallar con InvalidTransition
pub fn ensure_transition(from: PaymentStatus, to: PaymentStatus) -> Result<(), AppError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(AppError::InvalidTransition(format!(
            "No se permite la transición de pago {} -> {}",
            from.as_str(),
            to.as_str()
        )))
    }
}

/// Subtotal de la página actual - NO es el total general.
/// Los totales generales salen de una agregación sin paginar en el repositorio.
pub fn page_total(earnings: &[RiderEarning]) -> Decimal {
    earnings
        .iter()
        .map(|e| e.total_earning)
        .fold(Decimal::ZERO, |acc, v| acc + v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components(base: i64, offer: i64, penalty: i64) -> EarningComponents {
        EarningComponents {
            base_earning: Decimal::from(base),
            store_offer_bonus: Decimal::from(offer),
            penalty_amount: Decimal::from(penalty),
            ..Default::default()
        }
    }

    #[test]
    fn test_compute_total_sums_components() {
        let c = EarningComponents {
            base_earning: Decimal::from(35),
            distance_bonus: Decimal::from(10),
            time_bonus: Decimal::from(5),
            store_offer_bonus: Decimal::from(5),
            ev_bonus: Decimal::from(3),
            peak_time_bonus: Decimal::from(7),
            quality_bonus: Decimal::from(2),
            bonus_earning: Decimal::from(1),
            penalty_amount: Decimal::from(8),
        };

        assert_eq!(compute_total(&c), Decimal::from(60));
    }

    #[test]
    fn test_compute_total_clamps_at_zero() {
        // base=35, offer=5, penalty=50 => 0, no -10
        let c = components(35, 5, 50);
        assert_eq!(compute_total(&c), Decimal::ZERO);
    }

    #[test]
    fn test_compute_total_is_pure() {
        let c = components(35, 5, 10);
        assert_eq!(compute_total(&c), compute_total(&c));
    }

    #[test]
    fn test_validate_components_rejects_negative() {
        let mut c = components(35, 5, 0);
        c.quality_bonus = Decimal::from(-1);
        assert!(validate_components(&c).is_err());
    }

    #[test]
    fn test_validate_components_accepts_zero() {
        assert!(validate_components(&EarningComponents::default()).is_ok());
    }

    #[test]
    fn test_merge_recompute_no_drift() {
        let current = components(35, 5, 0);
        let patch = EarningComponentsPatch {
            penalty_amount: Some(Decimal::from(10)),
            ..Default::default()
        };

        let merged = merge_components(current, &patch);
        // El total guardado siempre tiene que coincidir con un cálculo fresco
        assert_eq!(compute_total(&merged), Decimal::from(30));
        assert_eq!(compute_total(&merged), compute_total(&merged.clone()));
    }

    #[test]
    fn test_payment_happy_path() {
        use PaymentStatus::*;
        assert!(can_transition(Pending, Processing));
        assert!(can_transition(Processing, Paid));
        assert!(can_transition(Pending, Cancelled));
    }

    #[test]
    fn test_payment_retry_path() {
        use PaymentStatus::*;
        assert!(can_transition(Processing, Failed));
        assert!(can_transition(Failed, Pending));
    }

    #[test]
    fn test_payment_rejects_paid_to_pending() {
        use PaymentStatus::*;
        assert!(!can_transition(Paid, Pending));
        assert!(!can_transition(Paid, Processing));
        assert!(!can_transition(Cancelled, Pending));
        assert!(ensure_transition(Paid, Pending).is_err());
    }

    #[test]
    fn test_cancelled_is_terminal() {
        use PaymentStatus::*;
        for to in [Pending, Processing, Paid, Failed, Cancelled] {
            assert!(!can_transition(Cancelled, to));
        }
    }
}
