//! Servicio de flujo de daños
//!
//! Reglas puras del flujo de trabajo de registros de daño: avance ordenado
//! con saltos hacia adelante permitidos, requisitos de cierre y política de
//! severidad sobre el estado del vehículo.

use rust_decimal::Decimal;

use crate::models::damage_record::{DamageSeverity, DamageStatus};
use crate::utils::errors::AppError;

/// Posición en el flujo: reported → under_review → approved_for_repair →
/// in_repair → {resolved | rejected}. resolved y rejected son terminales.
fn rank(status: DamageStatus) -> u8 {
    match status {
        DamageStatus::Reported => 0,
        DamageStatus::UnderReview => 1,
        DamageStatus::ApprovedForRepair => 2,
        DamageStatus::InRepair => 3,
        DamageStatus::Resolved | DamageStatus::Rejected => 4,
    }
}

/// El operador puede saltar estados intermedios, pero nunca retroceder
pub fn can_transition(from: DamageStatus, to: DamageStatus) -> bool {
    if matches!(from, DamageStatus::Resolved | DamageStatus::Rejected) {
        return false;
    }
    rank(to) > rank(from)
}

/// Verificar una transición de daño junto con sus requisitos de cierre:
/// resolved exige actual_cost, rejected exige resolution_notes.
pub fn ensure_transition(
    from: DamageStatus,
    to: DamageStatus,
    actual_cost: Option<Decimal>,
    resolution_notes: Option<&str>,
) -> Result<(), AppError> {
    if !can_transition(from, to) {
        return Err(AppError::InvalidTransition(format!(
            "No se permite la transición de daño {} -> {}",
            from.as_str(),
            to.as_str()
        )));
    }

    match to {
        DamageStatus::Resolved => {
            let cost = actual_cost.ok_or_else(|| {
                AppError::ValidationError(
                    "Resolver un daño requiere el costo real".to_string(),
                )
            })?;
            if cost < Decimal::ZERO {
                return Err(AppError::ValidationError(
                    "El costo real no puede ser negativo".to_string(),
                ));
            }
            Ok(())
        }
        DamageStatus::Rejected => {
            let has_notes = resolution_notes
                .map(|n| !n.trim().is_empty())
                .unwrap_or(false);
            if has_notes {
                Ok(())
            } else {
                Err(AppError::ValidationError(
                    "Rechazar un daño requiere notas de resolución".to_string(),
                ))
            }
        }
        _ => Ok(()),
    }
}

/// Política: un daño moderado o mayor fuerza el vehículo a 'damaged'
pub fn forces_vehicle_damaged(severity: DamageSeverity) -> bool {
    severity >= DamageSeverity::Moderate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_steps_allowed() {
        use DamageStatus::*;
        assert!(can_transition(Reported, UnderReview));
        assert!(can_transition(UnderReview, ApprovedForRepair));
        assert!(can_transition(ApprovedForRepair, InRepair));
        assert!(can_transition(InRepair, Resolved));
        assert!(can_transition(InRepair, Rejected));
    }

    #[test]
    fn test_forward_skips_allowed() {
        use DamageStatus::*;
        assert!(can_transition(Reported, InRepair));
        assert!(can_transition(Reported, Rejected));
        assert!(can_transition(UnderReview, Resolved));
    }

    #[test]
    fn test_backward_moves_rejected() {
        use DamageStatus::*;
        assert!(!can_transition(InRepair, UnderReview));
        assert!(!can_transition(UnderReview, Reported));
        assert!(!can_transition(InRepair, InRepair));
    }

    #[test]
    fn test_terminal_states() {
        use DamageStatus::*;
        for to in [Reported, UnderReview, ApprovedForRepair, InRepair, Resolved, Rejected] {
            assert!(!can_transition(Resolved, to));
            assert!(!can_transition(Rejected, to));
        }
    }

    #[test]
    fn test_resolved_requires_actual_cost() {
        use DamageStatus::*;
        assert!(ensure_transition(InRepair, Resolved, None, None).is_err());
        assert!(ensure_transition(InRepair, Resolved, Some(Decimal::from(1200)), None).is_ok());
    }

    #[test]
    fn test_rejected_requires_notes() {
        use DamageStatus::*;
        assert!(ensure_transition(UnderReview, Rejected, None, None).is_err());
        assert!(ensure_transition(UnderReview, Rejected, None, Some("no es un daño")).is_ok());
    }

    #[test]
    fn test_severity_policy() {
        assert!(!forces_vehicle_damaged(DamageSeverity::Minor));
        assert!(forces_vehicle_damaged(DamageSeverity::Moderate));
        assert!(forces_vehicle_damaged(DamageSeverity::Major));
    }
}
