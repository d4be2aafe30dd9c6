//! Servicio de ciclo de vida de asignación
//!
//! Reglas puras de la máquina de estados operacional del vehículo y de las
//! condiciones de elegibilidad del rider. La escritura atómica de la relación
//! bidireccional vive en el repositorio; acá solo están las reglas.

use uuid::Uuid;

use crate::models::rider::Rider;
use crate::models::vehicle::OperationalStatus;
use crate::utils::errors::AppError;

/// Tabla de transiciones del estado operacional del vehículo.
/// retired es terminal; damaged sale por reparación o resolución del daño.
pub fn can_transition(from: OperationalStatus, to: OperationalStatus) -> bool {
    use OperationalStatus::*;

    match from {
        Available => matches!(to, Assigned | UnderMaintenance | Retired | Damaged),
        Assigned => matches!(to, Available | UnderMaintenance | Retired | Damaged),
        UnderMaintenance => matches!(to, Available | Retired | Damaged),
        Damaged => matches!(to, Available | UnderMaintenance | Retired),
        Retired => false,
    }
}

/// Verificar una transición del vehículo o fallar con InvalidState
pub fn ensure_transition(from: OperationalStatus, to: OperationalStatus) -> Result<(), AppError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(AppError::InvalidState(format!(
            "El vehículo no puede pasar de {} a {}",
            from.as_str(),
            to.as_str()
        )))
    }
}

/// Completar mantenimiento solo aplica a un vehículo en mantenimiento;
/// un vehículo asignado o dañado no "completa" nada.
pub fn ensure_maintenance_completable(from: OperationalStatus) -> Result<(), AppError> {
    if from == OperationalStatus::UnderMaintenance {
        Ok(())
    } else {
        Err(AppError::InvalidState(format!(
            "Solo un vehículo en mantenimiento puede completar mantenimiento (estado actual: {})",
            from.as_str()
        )))
    }
}

/// Estado al que vuelve un vehículo al salir de mantenimiento o de un daño
/// resuelto. Si conserva su rider vuelve a 'assigned', nunca a 'available':
/// un vehículo con rider vigente no puede reaparecer en el pool asignable.
pub fn resume_status(current_rider_id: Option<Uuid>) -> OperationalStatus {
    if current_rider_id.is_some() {
        OperationalStatus::Assigned
    } else {
        OperationalStatus::Available
    }
}

/// Verificar que un rider puede recibir un vehículo.
/// Política documentada: un rider con vehículo asignado debe desasignar
/// primero, no hay intercambio implícito.
pub fn check_rider_can_receive_vehicle(rider: &Rider) -> Result<(), AppError> {
    if !rider.is_active {
        return Err(AppError::NotEligible(
            "El rider está inactivo y no puede recibir un vehículo".to_string(),
        ));
    }

    if rider.assigned_vehicle_id.is_some() {
        return Err(AppError::InvalidState(
            "El rider ya tiene un vehículo asignado; desasignar primero".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn rider(is_active: bool, assigned: Option<Uuid>) -> Rider {
        Rider {
            id: Uuid::new_v4(),
            full_name: "Ravi Kumar".to_string(),
            phone: "+919800000001".to_string(),
            hub_id: Uuid::new_v4(),
            is_active,
            kyc_status: "verified".to_string(),
            assigned_vehicle_id: assigned,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_assignment_requires_available() {
        use OperationalStatus::*;
        assert!(can_transition(Available, Assigned));
        assert!(!can_transition(Assigned, Assigned));
        assert!(!can_transition(UnderMaintenance, Assigned));
        assert!(!can_transition(Damaged, Assigned));
        assert!(!can_transition(Retired, Assigned));
    }

    #[test]
    fn test_maintenance_cycle() {
        use OperationalStatus::*;
        assert!(can_transition(Available, UnderMaintenance));
        assert!(can_transition(Assigned, UnderMaintenance));
        assert!(can_transition(UnderMaintenance, Available));
    }

    #[test]
    fn test_retired_is_terminal() {
        use OperationalStatus::*;
        for to in [Available, Assigned, UnderMaintenance, Retired, Damaged] {
            assert!(!can_transition(Retired, to));
        }
    }

    #[test]
    fn test_any_state_can_retire_or_damage() {
        use OperationalStatus::*;
        for from in [Available, Assigned, UnderMaintenance, Damaged] {
            assert!(can_transition(from, Retired));
        }
        for from in [Available, Assigned, UnderMaintenance] {
            assert!(can_transition(from, Damaged));
        }
    }

    #[test]
    fn test_complete_maintenance_requires_maintenance_state() {
        use OperationalStatus::*;
        assert!(ensure_maintenance_completable(UnderMaintenance).is_ok());
        for from in [Available, Assigned, Damaged, Retired] {
            assert!(matches!(
                ensure_maintenance_completable(from),
                Err(AppError::InvalidState(_))
            ));
        }
    }

    #[test]
    fn test_resume_keeps_assignment() {
        // Un vehículo que conserva su rider nunca vuelve al pool asignable
        assert_eq!(
            resume_status(Some(Uuid::new_v4())),
            OperationalStatus::Assigned
        );
        assert_eq!(resume_status(None), OperationalStatus::Available);
    }

    #[test]
    fn test_inactive_rider_not_eligible() {
        let r = rider(false, None);
        assert!(matches!(
            check_rider_can_receive_vehicle(&r),
            Err(AppError::NotEligible(_))
        ));
    }

    #[test]
    fn test_rider_with_vehicle_must_unassign_first() {
        let r = rider(true, Some(Uuid::new_v4()));
        assert!(matches!(
            check_rider_can_receive_vehicle(&r),
            Err(AppError::InvalidState(_))
        ));
    }

    #[test]
    fn test_active_free_rider_is_eligible() {
        let r = rider(true, None);
        assert!(check_rider_can_receive_vehicle(&r).is_ok());
    }
}
