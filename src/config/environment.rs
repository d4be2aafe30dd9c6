//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno, incluidas las dos
//! banderas de política del ciclo de vida de asignación.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub cors_origins: Vec<String>,
    /// Política: desactivar un rider libera su vehículo automáticamente
    pub auto_unassign_on_deactivate: bool,
    /// Política: severidad moderada o mayor fuerza el vehículo a 'damaged'
    pub damage_forces_vehicle_status: bool,
}

impl EnvironmentConfig {
    pub fn from_env() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            auto_unassign_on_deactivate: env_flag("AUTO_UNASSIGN_ON_DEACTIVATE", false),
            damage_forces_vehicle_status: env_flag("DAMAGE_FORCES_VEHICLE_STATUS", true),
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_flag_default() {
        assert!(!env_flag("EV_FLEET_FLAG_QUE_NO_EXISTE", false));
        assert!(env_flag("EV_FLEET_FLAG_QUE_NO_EXISTE", true));
    }
}
