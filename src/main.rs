mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::auth::auth_middleware;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ev_fleet_admin=debug,info".into()),
        )
        .init();

    info!("🛵 EV Fleet Admin - Backend de flota de riders");
    info!("==============================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // CORS: permisivo solo en desarrollo
    let cors = if config.is_development() || config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(&config.cors_origins)
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app_state = AppState::new(pool, config);

    // Los routers de KYC y daños exigen operador autenticado: el id del
    // actor queda como campo de auditoría.
    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/earning", routes::earning_routes::create_earning_router())
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/rider", routes::rider_routes::create_rider_router())
        .nest(
            "/api/kyc",
            routes::kyc_routes::create_kyc_router()
                .route_layer(from_fn_with_state(app_state.clone(), auth_middleware)),
        )
        .nest(
            "/api/damage",
            routes::damage_routes::create_damage_router()
                .route_layer(from_fn_with_state(app_state.clone(), auth_middleware)),
        )
        .layer(cors)
        .with_state(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("💰 Endpoints - Earning:");
    info!("   POST /api/earning - Registrar ganancia de pedido");
    info!("   GET  /api/earning - Listar ganancias (paginado)");
    info!("   GET  /api/earning/:id - Obtener ganancia");
    info!("   PUT  /api/earning/:id - Editar componentes (recalcula total)");
    info!("   POST /api/earning/:id/status - Transición de estado de pago");
    info!("   GET  /api/earning/summary/rider/:id - Total general del rider");
    info!("   GET  /api/earning/summary/status - Totales por estado de pago");
    info!("🚗 Endpoints - Vehicle:");
    info!("   POST /api/vehicle - Crear vehículo");
    info!("   GET  /api/vehicle/assignable?hub_id= - Pool asignable del hub");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("   POST /api/vehicle/:id/maintenance - Programar mantenimiento");
    info!("   POST /api/vehicle/:id/maintenance/complete - Completar mantenimiento");
    info!("   POST /api/vehicle/:id/retire - Retirar vehículo");
    info!("   PUT  /api/vehicle/:id/hub - Trasladar de hub");
    info!("🛵 Endpoints - Rider:");
    info!("   POST /api/rider - Registrar rider");
    info!("   PUT  /api/rider/:id/active - Activar/desactivar");
    info!("   POST /api/rider/:id/assign - Asignar vehículo");
    info!("   POST /api/rider/:id/unassign - Desasignar vehículo");
    info!("   POST /api/rider/:id/kyc - Enviar documento KYC");
    info!("📋 Endpoints - KYC/Damage (requieren operador):");
    info!("   POST /api/kyc/:document_id/verify - Decidir documento");
    info!("   POST /api/damage - Reportar daño");
    info!("   PUT  /api/damage/:id/status - Avanzar flujo de daño");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "ev-fleet-admin",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
