//! Middleware de autenticación JWT
//!
//! Extrae el id del operador de back-office del token Bearer. La identidad
//! es un colaborador externo: acá solo se decodifican los claims, el id del
//! actor se usa como campo de auditoría en KYC y daños.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::errors::AppError;

/// Claims del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // operator_id
    pub exp: usize,
    pub iat: usize,
}

/// Operador autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedOperator {
    pub operator_id: Uuid,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token_data = decode::<Claims>(
        auth_header,
        &DecodingKey::from_secret(state.config.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

    let operator_id = Uuid::parse_str(&token_data.claims.sub)
        .map_err(|_| AppError::Unauthorized("Token inválido: sub no es un UUID".to_string()))?;

    request
        .extensions_mut()
        .insert(AuthenticatedOperator { operator_id });

    Ok(next.run(request).await)
}
