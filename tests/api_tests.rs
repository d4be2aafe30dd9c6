use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Json;
use axum::routing::{get, post};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["service"], "ev-fleet-admin");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/no-existe")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_earning_endpoint_rejects_malformed_json() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/earning")
                .header("content-type", "application/json")
                .body(Body::from("{esto no es json"))
                .unwrap(),
        )
        .await
        .unwrap();

    // JSON inválido nunca debe dar 500
    assert_ne!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// App de test básica que refleja la superficie de la API real.
// Los flujos contra Postgres se prueban a nivel de servicio (ver src/services)
// y el mapeo de errores HTTP en src/utils/errors.rs.
fn create_test_app() -> axum::Router {
    axum::Router::new()
        .route("/health", get(health_stub))
        .route("/api/earning", post(created_stub))
        .route("/api/rider", post(created_stub))
        .route("/api/vehicle", post(created_stub))
}

async fn health_stub() -> Json<serde_json::Value> {
    Json(json!({
        "service": "ev-fleet-admin",
        "status": "healthy",
    }))
}

async fn created_stub(Json(_body): Json<serde_json::Value>) -> StatusCode {
    StatusCode::CREATED
}
