// src/handlers/health.rs

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::{
    common::{db_utils::get_connection, error::AppError},
    config::AppState,
};

pub const API_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "ok")]
    pub status: &'static str,
    pub app: String,
    #[schema(example = "up")]
    pub db: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VersionInfo {
    pub app: String,
    #[schema(example = "1.0.0")]
    pub version: &'static str,
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn header_str<'a>(headers: &'a HeaderMap, name: header::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

// GET /healthz
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "Sistema",
    responses(
        (status = 200, description = "API e banco no ar", body = HealthStatus),
        (status = 500, description = "Banco inacessível", body = HealthStatus)
    )
)]
pub async fn healthz(State(app_state): State<AppState>) -> impl IntoResponse {
    let app = app_state.config.app_name.clone();

    let probe = async {
        let mut conn = get_connection(&app_state).await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok::<_, AppError>(())
    };

    match probe.await {
        Ok(()) => (StatusCode::OK, Json(HealthStatus { status: "ok", app, db: "up" })),
        Err(e) => {
            tracing::warn!("Health check degradado: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthStatus { status: "degraded", app, db: "down" }),
            )
        }
    }
}

// GET /version
#[utoipa::path(
    get,
    path = "/version",
    tag = "Sistema",
    responses((status = 200, body = VersionInfo))
)]
pub async fn version(State(app_state): State<AppState>) -> Json<VersionInfo> {
    Json(VersionInfo {
        app: app_state.config.app_name.clone(),
        version: API_VERSION,
    })
}

// GET /test-connection
#[utoipa::path(
    get,
    path = "/test-connection",
    tag = "Sistema",
    responses((status = 200, description = "Ping simples"))
)]
pub async fn test_connection() -> Json<Value> {
    Json(json!({ "message": "API funcionando 🚀" }))
}

// GET /debug
// Só metadados: a URL do banco nunca sai daqui, apenas se ela existe.
#[utoipa::path(
    get,
    path = "/debug",
    tag = "Sistema",
    responses((status = 200, description = "Configuração efetiva (sem segredos)"))
)]
pub async fn debug_info(State(app_state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    let config = &app_state.config;
    Json(json!({
        "message": "Debug endpoint funcionando",
        "timestamp": now_iso(),
        "headers": {
            "origin": header_str(&headers, header::ORIGIN),
            "user-agent": header_str(&headers, header::USER_AGENT),
            "host": header_str(&headers, header::HOST),
        },
        "environment": {
            "APP_NAME": config.app_name,
            "PORT": config.port,
            "HAS_DATABASE_URL": !config.database_url.is_empty(),
            "CORS_CONFIGURED": config.cors_configured(),
            "CORS_ORIGINS": app_state.cors.origins(),
            "PG_POOL_MAX": config.pool_max,
            "RATE_LIMIT_MAX": config.rate_limit_max,
        }
    }))
}

// GET /cors-test
#[utoipa::path(
    get,
    path = "/cors-test",
    tag = "Sistema",
    responses((status = 200, description = "Eco da origem recebida"))
)]
pub async fn cors_test(method: Method, headers: HeaderMap) -> Json<Value> {
    Json(json!({
        "message": "CORS teste OK",
        "origin": header_str(&headers, header::ORIGIN),
        "method": method.as_str(),
        "timestamp": now_iso(),
    }))
}

/// Fallback do roteador.
pub async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}
