// src/app.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{
    config::AppState,
    docs,
    handlers,
    middleware::{cors::cors_guard, rate_limit::rate_limit, security_headers::security_headers},
};

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Monta o roteador completo. Camadas, de fora para dentro:
/// CORS (preflight responde aqui), trace, compressão, limite de corpo,
/// cabeçalhos de segurança, limite de taxa.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        // --- Sistema ---
        .route("/healthz", get(handlers::health::healthz))
        .route("/version", get(handlers::health::version))
        .route("/test-connection", get(handlers::health::test_connection))
        .route("/debug", get(handlers::health::debug_info))
        .route("/cors-test", get(handlers::health::cors_test))
        .route("/api-docs/openapi.json", get(docs::openapi_json))

        // --- Dimensões ---
        .route("/turnos", get(handlers::lookups::list_shifts))
        .route("/setores", get(handlers::lookups::list_sectors))
        .route("/familias", get(handlers::lookups::list_families))

        // --- Produtos ---
        .route("/produtos"
               ,get(handlers::products::list_products)
               .post(handlers::products::create_product)
        )
        .route("/produtos/{id}"
               ,put(handlers::products::update_product)
               .delete(handlers::products::delete_product)
        )

        // --- Fatos ---
        .route("/producao"
               ,get(handlers::production::list_production)
               .post(handlers::production::create_production)
        )
        .route("/producao/{id}", delete(handlers::production::delete_production))
        .route("/descarte"
               ,get(handlers::scrap::list_scrap)
               .post(handlers::scrap::create_scrap)
        )
        .route("/descarte/{id}", delete(handlers::scrap::delete_scrap))

        .route("/dashboard-stats", get(handlers::dashboard::get_stats))

        // Método errado em rota conhecida também é 404 JSON, não 405 vazio.
        .fallback(handlers::health::route_not_found)
        .method_not_allowed_fallback(handlers::health::route_not_found)

        .layer(axum_middleware::from_fn_with_state(app_state.clone(), rate_limit))
        .layer(axum_middleware::from_fn(security_headers))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), cors_guard))
        .with_state(app_state)
}
