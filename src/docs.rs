// src/docs.rs

use axum::Json;
use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NM Produção API",
        version = "1.0.0",
        description = "Produção e descarte de chapas: catálogo, lançamentos e indicadores."
    ),
    paths(
        // --- Sistema ---
        handlers::health::healthz,
        handlers::health::version,
        handlers::health::test_connection,
        handlers::health::debug_info,
        handlers::health::cors_test,

        // --- Dimensões ---
        handlers::lookups::list_shifts,
        handlers::lookups::list_sectors,
        handlers::lookups::list_families,

        // --- Produtos ---
        handlers::products::list_products,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Produção ---
        handlers::production::list_production,
        handlers::production::create_production,
        handlers::production::delete_production,

        // --- Descarte ---
        handlers::scrap::list_scrap,
        handlers::scrap::create_scrap,
        handlers::scrap::delete_scrap,

        // --- Dashboard ---
        handlers::dashboard::get_stats,
    ),
    components(
        schemas(
            handlers::health::HealthStatus,
            handlers::health::VersionInfo,

            models::lookups::Shift,
            models::lookups::Sector,
            models::lookups::Family,

            models::product::Product,
            models::product::ProductPayload,

            models::production::ProductionRecord,
            models::production::CreateProductionPayload,

            models::scrap::ScrapRecord,
            models::scrap::CreateScrapPayload,

            models::dashboard::DashboardStats,
            models::dashboard::ShiftVolume,
            models::dashboard::DailyVolume,
        )
    ),
    tags(
        (name = "Sistema", description = "Saúde, versão e diagnóstico"),
        (name = "Dimensões", description = "Turnos, setores e famílias (só leitura)"),
        (name = "Produtos", description = "Catálogo de chapas"),
        (name = "Produção", description = "Lançamentos de produção"),
        (name = "Descarte", description = "Lançamentos de descarte"),
        (name = "Dashboard", description = "Indicadores gerenciais")
    )
)]
pub struct ApiDoc;

// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
