// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{
    common::{db_utils::get_connection, error::AppError},
    config::AppState,
    models::dashboard::DashboardStats,
};

// GET /dashboard-stats
#[utoipa::path(
    get,
    path = "/dashboard-stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Totais, eficiência, volume por turno e evolução diária", body = DashboardStats),
        (status = 500, description = "Falha no banco")
    )
)]
pub async fn get_stats(State(app_state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let mut conn = get_connection(&app_state).await?;
    let stats = app_state.dashboard_service.get_stats(&mut conn).await?;
    Ok(Json(stats))
}
