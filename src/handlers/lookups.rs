// src/handlers/lookups.rs

use axum::{extract::State, Json};

use crate::{
    common::{db_utils::get_connection, error::AppError},
    config::AppState,
    models::lookups::{Family, Sector, Shift},
};

// GET /turnos
#[utoipa::path(
    get,
    path = "/turnos",
    tag = "Dimensões",
    responses((status = 200, description = "Turnos cadastrados", body = Vec<Shift>))
)]
pub async fn list_shifts(State(app_state): State<AppState>) -> Result<Json<Vec<Shift>>, AppError> {
    let mut conn = get_connection(&app_state).await?;
    let rows = app_state.lookup_repo.list_shifts(&mut *conn).await?;
    Ok(Json(rows))
}

// GET /setores
#[utoipa::path(
    get,
    path = "/setores",
    tag = "Dimensões",
    responses((status = 200, description = "Setores cadastrados", body = Vec<Sector>))
)]
pub async fn list_sectors(State(app_state): State<AppState>) -> Result<Json<Vec<Sector>>, AppError> {
    let mut conn = get_connection(&app_state).await?;
    let rows = app_state.lookup_repo.list_sectors(&mut *conn).await?;
    Ok(Json(rows))
}

// GET /familias
#[utoipa::path(
    get,
    path = "/familias",
    tag = "Dimensões",
    responses((status = 200, description = "Famílias de produto", body = Vec<Family>))
)]
pub async fn list_families(State(app_state): State<AppState>) -> Result<Json<Vec<Family>>, AppError> {
    let mut conn = get_connection(&app_state).await?;
    let rows = app_state.lookup_repo.list_families(&mut *conn).await?;
    Ok(Json(rows))
}
