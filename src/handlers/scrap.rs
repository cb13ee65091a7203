// src/handlers/scrap.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use validator::Validate;

use crate::{
    common::{db_utils::get_connection, error::AppError, params::parse_id},
    config::AppState,
    handlers::production::FactListQuery,
    models::{
        page::Page,
        scrap::{CreateScrapPayload, ScrapRecord},
    },
};

// GET /descarte
#[utoipa::path(
    get,
    path = "/descarte",
    tag = "Descarte",
    params(FactListQuery),
    responses((status = 200, description = "Página de registros de descarte", body = Page<ScrapRecord>))
)]
pub async fn list_scrap(
    State(app_state): State<AppState>,
    query: FactListQuery,
) -> Result<Json<Page<ScrapRecord>>, AppError> {
    let mut conn = get_connection(&app_state).await?;
    let page = app_state
        .scrap_service
        .list(&mut conn, query.pagination(), &query.date_range())
        .await?;
    Ok(Json(page))
}

// POST /descarte
#[utoipa::path(
    post,
    path = "/descarte",
    tag = "Descarte",
    request_body = CreateScrapPayload,
    responses(
        (status = 201, description = "Descarte registrado"),
        (status = 400, description = "Campos obrigatórios ausentes ou referência inexistente")
    )
)]
pub async fn create_scrap(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateScrapPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut conn = get_connection(&app_state).await?;
    let id = app_state.scrap_service.create(&mut conn, payload).await?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "Descarte registrado", "id": id }))))
}

// DELETE /descarte/{id}
#[utoipa::path(
    delete,
    path = "/descarte/{id}",
    tag = "Descarte",
    params(("id" = i32, Path, description = "ID do registro de descarte")),
    responses(
        (status = 200, description = "Linhas removidas (0 se não existia)"),
        (status = 400, description = "ID inválido")
    )
)]
pub async fn delete_scrap(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;

    let mut conn = get_connection(&app_state).await?;
    let row_count = app_state.scrap_service.delete(&mut conn, id).await?;

    Ok(Json(json!({ "message": "Descarte excluído", "rowCount": row_count })))
}
