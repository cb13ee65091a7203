// src/handlers/products.rs

use axum::{
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::json;
use std::convert::Infallible;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::{
        db_utils::get_connection,
        error::AppError,
        params::{parse_id, Pagination, QueryPairs, MAX_PRODUCT_PAGE_SIZE},
    },
    config::AppState,
    models::{
        page::Page,
        product::{Product, ProductPayload},
    },
};

/// Tudo chega como texto: valores não numéricos caem no padrão.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    /// Página (>= 1, padrão 1)
    pub page: Option<String>,
    /// Itens por página (1..=100, padrão 50)
    pub page_size: Option<String>,
    /// Trecho do código ou da descrição
    pub search: Option<String>,
}

impl<S: Send + Sync> FromRequestParts<S> for ProductListQuery {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = QueryPairs::from_uri(&parts.uri);
        let get = |name: &str| pairs.first(&[name]).map(String::from);
        Ok(Self {
            page: get("page"),
            page_size: get("pageSize"),
            search: get("search"),
        })
    }
}

// GET /produtos
#[utoipa::path(
    get,
    path = "/produtos",
    tag = "Produtos",
    params(ProductListQuery),
    responses((status = 200, description = "Página de produtos", body = Page<Product>))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    query: ProductListQuery,
) -> Result<Json<Page<Product>>, AppError> {
    let pagination = Pagination::from_query(
        query.page.as_deref(),
        query.page_size.as_deref(),
        MAX_PRODUCT_PAGE_SIZE,
    );

    let mut conn = get_connection(&app_state).await?;
    let page = app_state
        .product_service
        .list(&mut conn, pagination, query.search.as_deref())
        .await?;
    Ok(Json(page))
}

// POST /produtos
#[utoipa::path(
    post,
    path = "/produtos",
    tag = "Produtos",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto criado"),
        (status = 400, description = "Campos obrigatórios ausentes ou família inexistente")
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<ProductPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut conn = get_connection(&app_state).await?;
    let id = app_state.product_service.create(&mut conn, payload).await?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "Produto criado", "id": id }))))
}

// PUT /produtos/{id}
#[utoipa::path(
    put,
    path = "/produtos/{id}",
    tag = "Produtos",
    request_body = ProductPayload,
    params(("id" = i32, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto atualizado"),
        (status = 400, description = "ID inválido ou campos ausentes")
    )
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<ProductPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    payload.validate()?;

    let mut conn = get_connection(&app_state).await?;
    let updated = app_state.product_service.update(&mut conn, id, payload).await?;
    tracing::info!(produtoid = id, linhas = updated, "Produto atualizado");

    Ok(Json(json!({ "message": "Produto atualizado" })))
}

// DELETE /produtos/{id}
#[utoipa::path(
    delete,
    path = "/produtos/{id}",
    tag = "Produtos",
    params(("id" = i32, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Linhas removidas (0 se não existia)"),
        (status = 400, description = "ID inválido ou produto em uso")
    )
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;

    let mut conn = get_connection(&app_state).await?;
    let row_count = app_state.product_service.delete(&mut conn, id).await?;

    Ok(Json(json!({ "message": "Produto excluído", "rowCount": row_count })))
}
