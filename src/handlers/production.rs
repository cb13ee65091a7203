// src/handlers/production.rs

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
        params::{parse_id, DateRange, Pagination, QueryPairs, MAX_FACT_PAGE_SIZE},
    },
    config::AppState,
    models::{
        page::Page,
        production::{CreateProductionPayload, ProductionRecord},
    },
};

/// Filtros das listagens de fatos (produção e descarte).
/// `de`/`ate` são os nomes antigos de `from`/`to`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FactListQuery {
    pub page: Option<String>,
    /// Itens por página (1..=200, padrão 50)
    pub page_size: Option<String>,
    /// Data inicial inclusiva (YYYY-MM-DD)
    #[serde(alias = "de")]
    pub from: Option<String>,
    /// Data final inclusiva (YYYY-MM-DD)
    #[serde(alias = "ate")]
    pub to: Option<String>,
}

impl FactListQuery {
    /// Chave repetida ou par nome/apelido: vale o primeiro que aparecer.
    pub fn from_pairs(pairs: &QueryPairs) -> Self {
        let get = |names: &[&str]| pairs.first(names).map(String::from);
        Self {
            page: get(&["page"]),
            page_size: get(&["pageSize"]),
            from: get(&["from", "de"]),
            to: get(&["to", "ate"]),
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page.as_deref(), self.page_size.as_deref(), MAX_FACT_PAGE_SIZE)
    }

    pub fn date_range(&self) -> DateRange {
        DateRange::from_query(self.from.as_deref(), self.to.as_deref())
    }
}

// Filtro estranho nunca vira 400: cai no padrão.
impl<S: Send + Sync> FromRequestParts<S> for FactListQuery {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_pairs(&QueryPairs::from_uri(&parts.uri)))
    }
}

// GET /producao
#[utoipa::path(
    get,
    path = "/producao",
    tag = "Produção",
    params(FactListQuery),
    responses((status = 200, description = "Página de registros de produção", body = Page<ProductionRecord>))
)]
pub async fn list_production(
    State(app_state): State<AppState>,
    query: FactListQuery,
) -> Result<Json<Page<ProductionRecord>>, AppError> {
    let mut conn = get_connection(&app_state).await?;
    let page = app_state
        .production_service
        .list(&mut conn, query.pagination(), &query.date_range())
        .await?;
    Ok(Json(page))
}

// POST /producao
#[utoipa::path(
    post,
    path = "/producao",
    tag = "Produção",
    request_body = CreateProductionPayload,
    responses(
        (status = 201, description = "Produção registrada"),
        (status = 400, description = "Campos obrigatórios ausentes ou produto inválido")
    )
)]
pub async fn create_production(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateProductionPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut conn = get_connection(&app_state).await?;
    let id = app_state.production_service.create(&mut conn, &payload).await?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "Produção registrada", "id": id }))))
}

// DELETE /producao/{id}
#[utoipa::path(
    delete,
    path = "/producao/{id}",
    tag = "Produção",
    params(("id" = i32, Path, description = "ID do registro de produção")),
    responses(
        (status = 200, description = "Linhas removidas (0 se não existia)"),
        (status = 400, description = "ID inválido")
    )
)]
pub async fn delete_production(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;

    let mut conn = get_connection(&app_state).await?;
    let row_count = app_state.production_service.delete(&mut conn, id).await?;

    Ok(Json(json!({ "message": "Produção excluída", "rowCount": row_count })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse(qs: &str) -> FactListQuery {
        let uri: axum::http::Uri = format!("/producao?{}", qs).parse().unwrap();
        FactListQuery::from_pairs(&QueryPairs::from_uri(&uri))
    }

    #[test]
    fn accepts_from_to_and_legacy_names() {
        let q = parse("from=2024-01-01&to=2024-01-31");
        assert_eq!(q.date_range().from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(q.date_range().to, NaiveDate::from_ymd_opt(2024, 1, 31));

        let q = parse("de=2024-02-01&ate=2024-02-29");
        assert_eq!(q.date_range().from, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(q.date_range().to, NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn page_size_is_capped_at_200() {
        let q = parse("page=2&pageSize=1000");
        assert_eq!(q.pagination(), Pagination { page: 2, page_size: 200 });
    }

    #[test]
    fn garbage_filters_fall_back_to_defaults() {
        let q = parse("page=x&from=ontem");
        assert_eq!(q.pagination(), Pagination { page: 1, page_size: 50 });
        assert_eq!(q.date_range(), DateRange::default());
    }

    #[test]
    fn repeated_keys_and_alias_pairs_take_the_first() {
        let q = parse("from=2024-01-01&de=2024-01-02&page=3&page=9");
        assert_eq!(q.date_range().from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(q.pagination().page, 3);

        let q = parse("ate=2024-06-30&to=2024-01-31");
        assert_eq!(q.date_range().to, NaiveDate::from_ymd_opt(2024, 6, 30));
    }
}
