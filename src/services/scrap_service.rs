// src/services/scrap_service.rs

use sqlx::PgConnection;
use crate::{
    common::{
        error::AppError,
        params::{DateRange, Pagination},
    },
    db::ScrapRepository,
    models::{
        page::Page,
        scrap::{CreateScrapPayload, NewScrap, ScrapRecord},
    },
};

impl CreateScrapPayload {
    /// Converte o payload já validado. Texto ausente vira string vazia.
    pub fn into_new(self) -> NewScrap {
        NewScrap {
            data: self.data.unwrap_or_default(),
            turno_id: self.turno_id.unwrap_or_default(),
            setor_id: self.setor_id.unwrap_or_default(),
            produto_id: self.produto_id.unwrap_or_default(),
            tipo_descarte: self.tipo_descarte.unwrap_or_default(),
            quantidade_chapas: self.quantidade_chapas.unwrap_or_default(),
            obs: self.obs.unwrap_or_default(),
        }
    }
}

#[derive(Clone)]
pub struct ScrapService {
    repo: ScrapRepository,
}

impl ScrapService {
    pub fn new(repo: ScrapRepository) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        conn: &mut PgConnection,
        pagination: Pagination,
        range: &DateRange,
    ) -> Result<Page<ScrapRecord>, AppError> {
        let (rows, total) = self.repo.list(conn, pagination, range).await?;
        Ok(Page::new(pagination, total, rows))
    }

    /// Turno, setor e produto são conferidos pelas FKs na gravação.
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        payload: CreateScrapPayload,
    ) -> Result<i32, AppError> {
        let row = payload.into_new();
        let id = self.repo.insert(&mut *conn, &row).await?;
        tracing::info!(descarteid = id, produtoid = row.produto_id, chapas = row.quantidade_chapas, "Descarte registrado");
        Ok(id)
    }

    pub async fn delete(&self, conn: &mut PgConnection, id: i32) -> Result<u64, AppError> {
        self.repo.delete(&mut *conn, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn payload_becomes_a_row_with_empty_texts() {
        let payload: CreateScrapPayload = serde_json::from_str(
            r#"{"Data": "2024-05-10", "TurnoID": "2", "SetorID": 3, "ProdutoID": 4, "Quantidade_Chapas": "6"}"#,
        )
        .unwrap();

        let row = payload.into_new();
        assert_eq!(row.data, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        assert_eq!((row.turno_id, row.setor_id, row.produto_id), (2, 3, 4));
        assert_eq!(row.quantidade_chapas, 6);
        assert_eq!(row.tipo_descarte, "");
        assert_eq!(row.obs, "");
    }

    #[test]
    fn texts_are_kept_as_sent() {
        let payload: CreateScrapPayload = serde_json::from_str(
            r#"{"Data": "2024-05-10", "TurnoID": 1, "SetorID": 1, "ProdutoID": 1,
                "Quantidade_Chapas": 1, "Tipo_Descarte": "Delaminação", "Obs": "lote 7"}"#,
        )
        .unwrap();

        let row = payload.into_new();
        assert_eq!(row.tipo_descarte, "Delaminação");
        assert_eq!(row.obs, "lote 7");
    }
}
