// src/db/scrap_repo.rs

use sqlx::{Executor, PgConnection, Postgres, QueryBuilder};
use crate::{
    common::{error::AppError, params::{DateRange, Pagination}},
    db::filters::push_date_range,
    models::scrap::{NewScrap, ScrapRecord},
};

#[derive(Clone, Default)]
pub struct ScrapRepository;

impl ScrapRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list(
        &self,
        conn: &mut PgConnection,
        pagination: Pagination,
        range: &DateRange,
    ) -> Result<(Vec<ScrapRecord>, i64), AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT d.descarteid, d.data, d.turnoid, d.setorid, d.produtoid, d.tipo_descarte,
                   d.quantidade_chapas, d.obs,
                   t.turnonome, s.setornome, pr.descricao AS produtodescricao, pr.codigo
              FROM fact_descarte d
         LEFT JOIN dim_turnos t    ON t.turnoid    = d.turnoid
         LEFT JOIN dim_setores s   ON s.setorid    = d.setorid
         LEFT JOIN dim_produtos pr ON pr.produtoid = d.produtoid
            "#,
        );
        push_date_range(&mut qb, "d", range);
        qb.push(" ORDER BY d.data DESC, d.descarteid DESC LIMIT ")
            .push_bind(pagination.page_size)
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows = qb
            .build_query_as::<ScrapRecord>()
            .fetch_all(&mut *conn)
            .await?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM fact_descarte d");
        push_date_range(&mut count, "d", range);
        let total = count.build_query_scalar::<i64>().fetch_one(&mut *conn).await?;

        Ok((rows, total))
    }

    /// Sem consulta auxiliar: as referências são checadas pelas FKs do banco.
    pub async fn insert<'e, E>(&self, executor: E, row: &NewScrap) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO fact_descarte
                (data, turnoid, setorid, produtoid, tipo_descarte, quantidade_chapas, obs)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING descarteid
            "#,
        )
            .bind(row.data)
            .bind(row.turno_id)
            .bind(row.setor_id)
            .bind(row.produto_id)
            .bind(&row.tipo_descarte)
            .bind(row.quantidade_chapas)
            .bind(&row.obs)
            .fetch_one(executor)
            .await?;
        Ok(id)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM fact_descarte WHERE descarteid = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
