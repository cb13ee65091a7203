// src/db/production_repo.rs

use sqlx::{Executor, PgConnection, Postgres, QueryBuilder};
use crate::{
    common::{error::AppError, params::{DateRange, Pagination}},
    db::filters::push_date_range,
    models::production::{NewProduction, ProductionRecord},
};

#[derive(Clone, Default)]
pub struct ProductionRepository;

impl ProductionRepository {
    pub fn new() -> Self {
        Self
    }

    /// Lista por (data desc, id desc): o id desempata para a paginação
    /// ficar estável entre páginas com a mesma data.
    pub async fn list(
        &self,
        conn: &mut PgConnection,
        pagination: Pagination,
        range: &DateRange,
    ) -> Result<(Vec<ProductionRecord>, i64), AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT p.producaoid, p.data, p.turnoid, p.setorid, p.produtoid, p.quantidade_chapas,
                   p.comprimento_m, p.largura_m, p.bitola_m, p.cubagem_m3,
                   t.turnonome, s.setornome, pr.descricao AS produtodescricao, pr.codigo
              FROM fact_producao p
         LEFT JOIN dim_turnos t    ON t.turnoid    = p.turnoid
         LEFT JOIN dim_setores s   ON s.setorid    = p.setorid
         LEFT JOIN dim_produtos pr ON pr.produtoid = p.produtoid
            "#,
        );
        push_date_range(&mut qb, "p", range);
        qb.push(" ORDER BY p.data DESC, p.producaoid DESC LIMIT ")
            .push_bind(pagination.page_size)
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows = qb
            .build_query_as::<ProductionRecord>()
            .fetch_all(&mut *conn)
            .await?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM fact_producao p");
        push_date_range(&mut count, "p", range);
        let total = count.build_query_scalar::<i64>().fetch_one(&mut *conn).await?;

        Ok((rows, total))
    }

    pub async fn insert<'e, E>(&self, executor: E, row: &NewProduction) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO fact_producao
                (data, turnoid, setorid, produtoid, quantidade_chapas,
                 comprimento_m, largura_m, bitola_m, cubagem_m3)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING producaoid
            "#,
        )
            .bind(row.data)
            .bind(row.turno_id)
            .bind(row.setor_id)
            .bind(row.produto_id)
            .bind(row.quantidade_chapas)
            .bind(row.comprimento_m)
            .bind(row.largura_m)
            .bind(row.bitola_m)
            .bind(row.cubagem_m3)
            .fetch_one(executor)
            .await?;
        Ok(id)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM fact_producao WHERE producaoid = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
