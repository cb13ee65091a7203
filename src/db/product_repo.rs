// src/db/product_repo.rs

use sqlx::{Executor, PgConnection, Postgres, QueryBuilder};
use crate::{
    common::{error::AppError, params::{like_pattern, Pagination}},
    models::{
        product::{Product, ProductInput},
        production::ProductDimensions,
    },
};

const PRODUCT_COLUMNS: &str =
    "produtoid, codigo, descricao, familiaid, comprimento_m, largura_m, bitola_m, cubagem_m3, ativo";

#[derive(Clone, Default)]
pub struct ProductRepository;

impl ProductRepository {
    pub fn new() -> Self {
        Self
    }

    fn push_search<'a>(qb: &mut QueryBuilder<'a, Postgres>, search: Option<&str>) {
        if let Some(term) = search {
            let pattern = like_pattern(term);
            qb.push(" WHERE (codigo ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR descricao ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }

    /// Página de produtos, mais recentes primeiro, com o total do filtro.
    pub async fn list(
        &self,
        conn: &mut PgConnection,
        pagination: Pagination,
        search: Option<&str>,
    ) -> Result<(Vec<Product>, i64), AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM dim_produtos", PRODUCT_COLUMNS));
        Self::push_search(&mut qb, search);
        qb.push(" ORDER BY produtoid DESC LIMIT ")
            .push_bind(pagination.page_size)
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows = qb.build_query_as::<Product>().fetch_all(&mut *conn).await?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM dim_produtos");
        Self::push_search(&mut count, search);
        let total: i64 = count.build_query_scalar::<i64>().fetch_one(&mut *conn).await?;

        Ok((rows, total))
    }

    /// Medidas atuais, usadas para o snapshot da produção.
    pub async fn find_dimensions<'e, E>(
        &self,
        executor: E,
        id: i32,
    ) -> Result<Option<ProductDimensions>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let dims = sqlx::query_as::<_, ProductDimensions>(
            "SELECT comprimento_m, largura_m, bitola_m FROM dim_produtos WHERE produtoid = $1",
        )
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(dims)
    }

    pub async fn insert<'e, E>(&self, executor: E, input: &ProductInput) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO dim_produtos
                (codigo, descricao, familiaid, comprimento_m, largura_m, bitola_m, cubagem_m3, ativo)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING produtoid
            "#,
        )
            .bind(&input.codigo)
            .bind(&input.descricao)
            .bind(input.familia_id)
            .bind(input.comprimento_m)
            .bind(input.largura_m)
            .bind(input.bitola_m)
            .bind(input.cubagem_m3)
            .bind(&input.ativo)
            .fetch_one(executor)
            .await?;
        Ok(id)
    }

    pub async fn update<'e, E>(&self, executor: E, id: i32, input: &ProductInput) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE dim_produtos
               SET codigo = $1, descricao = $2, familiaid = $3, comprimento_m = $4,
                   largura_m = $5, bitola_m = $6, cubagem_m3 = $7, ativo = $8
             WHERE produtoid = $9
            "#,
        )
            .bind(&input.codigo)
            .bind(&input.descricao)
            .bind(input.familia_id)
            .bind(input.comprimento_m)
            .bind(input.largura_m)
            .bind(input.bitola_m)
            .bind(input.cubagem_m3)
            .bind(&input.ativo)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Exclusão incondicional: não verifica produção/descarte dependentes.
    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM dim_produtos WHERE produtoid = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
