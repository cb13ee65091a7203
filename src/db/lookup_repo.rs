// src/db/lookup_repo.rs

use sqlx::{Executor, Postgres};
use crate::{
    common::error::AppError,
    models::lookups::{Family, Sector, Shift},
};

#[derive(Clone, Default)]
pub struct LookupRepository;

impl LookupRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list_shifts<'e, E>(&self, executor: E) -> Result<Vec<Shift>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, Shift>(
            "SELECT turnoid, turnonome, ativo FROM dim_turnos ORDER BY turnoid",
        )
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    pub async fn list_sectors<'e, E>(&self, executor: E) -> Result<Vec<Sector>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, Sector>(
            "SELECT setorid, setornome, ativo FROM dim_setores ORDER BY setorid",
        )
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    pub async fn list_families<'e, E>(&self, executor: E) -> Result<Vec<Family>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, Family>(
            "SELECT familiaid, familianome, sigla, ativo FROM dim_familias ORDER BY familiaid",
        )
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }
}
