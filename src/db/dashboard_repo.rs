// src/db/dashboard_repo.rs

use sqlx::PgConnection;
use crate::{
    common::error::AppError,
    models::dashboard::{DailyVolume, ShiftVolume, Totals},
};

#[derive(Clone, Default)]
pub struct DashboardRepository;

impl DashboardRepository {
    pub fn new() -> Self {
        Self
    }

    // 1. Somatórios gerais (sem transação: cada consulta é atômica por si)
    pub async fn totals(&self, conn: &mut PgConnection) -> Result<Totals, AppError> {
        let total_produtos: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dim_produtos")
            .fetch_one(&mut *conn)
            .await?;

        let total_producao_m3: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(cubagem_m3), 0)::float8 FROM fact_producao",
        )
            .fetch_one(&mut *conn)
            .await?;

        let total_chapas: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(quantidade_chapas), 0)::bigint FROM fact_producao",
        )
            .fetch_one(&mut *conn)
            .await?;

        let total_descarte_chapas: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(quantidade_chapas), 0)::bigint FROM fact_descarte",
        )
            .fetch_one(&mut *conn)
            .await?;

        Ok(Totals {
            total_produtos,
            total_producao_m3,
            total_chapas,
            total_descarte_chapas,
        })
    }

    // 2. Volume por turno; LEFT JOIN mantém turnos sem produção (total 0)
    pub async fn volume_by_shift(&self, conn: &mut PgConnection) -> Result<Vec<ShiftVolume>, AppError> {
        let rows = sqlx::query_as::<_, ShiftVolume>(
            r#"
            SELECT t.turnonome, COALESCE(SUM(p.cubagem_m3), 0)::float8 AS total
              FROM dim_turnos t
         LEFT JOIN fact_producao p ON p.turnoid = t.turnoid
          GROUP BY t.turnoid, t.turnonome
          ORDER BY t.turnoid
            "#,
        )
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }

    // 3. Série diária: as 14 datas mais recentes com produção
    pub async fn daily_volume(&self, conn: &mut PgConnection) -> Result<Vec<DailyVolume>, AppError> {
        let rows = sqlx::query_as::<_, DailyVolume>(
            r#"
            SELECT data, COALESCE(SUM(cubagem_m3), 0)::float8 AS total
              FROM fact_producao
          GROUP BY data
          ORDER BY data DESC
             LIMIT 14
            "#,
        )
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }
}
