// src/services/dashboard_service.rs

use sqlx::PgConnection;
use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::DashboardStats,
};

/// `(1 - descarte/produção) × 100` com 2 casas. Sem produção, 0.
pub fn efficiency(total_chapas: i64, total_descarte_chapas: i64) -> f64 {
    if total_chapas <= 0 {
        return 0.0;
    }
    let ratio = total_descarte_chapas as f64 / total_chapas as f64;
    ((1.0 - ratio) * 100.0 * 100.0).round() / 100.0
}

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn get_stats(&self, conn: &mut PgConnection) -> Result<DashboardStats, AppError> {
        let totals = self.repo.totals(&mut *conn).await?;
        let producao_por_turno = self.repo.volume_by_shift(&mut *conn).await?;
        let evolucao_producao = self.repo.daily_volume(&mut *conn).await?;

        Ok(DashboardStats {
            total_produtos: totals.total_produtos,
            total_producao_m3: totals.total_producao_m3,
            total_descarte_chapas: totals.total_descarte_chapas,
            eficiencia: efficiency(totals.total_chapas, totals.total_descarte_chapas),
            producao_por_turno,
            evolucao_producao,
        })
    }
}
