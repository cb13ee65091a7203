// src/client/tasks.rs

use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    client::{
        api::ClientError,
        presenter::{NoticeKind, ViewUpdate},
        sync::{SyncContext, SyncTask},
    },
    models::{
        dashboard::DashboardStats,
        lookups::{Sector, Shift},
        page::Page,
        product::Product,
        production::ProductionRecord,
    },
};

pub struct DashboardTask;

#[async_trait]
impl SyncTask for DashboardTask {
    fn name(&self) -> &'static str {
        "dashboard"
    }

    async fn run(&self, ctx: &SyncContext) -> Result<(), ClientError> {
        let stats: DashboardStats = match ctx.client.get("/dashboard-stats").await {
            Ok(stats) => stats,
            Err(e) => {
                ctx.presenter.notify(NoticeKind::Error, &format!("Erro no dashboard: {}", e));
                return Err(e);
            }
        };
        ctx.presenter.apply(ViewUpdate::Dashboard(stats.clone()));

        if !ctx.chart.available() {
            tracing::warn!("Gráficos indisponíveis: pulando gráficos.");
            return Ok(());
        }

        let (labels, values): (Vec<String>, Vec<f64>) = stats
            .producao_por_turno
            .iter()
            .map(|r| (r.turnonome.clone(), r.total))
            .unzip();
        ctx.chart.bar("m³ por turno", &labels, &values);

        // Chega em ordem decrescente; o gráfico lê melhor do mais antigo ao mais novo.
        let (labels, values): (Vec<String>, Vec<f64>) = stats
            .evolucao_producao
            .iter()
            .rev()
            .map(|r| (r.data.format("%d/%m").to_string(), r.total))
            .unzip();
        ctx.chart.line("m³ (últimos dias)", &labels, &values);
        Ok(())
    }
}

pub struct ProductsTask;

#[async_trait]
impl SyncTask for ProductsTask {
    fn name(&self) -> &'static str {
        "produtos"
    }

    async fn run(&self, ctx: &SyncContext) -> Result<(), ClientError> {
        let page: Page<Product> = ctx.client.get("/produtos?page=1&pageSize=100").await?;
        ctx.presenter.apply(ViewUpdate::Products(page));
        Ok(())
    }
}

pub struct ShiftsTask;

#[async_trait]
impl SyncTask for ShiftsTask {
    fn name(&self) -> &'static str {
        "turnos"
    }

    async fn run(&self, ctx: &SyncContext) -> Result<(), ClientError> {
        let rows: Vec<Shift> = ctx.client.get("/turnos").await?;
        ctx.presenter.apply(ViewUpdate::Shifts(rows));
        Ok(())
    }
}

pub struct SectorsTask;

#[async_trait]
impl SyncTask for SectorsTask {
    fn name(&self) -> &'static str {
        "setores"
    }

    async fn run(&self, ctx: &SyncContext) -> Result<(), ClientError> {
        let rows: Vec<Sector> = ctx.client.get("/setores").await?;
        ctx.presenter.apply(ViewUpdate::Sectors(rows));
        Ok(())
    }
}

/// Últimos lançamentos de produção (a tela de consulta).
pub struct RecentProductionTask;

#[async_trait]
impl SyncTask for RecentProductionTask {
    fn name(&self) -> &'static str {
        "consulta"
    }

    async fn run(&self, ctx: &SyncContext) -> Result<(), ClientError> {
        let page: Page<ProductionRecord> = ctx.client.get("/producao?page=1&pageSize=50").await?;
        ctx.presenter.apply(ViewUpdate::RecentProduction(page));
        Ok(())
    }
}

pub fn default_tasks() -> Vec<Arc<dyn SyncTask>> {
    vec![
        Arc::new(DashboardTask),
        Arc::new(ProductsTask),
        Arc::new(ShiftsTask),
        Arc::new(SectorsTask),
        Arc::new(RecentProductionTask),
    ]
}
