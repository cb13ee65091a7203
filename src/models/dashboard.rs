// src/models/dashboard.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// 1. Indicadores gerais (os cards do topo)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_produtos: i64,
    pub total_producao_m3: f64,
    pub total_descarte_chapas: i64,
    /// Percentual com 2 casas; 0 quando não há produção.
    pub eficiencia: f64,
    pub producao_por_turno: Vec<ShiftVolume>,
    pub evolucao_producao: Vec<DailyVolume>,
}

// 2. Volume por turno (inclui turnos sem produção)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ShiftVolume {
    pub turnonome: String,
    pub total: f64,
}

// 3. Evolução diária (últimas 14 datas com produção)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DailyVolume {
    pub data: NaiveDate,
    pub total: f64,
}

/// Somatórios brutos, antes de derivar a eficiência.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub total_produtos: i64,
    pub total_producao_m3: f64,
    pub total_chapas: i64,
    pub total_descarte_chapas: i64,
}
