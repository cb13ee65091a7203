// src/models/lookups.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Tabelas de dimensão: só leitura pela API, semeadas na inicialização.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Shift {
    pub turnoid: i32,
    #[schema(example = "Manhã")]
    pub turnonome: String,
    #[schema(example = "SIM")]
    pub ativo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Sector {
    pub setorid: i32,
    #[schema(example = "Geral")]
    pub setornome: String,
    pub ativo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Family {
    pub familiaid: i32,
    #[schema(example = "Padrão")]
    pub familianome: String,
    #[schema(example = "PAD")]
    pub sigla: Option<String>,
    pub ativo: Option<String>,
}
