// src/models/scrap.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::params::{lenient_date, lenient_number};

// --- Descarte (fato) ---
// Contabilizado só em chapas, sem cubagem.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScrapRecord {
    pub descarteid: i32,
    pub data: NaiveDate,
    pub turnoid: i32,
    pub setorid: i32,
    pub produtoid: i32,
    pub tipo_descarte: Option<String>,
    pub quantidade_chapas: i32,
    pub obs: Option<String>,

    pub turnonome: Option<String>,
    pub setornome: Option<String>,
    pub produtodescricao: Option<String>,
    pub codigo: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateScrapPayload {
    #[serde(rename = "Data", default, deserialize_with = "lenient_date")]
    #[validate(required(message = "O campo 'Data' é obrigatório."))]
    #[schema(value_type = Option<String>, example = "2024-03-15")]
    pub data: Option<NaiveDate>,

    #[serde(rename = "TurnoID", default, deserialize_with = "lenient_number")]
    #[validate(required(message = "O campo 'TurnoID' é obrigatório."), range(min = 1, message = "TurnoID inválido."))]
    #[schema(value_type = Option<i32>, example = 1)]
    pub turno_id: Option<i32>,

    #[serde(rename = "SetorID", default, deserialize_with = "lenient_number")]
    #[validate(required(message = "O campo 'SetorID' é obrigatório."), range(min = 1, message = "SetorID inválido."))]
    #[schema(value_type = Option<i32>, example = 1)]
    pub setor_id: Option<i32>,

    #[serde(rename = "ProdutoID", default, deserialize_with = "lenient_number")]
    #[validate(required(message = "O campo 'ProdutoID' é obrigatório."), range(min = 1, message = "ProdutoID inválido."))]
    #[schema(value_type = Option<i32>, example = 1)]
    pub produto_id: Option<i32>,

    #[serde(rename = "Quantidade_Chapas", default, deserialize_with = "lenient_number")]
    #[validate(required(message = "O campo 'Quantidade_Chapas' é obrigatório."), range(min = 0, message = "A quantidade não pode ser negativa."))]
    #[schema(value_type = Option<i32>, example = 4)]
    pub quantidade_chapas: Option<i32>,

    #[serde(rename = "Tipo_Descarte", default)]
    #[schema(example = "Delaminação")]
    pub tipo_descarte: Option<String>,

    #[serde(rename = "Obs", default)]
    pub obs: Option<String>,
}

/// Linha pronta para gravar em `fact_descarte`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewScrap {
    pub data: NaiveDate,
    pub turno_id: i32,
    pub setor_id: i32,
    pub produto_id: i32,
    pub tipo_descarte: String,
    pub quantidade_chapas: i32,
    pub obs: String,
}
