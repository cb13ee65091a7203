// src/models/production.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::params::{lenient_date, lenient_number};

// --- Produção (fato) ---
// As medidas são uma cópia das do produto no momento do registro:
// editar o produto depois não muda o histórico.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProductionRecord {
    pub producaoid: i32,
    pub data: NaiveDate,
    pub turnoid: i32,
    pub setorid: i32,
    pub produtoid: i32,
    pub quantidade_chapas: i32,
    pub comprimento_m: Option<f64>,
    pub largura_m: Option<f64>,
    pub bitola_m: Option<f64>,
    pub cubagem_m3: Option<f64>,

    // Vindos dos LEFT JOINs (podem faltar se a dimensão sumiu)
    pub turnonome: Option<String>,
    pub setornome: Option<String>,
    pub produtodescricao: Option<String>,
    pub codigo: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductionPayload {
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
    #[schema(value_type = Option<i32>, example = 120)]
    pub quantidade_chapas: Option<i32>,
}

/// Linha pronta para inserir, já com o snapshot das medidas.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduction {
    pub data: NaiveDate,
    pub turno_id: i32,
    pub setor_id: i32,
    pub produto_id: i32,
    pub quantidade_chapas: i32,
    pub comprimento_m: f64,
    pub largura_m: f64,
    pub bitola_m: f64,
    pub cubagem_m3: f64,
}

/// Medidas atuais do produto, lidas no momento do registro.
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct ProductDimensions {
    pub comprimento_m: f64,
    pub largura_m: f64,
    pub bitola_m: f64,
}
