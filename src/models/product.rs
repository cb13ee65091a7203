// src/models/product.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::params::{lenient_number, lossy_f64};

// --- Produto (catálogo) ---
// As medidas são em metros; a cubagem em m³.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub produtoid: i32,
    #[schema(example = "P001")]
    pub codigo: String,
    #[schema(example = "Compensado 15mm")]
    pub descricao: String,
    pub familiaid: i32,
    #[schema(example = 2.5)]
    pub comprimento_m: f64,
    #[schema(example = 1.25)]
    pub largura_m: f64,
    #[schema(example = 0.015)]
    pub bitola_m: f64,
    pub cubagem_m3: Option<f64>,
    pub ativo: Option<String>,
}

/// Corpo de criação e de atualização de produto (mesmos campos e regras).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[serde(rename = "Codigo")]
    #[validate(required(message = "O campo 'Codigo' é obrigatório."), length(min = 1, message = "O campo 'Codigo' é obrigatório."))]
    #[schema(example = "P002")]
    pub codigo: Option<String>,

    #[serde(rename = "Descricao")]
    #[validate(required(message = "O campo 'Descricao' é obrigatório."), length(min = 1, message = "O campo 'Descricao' é obrigatório."))]
    #[schema(example = "Compensado 18mm")]
    pub descricao: Option<String>,

    #[serde(rename = "FamiliaID", default, deserialize_with = "lenient_number")]
    #[validate(required(message = "O campo 'FamiliaID' é obrigatório."), range(min = 1, message = "FamiliaID inválido."))]
    #[schema(value_type = Option<i32>, example = 1)]
    pub familia_id: Option<i32>,

    #[serde(rename = "Comprimento_m", default, deserialize_with = "lenient_number")]
    #[validate(required(message = "O campo 'Comprimento_m' é obrigatório."))]
    #[schema(value_type = Option<f64>, example = 2.2)]
    pub comprimento_m: Option<f64>,

    #[serde(rename = "Largura_m", default, deserialize_with = "lenient_number")]
    #[validate(required(message = "O campo 'Largura_m' é obrigatório."))]
    #[schema(value_type = Option<f64>, example = 1.6)]
    pub largura_m: Option<f64>,

    #[serde(rename = "Bitola_m", default, deserialize_with = "lenient_number")]
    #[validate(required(message = "O campo 'Bitola_m' é obrigatório."))]
    #[schema(value_type = Option<f64>, example = 0.018)]
    pub bitola_m: Option<f64>,

    /// Sobrescreve a cubagem calculada. Valores ilegíveis ou negativos viram 0.
    #[serde(rename = "Cubagem_m3", default, deserialize_with = "lossy_f64")]
    #[schema(value_type = Option<f64>)]
    pub cubagem_m3: Option<f64>,

    #[serde(rename = "Ativo")]
    #[schema(example = "SIM")]
    pub ativo: Option<String>,
}

/// Produto já validado, pronto para o banco.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub codigo: String,
    pub descricao: String,
    pub familia_id: i32,
    pub comprimento_m: f64,
    pub largura_m: f64,
    pub bitola_m: f64,
    pub cubagem_m3: f64,
    pub ativo: String,
}
