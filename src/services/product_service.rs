// src/services/product_service.rs

use sqlx::PgConnection;
use crate::{
    common::{error::AppError, params::Pagination},
    db::ProductRepository,
    models::{
        page::Page,
        product::{Product, ProductInput, ProductPayload},
    },
};

/// Cubagem final: a informada, ou comprimento × largura × bitola.
/// Nunca rejeita: valor não finito ou negativo vira 0.
pub fn compute_volume(comprimento: f64, largura: f64, bitola: f64, informada: Option<f64>) -> f64 {
    let base = informada.unwrap_or(comprimento * largura * bitola);
    if base.is_finite() && base >= 0.0 { base } else { 0.0 }
}

impl ProductPayload {
    /// Converte o payload já validado no registro a gravar.
    pub fn into_input(self) -> ProductInput {
        let comprimento_m = self.comprimento_m.unwrap_or_default();
        let largura_m = self.largura_m.unwrap_or_default();
        let bitola_m = self.bitola_m.unwrap_or_default();

        ProductInput {
            cubagem_m3: compute_volume(comprimento_m, largura_m, bitola_m, self.cubagem_m3),
            codigo: self.codigo.unwrap_or_default(),
            descricao: self.descricao.unwrap_or_default(),
            familia_id: self.familia_id.unwrap_or_default(),
            comprimento_m,
            largura_m,
            bitola_m,
            ativo: self
                .ativo
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| "SIM".to_string()),
        }
    }
}

#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
}

impl ProductService {
    pub fn new(repo: ProductRepository) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        conn: &mut PgConnection,
        pagination: Pagination,
        search: Option<&str>,
    ) -> Result<Page<Product>, AppError> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let (rows, total) = self.repo.list(conn, pagination, search).await?;
        Ok(Page::new(pagination, total, rows))
    }

    pub async fn create(&self, conn: &mut PgConnection, payload: ProductPayload) -> Result<i32, AppError> {
        let input = payload.into_input();
        let id = self.repo.insert(&mut *conn, &input).await?;
        tracing::info!(produtoid = id, codigo = %input.codigo, cubagem_m3 = input.cubagem_m3, "Produto criado");
        Ok(id)
    }

    pub async fn update(&self, conn: &mut PgConnection, id: i32, payload: ProductPayload) -> Result<u64, AppError> {
        let input = payload.into_input();
        self.repo.update(&mut *conn, id, &input).await
    }

    pub async fn delete(&self, conn: &mut PgConnection, id: i32) -> Result<u64, AppError> {
        self.repo.delete(&mut *conn, id).await
    }
}
