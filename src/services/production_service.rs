// src/services/production_service.rs

use sqlx::PgConnection;
use crate::{
    common::{
        error::AppError,
        params::{DateRange, Pagination},
    },
    db::{ProductRepository, ProductionRepository},
    models::{
        page::Page,
        production::{CreateProductionPayload, NewProduction, ProductDimensions, ProductionRecord},
    },
    services::product_service::compute_volume,
};

/// Monta a linha de produção copiando as medidas atuais do produto.
/// A cubagem gravada é a cubagem unitária (sanitizada) vezes as chapas.
pub fn snapshot(payload: &CreateProductionPayload, dims: ProductDimensions) -> NewProduction {
    let chapas = payload.quantidade_chapas.unwrap_or_default();
    let unitaria = compute_volume(dims.comprimento_m, dims.largura_m, dims.bitola_m, None);

    NewProduction {
        data: payload.data.unwrap_or_default(),
        turno_id: payload.turno_id.unwrap_or_default(),
        setor_id: payload.setor_id.unwrap_or_default(),
        produto_id: payload.produto_id.unwrap_or_default(),
        quantidade_chapas: chapas,
        comprimento_m: dims.comprimento_m,
        largura_m: dims.largura_m,
        bitola_m: dims.bitola_m,
        cubagem_m3: unitaria * f64::from(chapas),
    }
}

#[derive(Clone)]
pub struct ProductionService {
    production_repo: ProductionRepository,
    product_repo: ProductRepository,
}

impl ProductionService {
    pub fn new(production_repo: ProductionRepository, product_repo: ProductRepository) -> Self {
        Self { production_repo, product_repo }
    }

    pub async fn list(
        &self,
        conn: &mut PgConnection,
        pagination: Pagination,
        range: &DateRange,
    ) -> Result<Page<ProductionRecord>, AppError> {
        let (rows, total) = self.production_repo.list(conn, pagination, range).await?;
        Ok(Page::new(pagination, total, rows))
    }

    /// O produto precisa existir: sem ele não há medidas para o snapshot.
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        payload: &CreateProductionPayload,
    ) -> Result<i32, AppError> {
        let produto_id = payload.produto_id.unwrap_or_default();
        let dims = self
            .product_repo
            .find_dimensions(&mut *conn, produto_id)
            .await?
            .ok_or(AppError::InvalidProduct)?;

        let row = snapshot(payload, dims);
        let id = self.production_repo.insert(&mut *conn, &row).await?;
        tracing::info!(producaoid = id, produtoid = row.produto_id, cubagem_m3 = row.cubagem_m3, "Produção registrada");
        Ok(id)
    }

    pub async fn delete(&self, conn: &mut PgConnection, id: i32) -> Result<u64, AppError> {
        self.production_repo.delete(&mut *conn, id).await
    }
}
