// src/db/schema.rs

use sqlx::PgPool;

const SCHEMA_DDL: &str = include_str!("../../sql/schema.sql");

// Cada seed só insere se a tabela estiver vazia: reiniciar o serviço
// nunca sobrescreve dados cadastrados pelo operador.
const SEEDS: &[(&str, &str)] = &[
    (
        "dim_turnos",
        "INSERT INTO dim_turnos (turnonome)
         SELECT 'Manhã'
         WHERE NOT EXISTS (SELECT 1 FROM dim_turnos)",
    ),
    (
        "dim_setores",
        "INSERT INTO dim_setores (setornome)
         SELECT 'Geral'
         WHERE NOT EXISTS (SELECT 1 FROM dim_setores)",
    ),
    (
        "dim_familias",
        "INSERT INTO dim_familias (familianome, sigla)
         SELECT 'Padrão', 'PAD'
         WHERE NOT EXISTS (SELECT 1 FROM dim_familias)",
    ),
    (
        "dim_produtos",
        "INSERT INTO dim_produtos
             (codigo, descricao, familiaid, comprimento_m, largura_m, bitola_m, cubagem_m3, ativo)
         SELECT 'P001', 'Produto Padrão', (SELECT MIN(familiaid) FROM dim_familias),
                2.5, 1.25, 0.015, (2.5 * 1.25 * 0.015), 'SIM'
         WHERE NOT EXISTS (SELECT 1 FROM dim_produtos)",
    ),
];

/// Cria as tabelas (se não existirem) e garante uma linha padrão em cada dimensão.
pub async fn bootstrap(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA_DDL).execute(pool).await?;

    for (table, seed) in SEEDS {
        let inserted = sqlx::query(seed).execute(pool).await?.rows_affected();
        if inserted > 0 {
            tracing::info!(table, "🌱 Registro padrão criado");
        }
    }

    tracing::info!("✅ Esquema do banco verificado com sucesso!");
    Ok(())
}
