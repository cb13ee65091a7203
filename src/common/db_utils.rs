use sqlx::{
    pool::PoolConnection,
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
    PgPool, Postgres,
};
use std::{str::FromStr, time::Duration};

use crate::common::error::AppError;
use crate::config::{AppConfig, AppState};

// ---
// Helper de conexão: o único ponto de entrada para o banco
// ---
/// Adquire uma conexão da pool. Ela volta para a pool quando sai de escopo,
/// então nenhum handler consegue vazar conexão, mesmo retornando erro.
pub(crate) async fn get_connection(
    app_state: &AppState,
) -> Result<PoolConnection<Postgres>, AppError> {
    app_state.db_pool.acquire().await.map_err(|e| {
        tracing::error!("🔥 Falha ao obter conexão da pool: {}", e);
        AppError::DatabaseError(e)
    })
}

/// Bancos fora da máquina local (Railway e afins) exigem TLS.
pub fn requires_tls(database_url: &str) -> bool {
    let lower = database_url.to_ascii_lowercase();
    !(lower.contains("localhost") || lower.contains("127.0.0.1"))
}

pub fn connect_options(config: &AppConfig) -> Result<PgConnectOptions, sqlx::Error> {
    let options = PgConnectOptions::from_str(&config.database_url)?;
    if requires_tls(&config.database_url) {
        // `Require` cifra sem validar o certificado.
        Ok(options.ssl_mode(PgSslMode::Require))
    } else {
        Ok(options)
    }
}

fn pool_options(config: &AppConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.pool_max)
        .idle_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(10))
}

/// Conecta de imediato: se o banco não responder, a aplicação não sobe.
pub async fn connect_pool(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let pool = pool_options(config)
        .connect_with(connect_options(config)?)
        .await?;
    tracing::info!(
        max_connections = config.pool_max,
        "✅ Conexão com o banco de dados estabelecida com sucesso!"
    );
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_urls_skip_tls() {
        assert!(!requires_tls("postgres://user:pw@localhost:5432/nm"));
        assert!(!requires_tls("postgres://user:pw@127.0.0.1/nm"));
        assert!(requires_tls("postgres://user:pw@containers.railway.app:6543/railway"));
    }
}
