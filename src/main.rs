//src/main.rs

use std::net::SocketAddr;
use anyhow::Context;
use tokio::net::TcpListener;

use nm_producao::{
    app::build_router,
    common::{db_utils::connect_pool, logging::init_tracing},
    config::{AppConfig, AppState},
    db::schema,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Sem URL de banco não há o que servir: a configuração falha antes do log.
    let config = AppConfig::from_env().context("Configuração inválida")?;
    init_tracing(config.log_format);

    let pool = connect_pool(&config)
        .await
        .context("Falha ao conectar no banco de dados")?;

    schema::bootstrap(&pool)
        .await
        .context("Falha ao preparar o schema do banco")?;

    let port = config.port;
    let app_state = AppState::new(config, pool.clone());
    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {}", addr))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Erro no servidor Axum")?;

    pool.close().await;
    tracing::info!("👋 Servidor encerrado");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Falha ao escutar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Falha ao escutar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Sinal de desligamento recebido");
}
