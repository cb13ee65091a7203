// src/client/connector.rs

use serde_json::Value;
use std::{sync::Arc, time::Duration};

use crate::client::{
    api::ApiClient,
    chart::ChartRenderer,
    presenter::{schedule_failsafe_hide, ConnectionStatus, LoadingGuard, NoticeKind, Presenter, FAILSAFE_DELAY},
    sync::{run_all_settled, SyncContext, SyncReport, SyncTask},
    tasks::default_tasks,
};

/// Resultado de uma conexão. `connect` sempre devolve um destes, nunca erro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectReport {
    pub connected: bool,
    pub message: String,
    pub sync: SyncReport,
}

pub struct Connector {
    ctx: Arc<SyncContext>,
    tasks: Vec<Arc<dyn SyncTask>>,
    failsafe_delay: Duration,
}

impl Connector {
    pub fn new(client: ApiClient, presenter: Arc<dyn Presenter>, chart: Arc<dyn ChartRenderer>) -> Self {
        Self {
            ctx: Arc::new(SyncContext { client, presenter, chart }),
            tasks: default_tasks(),
            failsafe_delay: FAILSAFE_DELAY,
        }
    }

    pub fn with_tasks(mut self, tasks: Vec<Arc<dyn SyncTask>>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_failsafe_delay(mut self, delay: Duration) -> Self {
        self.failsafe_delay = delay;
        self
    }

    /// Ping, depois sincronização em paralelo. O carregamento some ao fim
    /// (guarda) e de novo após o atraso de segurança.
    pub async fn connect(&self) -> ConnectReport {
        let presenter = Arc::clone(&self.ctx.presenter);
        presenter.set_status(ConnectionStatus::Connecting);

        let report = {
            let _loading = LoadingGuard::show(Arc::clone(&presenter));
            self.ping_and_sync().await
        };

        schedule_failsafe_hide(presenter, self.failsafe_delay);
        report
    }

    async fn ping_and_sync(&self) -> ConnectReport {
        let presenter = &self.ctx.presenter;

        let ping: Value = match self.ctx.client.get("/test-connection").await {
            Ok(ping) => ping,
            Err(e) => {
                tracing::error!(base_url = %self.ctx.client.config().base_url, "Falha na conexão: {}", e);
                presenter.set_status(ConnectionStatus::Disconnected);
                presenter.notify(NoticeKind::Error, &format!("Falha na conexão: {}", e));
                return ConnectReport {
                    connected: false,
                    message: e.to_string(),
                    sync: SyncReport::default(),
                };
            }
        };

        let message = ping
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("ok")
            .to_string();
        presenter.set_status(ConnectionStatus::Connected);
        presenter.notify(NoticeKind::Success, &format!("Conectado: {}", message));

        let sync = run_all_settled(Arc::clone(&self.ctx), &self.tasks).await;
        if sync.failed() > 0 {
            tracing::warn!(falhas = sync.failed(), sucessos = sync.succeeded(), "Sincronização parcial");
        }

        ConnectReport { connected: true, message, sync }
    }
}
