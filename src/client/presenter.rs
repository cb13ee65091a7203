// src/client/presenter.rs

use std::{sync::Arc, time::Duration};
use tokio::task::JoinHandle;

use crate::models::{
    dashboard::DashboardStats,
    lookups::{Sector, Shift},
    page::Page,
    product::Product,
    production::ProductionRecord,
};

pub const FAILSAFE_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// Dados prontos para a tela, um por tarefa de sincronização.
#[derive(Debug, Clone)]
pub enum ViewUpdate {
    Dashboard(DashboardStats),
    Products(Page<Product>),
    Shifts(Vec<Shift>),
    Sectors(Vec<Sector>),
    RecentProduction(Page<ProductionRecord>),
}

/// Camada de apresentação. Implementações não devem entrar em pânico:
/// `show_loading(false)` também é chamado de dentro do hook de pânico.
pub trait Presenter: Send + Sync {
    fn show_loading(&self, visible: bool);
    fn set_status(&self, status: ConnectionStatus);
    fn notify(&self, kind: NoticeKind, message: &str);
    fn apply(&self, update: ViewUpdate);
}

/// Mostra o carregamento ao nascer e esconde ao sair de escopo,
/// seja qual for o caminho de saída.
pub struct LoadingGuard {
    presenter: Arc<dyn Presenter>,
}

impl LoadingGuard {
    pub fn show(presenter: Arc<dyn Presenter>) -> Self {
        presenter.show_loading(true);
        Self { presenter }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.presenter.show_loading(false);
    }
}

/// Segunda garantia: esconde de novo depois de `delay`.
pub fn schedule_failsafe_hide(presenter: Arc<dyn Presenter>, delay: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        presenter.show_loading(false);
    })
}
