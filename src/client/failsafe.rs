// src/client/failsafe.rs

use std::{panic, sync::Arc};

use crate::client::presenter::Presenter;

/// Rede de segurança do processo: todo pânico é registrado e fecha o
/// carregamento. O hook anterior continua sendo chamado depois.
pub fn install_failure_net(presenter: Arc<dyn Presenter>) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        tracing::error!("Erro não tratado: {}", info);
        presenter.show_loading(false);
        previous(info);
    }));
}
