// Binário de teste próprio: o hook de pânico é global ao processo.

use std::sync::{Arc, Mutex};

use nm_producao::client::{install_failure_net, ConnectionStatus, NoticeKind, Presenter, ViewUpdate};

#[derive(Default)]
struct LoadingProbe {
    hidden: Mutex<u32>,
}

impl Presenter for LoadingProbe {
    fn show_loading(&self, visible: bool) {
        if !visible {
            *self.hidden.lock().unwrap() += 1;
        }
    }

    fn set_status(&self, _status: ConnectionStatus) {}

    fn notify(&self, _kind: NoticeKind, _message: &str) {}

    fn apply(&self, _update: ViewUpdate) {}
}

#[test]
fn uncaught_panic_forces_loading_closed() {
    let probe = Arc::new(LoadingProbe::default());
    install_failure_net(probe.clone());

    let result = std::thread::spawn(|| panic!("erro não tratado")).join();
    assert!(result.is_err());
    assert_eq!(*probe.hidden.lock().unwrap(), 1);
}
