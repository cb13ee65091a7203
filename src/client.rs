// src/client.rs
// Adaptador do lado do cliente: chamadas com tempo limite, erros
// normalizados e sincronização em paralelo que tolera falhas isoladas.

pub mod api;
pub mod chart;
pub mod connector;
pub mod failsafe;
pub mod presenter;
pub mod sync;
pub mod tasks;

pub use api::{ApiClient, ClientConfig, ClientError};
pub use chart::{ChartRenderer, NoopChart};
pub use connector::{ConnectReport, Connector};
pub use failsafe::install_failure_net;
pub use presenter::{ConnectionStatus, NoticeKind, Presenter, ViewUpdate};
pub use sync::{SyncContext, SyncReport, SyncTask, TaskOutcome};
