// src/client/sync.rs

use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;

use crate::client::{
    api::{ApiClient, ClientError},
    chart::ChartRenderer,
    presenter::Presenter,
};

/// O que toda tarefa de sincronização enxerga.
pub struct SyncContext {
    pub client: ApiClient,
    pub presenter: Arc<dyn Presenter>,
    pub chart: Arc<dyn ChartRenderer>,
}

#[async_trait]
pub trait SyncTask: Send + Sync {
    fn name(&self) -> &'static str;
    async fn run(&self, ctx: &SyncContext) -> Result<(), ClientError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Succeeded,
    Failed(String),
    Panicked,
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Succeeded)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub name: &'static str,
    pub outcome: TaskOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub tasks: Vec<TaskReport>,
}

impl SyncReport {
    pub fn succeeded(&self) -> usize {
        self.tasks.iter().filter(|t| t.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.tasks.len() - self.succeeded()
    }
}

/// Dispara todas as tarefas juntas e espera cada uma terminar, com sucesso
/// ou não. Uma falha nunca cancela as outras.
pub async fn run_all_settled(ctx: Arc<SyncContext>, tasks: &[Arc<dyn SyncTask>]) -> SyncReport {
    let handles = tasks.iter().map(|task| {
        let task = Arc::clone(task);
        let ctx = Arc::clone(&ctx);
        tokio::spawn(async move { task.run(&ctx).await })
    });
    let results = join_all(handles).await;

    let tasks = tasks
        .iter()
        .zip(results)
        .map(|(task, result)| {
            let name = task.name();
            let outcome = match result {
                Ok(Ok(())) => TaskOutcome::Succeeded,
                Ok(Err(e)) => {
                    tracing::error!(task = name, "{}: {}", name, e);
                    TaskOutcome::Failed(e.to_string())
                }
                Err(join_error) => {
                    tracing::error!(task = name, "Tarefa abortada: {}", join_error);
                    ctx.presenter.show_loading(false);
                    TaskOutcome::Panicked
                }
            };
            TaskReport { name, outcome }
        })
        .collect();

    SyncReport { tasks }
}
