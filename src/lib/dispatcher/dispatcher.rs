use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use super::types::{
    Command, CommandDispatcher, DispatchError, DispatchResult, LaunchParameter, UpdateRoute,
};
use crate::lib::backend::types::Backend;
use crate::lib::poller::types::StatusPoller;

impl CommandDispatcher {
    pub fn new(
        backend: Arc<dyn Backend>,
        poller: Arc<StatusPoller>,
        update_route: UpdateRoute,
    ) -> Self {
        CommandDispatcher {
            backend,
            poller,
            update_route,
        }
    }

    pub async fn start(&self, params: Vec<LaunchParameter>) -> DispatchResult<()> {
        self.dispatch(Command::Start(params)).await
    }

    pub async fn update(&self) -> DispatchResult<()> {
        self.dispatch(Command::Update).await
    }

    pub async fn stop(&self, task_arn: &str) -> DispatchResult<()> {
        self.dispatch(Command::Stop {
            task_arn: task_arn.to_string(),
        })
        .await
    }

    fn path_for(&self, command: &Command) -> &'static str {
        match command {
            Command::Start(_) => "/start",
            Command::Update => self.update_route.path(),
            Command::Stop { .. } => "/stop",
        }
    }

    /// Sends the command and, only if the backend accepted it, refreshes the
    /// view once. Failures are logged and noted on the sync health.
    pub async fn dispatch(&self, command: Command) -> DispatchResult<()> {
        let command_id = Uuid::new_v4();
        let span = info_span!("command", id = %command_id, command = command.name());
        let path = self.path_for(&command);
        let body = command.body()?;

        async {
            info!(event = "command_sent", path = path);

            match self.backend.post(path, body).await {
                Ok(()) => {
                    info!(event = "command_ok", path = path);
                    // A failed refresh is already logged by the poller and
                    // does not undo the command.
                    let _ = self.poller.refresh().await;
                    Ok(())
                }
                Err(err) => {
                    error!(event = "command_failed", path = path, error = %err);
                    self.poller
                        .record_failure(format!("{} failed: {err}", command.name()));
                    Err(DispatchError::from(err))
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Fire-and-forget form of [`dispatch`](Self::dispatch).
    pub fn spawn(self: &Arc<Self>, command: Command) -> JoinHandle<DispatchResult<()>> {
        let dispatcher = self.clone();
        tokio::spawn(async move { dispatcher.dispatch(command).await })
    }
}
