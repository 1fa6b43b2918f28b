use serde::Deserialize;
use std::sync::Arc;

use crate::lib::dispatcher::types::CommandDispatcher;
use crate::lib::poller::types::StatusPoller;
use crate::lib::view::types::TableLayout;

#[derive(Clone)]
pub struct DashboardState {
    pub poller: Arc<StatusPoller>,
    pub dispatcher: Arc<CommandDispatcher>,
    pub layout: Arc<TableLayout>,
}

pub struct DashboardServer {
    pub state: DashboardState,
    pub address: String,
    pub port: String,
}

#[derive(Debug, Deserialize)]
pub struct StopRequest {
    pub task_arn: String,
}
