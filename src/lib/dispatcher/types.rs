use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::lib::backend::types::{Backend, BackendError};
use crate::lib::poller::types::StatusPoller;

/// One named launch setting, e.g. `MAP=de_dust2` or `TICKRATE=128`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchParameter {
    pub name: String,
    pub value: String,
}

impl LaunchParameter {
    pub fn new(name: &str, value: &str) -> Self {
        LaunchParameter {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Where the update command is sent. Deployments disagree: most expose a
/// dedicated `/update`, older ones reuse `/start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum UpdateRoute {
    #[default]
    Dedicated,
    Start,
}

impl UpdateRoute {
    pub fn path(self) -> &'static str {
        match self {
            UpdateRoute::Dedicated => "/update",
            UpdateRoute::Start => "/start",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start(Vec<LaunchParameter>),
    Update,
    Stop { task_arn: String },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start(_) => "start",
            Command::Update => "update",
            Command::Stop { .. } => "stop",
        }
    }

    pub fn body(&self) -> Result<Value, DispatchError> {
        match self {
            Command::Start(params) => {
                serde_json::to_value(params).map_err(|source| DispatchError::Encode {
                    command: self.name(),
                    source,
                })
            }
            Command::Update => Ok(json!([])),
            Command::Stop { task_arn } => Ok(json!({ "task_arn": task_arn })),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("could not encode {command} payload: {source}")]
    Encode {
        command: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type DispatchResult<T> = Result<T, DispatchError>;

pub struct CommandDispatcher {
    pub backend: Arc<dyn Backend>,
    pub poller: Arc<StatusPoller>,
    pub update_route: UpdateRoute,
}
