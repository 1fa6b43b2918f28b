use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::lib::backend::types::Backend;
use crate::lib::tasks::types::ViewRecord;

/// The records produced by one successful poll. Replaced wholesale, never
/// edited in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub records: Vec<ViewRecord>,
    /// Unix milliseconds of the poll that produced this model.
    pub refreshed_at_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncHealth {
    pub last_success_ms: Option<u64>,
    /// Most recent poll or command failure. Cleared by the next good poll.
    pub last_failure: Option<String>,
}

pub struct StatusPoller {
    pub backend: Arc<dyn Backend>,
    pub view: watch::Sender<Arc<ViewModel>>,
    pub health: watch::Sender<SyncHealth>,
    pub interval: Duration,
}
