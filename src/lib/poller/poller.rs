use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use super::types::{StatusPoller, SyncHealth, ViewModel};
use crate::lib::backend::types::{Backend, BackendResult};
use crate::lib::tasks::normalize::normalize_all;

pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

impl StatusPoller {
    pub fn new(backend: Arc<dyn Backend>, interval: Duration) -> Self {
        let (view, _) = watch::channel(Arc::new(ViewModel::default()));
        let (health, _) = watch::channel(SyncHealth::default());
        StatusPoller {
            backend,
            view,
            health,
            interval,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ViewModel>> {
        self.view.subscribe()
    }

    pub fn snapshot(&self) -> Arc<ViewModel> {
        self.view.borrow().clone()
    }

    pub fn health(&self) -> SyncHealth {
        self.health.borrow().clone()
    }

    pub fn record_failure(&self, message: String) {
        self.health.send_modify(|health| health.last_failure = Some(message));
    }

    /// One fetch-normalize-replace cycle. On failure the current view is
    /// left exactly as it was.
    pub async fn refresh(&self) -> BackendResult<usize> {
        match self.backend.fetch_status().await {
            Ok(response) => {
                let records = normalize_all(&response.into_tasks());
                let count = records.len();
                let now = unix_millis();

                self.view.send_replace(Arc::new(ViewModel {
                    records,
                    refreshed_at_ms: Some(now),
                }));
                self.health.send_modify(|health| {
                    health.last_success_ms = Some(now);
                    health.last_failure = None;
                });

                debug!(event = "poll_ok", tasks = count);
                Ok(count)
            }
            Err(err) => {
                warn!(event = "poll_failed", error = %err);
                self.record_failure(err.to_string());
                Err(err)
            }
        }
    }

    /// Polls forever. Every tick runs in its own task so a slow request
    /// never holds back the next one; whichever response lands last wins.
    pub async fn run(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let poller = self.clone();
            tokio::spawn(async move {
                let _ = poller.refresh().await;
            });
        }
    }
}
