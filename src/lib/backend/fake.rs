//! In-process backend for poller and dispatcher tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use futures_util::future::BoxFuture;
use serde_json::Value;
use tokio::sync::oneshot;

use super::types::{Backend, BackendError, BackendResult, StatusResponse};

pub enum FakeStatus {
    Ready(BackendResult<StatusResponse>),
    /// Completes when the test sends the result.
    Gated(oneshot::Receiver<BackendResult<StatusResponse>>),
}

#[derive(Default)]
pub struct FakeBackend {
    status_calls: AtomicUsize,
    statuses: Mutex<VecDeque<FakeStatus>>,
    posts: Mutex<Vec<(String, Value)>>,
    reject_posts: AtomicBool,
}

pub fn status(body: Value) -> BackendResult<StatusResponse> {
    Ok(StatusResponse::from_value(body).expect("fixture status body"))
}

pub fn unavailable() -> BackendResult<StatusResponse> {
    Err(BackendError::Status {
        path: "/status".to_string(),
        status: 503,
    })
}

impl FakeBackend {
    pub fn push_status(&self, result: BackendResult<StatusResponse>) {
        self.statuses
            .lock()
            .unwrap()
            .push_back(FakeStatus::Ready(result));
    }

    pub fn push_gated(&self) -> oneshot::Sender<BackendResult<StatusResponse>> {
        let (tx, rx) = oneshot::channel();
        self.statuses.lock().unwrap().push_back(FakeStatus::Gated(rx));
        tx
    }

    pub fn reject_posts(&self) {
        self.reject_posts.store(true, Ordering::SeqCst);
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.lock().unwrap().clone()
    }
}

impl Backend for FakeBackend {
    fn fetch_status(&self) -> BoxFuture<'_, BackendResult<StatusResponse>> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.statuses.lock().unwrap().pop_front();
        Box::pin(async move {
            match next {
                None => Ok(StatusResponse::default()),
                Some(FakeStatus::Ready(result)) => result,
                Some(FakeStatus::Gated(rx)) => rx.await.unwrap_or_else(|_| unavailable()),
            }
        })
    }

    fn post<'a>(&'a self, path: &'a str, body: Value) -> BoxFuture<'a, BackendResult<()>> {
        self.posts.lock().unwrap().push((path.to_string(), body));
        let rejected = self.reject_posts.load(Ordering::SeqCst);
        Box::pin(async move {
            if rejected {
                Err(BackendError::Status {
                    path: path.to_string(),
                    status: 500,
                })
            } else {
                Ok(())
            }
        })
    }
}
