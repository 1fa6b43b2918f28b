use futures_util::future::BoxFuture;
use serde_json::Value;
use tracing::debug;

use super::types::{Backend, BackendError, BackendResult, HttpBackend, StatusResponse};

const STATUS_PATH: &str = "/status";

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        HttpBackend {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_status(&self) -> BackendResult<StatusResponse> {
        let url = self.url(STATUS_PATH);
        debug!(event = "status_request", url = %url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| BackendError::Transport {
                path: STATUS_PATH.to_string(),
                source,
            })?;

        if !resp.status().is_success() {
            return Err(BackendError::Status {
                path: STATUS_PATH.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(|source| BackendError::Transport {
            path: STATUS_PATH.to_string(),
            source,
        })?;

        StatusResponse::from_body(&body).map_err(|message| BackendError::Malformed {
            path: STATUS_PATH.to_string(),
            message,
        })
    }

    async fn send_command(&self, path: &str, body: Value) -> BackendResult<()> {
        let url = self.url(path);
        debug!(event = "command_request", url = %url, body = %body);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json;charset=UTF-8")
            .json(&body)
            .send()
            .await
            .map_err(|source| BackendError::Transport {
                path: path.to_string(),
                source,
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(BackendError::Status {
                path: path.to_string(),
                status: response.status().as_u16(),
            })
        }
    }
}

impl Backend for HttpBackend {
    fn fetch_status(&self) -> BoxFuture<'_, BackendResult<StatusResponse>> {
        Box::pin(self.get_status())
    }

    fn post<'a>(&'a self, path: &'a str, body: Value) -> BoxFuture<'a, BackendResult<()>> {
        Box::pin(self.send_command(path, body))
    }
}
