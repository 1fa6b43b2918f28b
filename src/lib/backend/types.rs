use futures_util::future::BoxFuture;
use serde::Deserialize;
use serde_json::Value;

use crate::lib::tasks::types::RawTask;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} answered with status {status}")]
    Status { path: String, status: u16 },
    #[error("malformed response from {path}: {message}")]
    Malformed { path: String, message: String },
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Body of `GET /status`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub task_details: Option<Vec<Value>>,
}

impl StatusResponse {
    /// The body must be a JSON object. A missing or `null` task list means
    /// no tasks are running; a task list of any other shape is malformed.
    pub fn from_value(value: Value) -> Result<Self, String> {
        if !value.is_object() {
            return Err("status body is not a JSON object".to_string());
        }
        serde_json::from_value(value).map_err(|err| err.to_string())
    }

    pub fn from_body(body: &[u8]) -> Result<Self, String> {
        let value: Value = serde_json::from_slice(body).map_err(|err| err.to_string())?;
        Self::from_value(value)
    }

    pub fn into_tasks(self) -> Vec<RawTask> {
        self.task_details
            .unwrap_or_default()
            .into_iter()
            .map(RawTask::from_value)
            .collect()
    }
}

/// Transport to the orchestration backend.
pub trait Backend: Send + Sync {
    fn fetch_status(&self) -> BoxFuture<'_, BackendResult<StatusResponse>>;

    /// POSTs `body` as JSON to `path`. The response body is ignored.
    fn post<'a>(&'a self, path: &'a str, body: Value) -> BoxFuture<'a, BackendResult<()>>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    pub client: reqwest::Client,
    pub base_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_or_null_task_list_is_empty() {
        for body in [json!({}), json!({"task_details": null})] {
            let response = StatusResponse::from_value(body).expect("valid");
            assert!(response.into_tasks().is_empty());
        }
    }

    #[test]
    fn non_object_body_is_malformed() {
        for body in [json!([]), json!(null), json!("ok")] {
            assert!(StatusResponse::from_value(body).is_err());
        }
        assert!(StatusResponse::from_body(b"<html>bad gateway</html>").is_err());
    }

    #[test]
    fn task_list_of_wrong_shape_is_malformed() {
        let result = StatusResponse::from_value(json!({"task_details": "none"}));
        assert!(result.is_err());
    }

    #[test]
    fn every_element_becomes_a_task() {
        let response = StatusResponse::from_body(
            br#"{"task_details":[{"taskArn":"t1"},{"taskArn":"t2"},"junk"]}"#,
        )
        .expect("valid");

        let tasks = response.into_tasks();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].task_arn.as_deref(), Some("t1"));
        assert_eq!(tasks[1].task_arn.as_deref(), Some("t2"));
        assert_eq!(tasks[2], RawTask::default());
    }
}
