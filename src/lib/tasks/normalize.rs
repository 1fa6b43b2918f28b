use serde_json::Value;

use super::types::{EnvironmentOverride, RawTask, ViewRecord};

const EMPTY_SUMMARY: &str = "[]";

pub fn normalize(task: &RawTask) -> ViewRecord {
    ViewRecord {
        task_arn: task.task_arn.clone(),
        public_ip: task.public_ip.clone(),
        hostnames: task.hostnames.clone(),
        started_at: task.started_at.clone(),
        last_status: task.last_status.clone(),
        desired_status: task.desired_status.clone(),
        cpu: task.cpu.clone(),
        memory: task.memory.clone(),
        overrides: serialize_summary(&override_summary(task)),
        server_ready: task.server_ready,
        map: task.map.clone(),
        stop_server: task.task_arn.clone(),
    }
}

pub fn normalize_all(tasks: &[RawTask]) -> Vec<ViewRecord> {
    tasks.iter().map(normalize).collect()
}

/// `"<name>: <value>"` for every environment override of the first
/// container, in the order the backend listed them.
pub fn override_summary(task: &RawTask) -> Vec<String> {
    task.environment()
        .unwrap_or_default()
        .iter()
        .map(summary_entry)
        .collect()
}

fn summary_entry(entry: &EnvironmentOverride) -> String {
    let name = entry.name.as_deref().unwrap_or_default();
    let value = match &entry.value {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    format!("{name}: {value}")
}

fn serialize_summary(entries: &[String]) -> String {
    serde_json::to_string(entries).unwrap_or_else(|_| EMPTY_SUMMARY.to_string())
}
