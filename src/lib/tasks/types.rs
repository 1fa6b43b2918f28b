use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Accepts any JSON for the field and keeps it only if it has the expected
/// shape. A wrong-shaped field is treated the same as an absent one.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Struct targets only deserialize from JSON objects. serde would otherwise
/// fill their fields by position from an array.
pub(crate) fn from_object<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    if value.is_object() {
        serde_json::from_value(value).unwrap_or_default()
    } else {
        T::default()
    }
}

pub(crate) fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// A list whose entries are structs. Entries that are not objects are kept
/// in place with every field absent.
pub(crate) fn lenient_objects<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(items.into_iter().map(from_object).collect())),
        _ => Ok(None),
    }
}

/// CPU or memory reservation. ECS reports these as strings ("256"), some
/// deployments send plain numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceUnits {
    Count(serde_json::Number),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EnvironmentOverride {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContainerOverride {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_objects")]
    pub environment: Option<Vec<EnvironmentOverride>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOverrides {
    #[serde(default, deserialize_with = "lenient_objects")]
    pub container_overrides: Option<Vec<ContainerOverride>>,
}

/// One task as described by the status endpoint. The backend owns this
/// schema and its variants disagree on which fields are present, so every
/// field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    #[serde(default, deserialize_with = "lenient")]
    pub task_arn: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub public_ip: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub hostnames: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub started_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub stopping_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub stopped_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub desired_status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub cpu: Option<ResourceUnits>,
    #[serde(default, deserialize_with = "lenient")]
    pub memory: Option<ResourceUnits>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub overrides: Option<TaskOverrides>,
    #[serde(default, deserialize_with = "lenient")]
    pub server_ready: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub map: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub stop_code: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub stopped_reason: Option<String>,
}

impl RawTask {
    /// Builds a task from one element of the status list. Anything that is
    /// not an object becomes a task with every field absent.
    pub fn from_value(value: Value) -> Self {
        from_object(value)
    }

    /// `overrides.containerOverrides[0].environment`, if the whole path exists.
    pub fn environment(&self) -> Option<&[EnvironmentOverride]> {
        self.overrides
            .as_ref()?
            .container_overrides
            .as_ref()?
            .first()?
            .environment
            .as_deref()
    }
}

/// Flat, render-ready row. Field names match the dashboard table columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRecord {
    pub task_arn: Option<String>,
    pub public_ip: Option<String>,
    pub hostnames: Option<Vec<String>>,
    pub started_at: Option<String>,
    pub last_status: Option<String>,
    pub desired_status: Option<String>,
    pub cpu: Option<ResourceUnits>,
    pub memory: Option<ResourceUnits>,
    /// JSON list text, e.g. `["TICKRATE: 64","MAP: de_dust2"]`.
    pub overrides: String,
    pub server_ready: Option<bool>,
    pub map: Option<String>,
    /// Payload of the stop action. Always equal to `task_arn`.
    pub stop_server: Option<String>,
}
