use serde::{Deserialize, Serialize};

use crate::lib::dispatcher::types::LaunchParameter;

pub const MAP_FIELD: &str = "MAP";
/// Placeholder shown in the map dropdown before anything is picked.
pub const NO_MAP_SELECTED: &str = "Choose Map...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartGate {
    pub enabled: bool,
}

pub fn selected_map(form: &[LaunchParameter]) -> Option<&str> {
    form.iter()
        .find(|param| param.name == MAP_FIELD)
        .map(|param| param.value.as_str())
}

/// Start is allowed once a real map is chosen. A form without a map field,
/// or with an empty one, counts as nothing chosen.
pub fn start_gate(form: &[LaunchParameter]) -> StartGate {
    let enabled = match selected_map(form) {
        Some(map) => !map.is_empty() && map != NO_MAP_SELECTED,
        None => false,
    };
    StartGate { enabled }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(map: &str) -> Vec<LaunchParameter> {
        vec![
            LaunchParameter::new("TICKRATE", "128"),
            LaunchParameter::new(MAP_FIELD, map),
            LaunchParameter::new("MAPGROUP", "mg_active"),
        ]
    }

    #[test]
    fn placeholder_disables_start() {
        assert!(!start_gate(&form("Choose Map...")).enabled);
    }

    #[test]
    fn real_map_enables_start() {
        assert!(start_gate(&form("de_dust2")).enabled);
        assert!(start_gate(&form("de_inferno")).enabled);
    }

    #[test]
    fn missing_or_empty_map_disables_start() {
        assert!(!start_gate(&form("")).enabled);
        assert!(!start_gate(&[LaunchParameter::new("TICKRATE", "64")]).enabled);
        assert!(!start_gate(&[]).enabled);
    }

    #[test]
    fn first_map_field_decides() {
        let form = vec![
            LaunchParameter::new(MAP_FIELD, "Choose Map..."),
            LaunchParameter::new(MAP_FIELD, "de_dust2"),
        ];
        assert_eq!(selected_map(&form), Some("Choose Map..."));
        assert!(!start_gate(&form).enabled);
    }
}
