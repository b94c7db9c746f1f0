//! In-page event payloads exchanged between the block map and the dashboard,
//! and between any component and the debug panel.

use serde::{Deserialize, Serialize};

use crate::enums::AfdelingKey;

/// A map block was clicked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AfdelingClicked {
    /// Display label ("Klepu", or "Tidak diketahui")
    pub afdeling: String,
    pub afdeling_key: Option<AfdelingKey>,
    /// Feature name as drawn on the map
    pub name: String,
    pub feature_id: Option<String>,
}

impl AfdelingClicked {
    /// Value for `/api/dashboard?afdeling=`; `None` when the block could not be classified
    pub fn dashboard_param(&self) -> Option<String> {
        self.afdeling_key.map(|k| k.code().to_string())
    }
}

/// Dashboard asks whether the map is alive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RekapPing {
    /// Milliseconds since epoch
    pub requested_at: f64,
}

/// Map answer to [`RekapPing`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetaPong {
    pub ready: bool,
    pub has_map: bool,
    pub last_detected_afdeling: Option<AfdelingClicked>,
    pub ts: f64,
}

/// Key/value lines shown in the debug panel. Later values replace earlier
/// ones with the same key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugUpdate {
    pub entries: Vec<(String, String)>,
}

impl DebugUpdate {
    pub fn single(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            entries: vec![(key.into(), value.into())],
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Merges into an ordered key/value list, keeping first-seen key order
    pub fn apply_to(&self, state: &mut Vec<(String, String)>) {
        for (key, value) in &self.entries {
            match state.iter_mut().find(|(k, _)| k == key) {
                Some(slot) => slot.1 = value.clone(),
                None => state.push((key.clone(), value.clone())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_afdeling_clicked_wire_names() {
        let evt = AfdelingClicked {
            afdeling: "Klepu".into(),
            afdeling_key: Some(AfdelingKey::Klepu),
            name: "KLP-07".into(),
            feature_id: None,
        };
        let json = serde_json::to_value(&evt).unwrap();
        assert_eq!(json["afdelingKey"], "klepu");
        assert_eq!(json["featureId"], serde_json::Value::Null);
        assert_eq!(evt.dashboard_param().as_deref(), Some("klepu"));
    }

    #[test]
    fn test_debug_update_merges_by_key() {
        let mut state = vec![("mapStatus".to_string(), "Loading".to_string())];
        DebugUpdate::single("handshake", "Connected")
            .with("mapStatus", "Ready")
            .apply_to(&mut state);
        assert_eq!(
            state,
            vec![
                ("mapStatus".to_string(), "Ready".to_string()),
                ("handshake".to_string(), "Connected".to_string()),
            ]
        );
    }
}
