use serde::{Deserialize, Serialize};
use std::path::Path;

use engage_intel::{ActivityEvent, Campaign, Contact, List};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntitySnapshot {
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub lists: Vec<List>,
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
    #[serde(default)]
    pub events: Vec<ActivityEvent>,
}

impl EntitySnapshot {
    pub fn load(path: &Path) -> Result<Self, String> {
        let data = std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read snapshot: {}", err))?;
        if data.trim().is_empty() {
            return Ok(EntitySnapshot::default());
        }
        serde_json::from_str(&data).map_err(|err| format!("failed to parse snapshot: {}", err))
    }
}
