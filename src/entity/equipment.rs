//! Equipment slots (inert data; no combat effect yet)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentSlot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EquipmentSlot {
    pub fn empty(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            item: None,
            description: Some(description.to_string()),
        }
    }

    /// What a profile shows for this slot
    pub fn display_value(&self) -> &str {
        self.item
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or("Empty")
    }
}

/// Slot key -> slot, ordered for stable saves
pub type Equipment = BTreeMap<String, EquipmentSlot>;

/// (key, display name, empty-slot description)
const DEFAULT_SLOTS: [(&str, &str, &str); 4] = [
    ("weapon", "Weapon", "Empty hand"),
    ("armor", "Armor", "Tattered robes"),
    ("artifact", "Artifact", "None"),
    ("ring", "Ring", "None"),
];

/// Fresh copy of the starting equipment template
pub fn default_equipment() -> Equipment {
    DEFAULT_SLOTS
        .iter()
        .map(|(key, name, description)| (key.to_string(), EquipmentSlot::empty(name, description)))
        .collect()
}

/// Add any template slots missing from a loaded save
pub fn fill_missing_slots(equipment: &mut Equipment) {
    for (key, slot) in default_equipment() {
        equipment.entry(key).or_insert(slot);
    }
}
