//! World and zone records plus the time-flow lookup
//!
//! Each world and zone carries a `time_flow` factor. A player's effective
//! flow is the product of both; anything missing or non-positive counts
//! as 1.0.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn unit_flow() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub id: String,
    pub name: String,
    #[serde(default = "unit_flow")]
    pub time_flow: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub world_id: String,
    pub name: String,
    #[serde(default = "unit_flow")]
    pub time_flow: f64,
}

fn factor(time_flow: f64) -> f64 {
    if time_flow.is_finite() && time_flow > 0.0 {
        time_flow
    } else {
        1.0
    }
}

/// All known worlds and zones keyed by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldMap {
    #[serde(default)]
    pub worlds: BTreeMap<String, World>,
    #[serde(default)]
    pub zones: BTreeMap<String, Zone>,
}

impl WorldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_world(&mut self, world: World) {
        self.worlds.insert(world.id.clone(), world);
    }

    pub fn insert_zone(&mut self, zone: Zone) {
        self.zones.insert(zone.id.clone(), zone);
    }

    pub fn world(&self, id: &str) -> Option<&World> {
        self.worlds.get(id)
    }

    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.get(id)
    }

    /// Combined world x zone time flow for a player's location
    pub fn time_flow_for(&self, world_id: Option<&str>, zone_id: Option<&str>) -> f64 {
        let world_flow = world_id
            .and_then(|id| self.world(id))
            .map_or(1.0, |w| factor(w.time_flow));
        let zone_flow = zone_id
            .and_then(|id| self.zone(id))
            .map_or(1.0, |z| factor(z.time_flow));
        world_flow * zone_flow
    }
}
