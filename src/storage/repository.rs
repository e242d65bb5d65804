//! File-backed repositories
//!
//! Every file is rewritten whole: serialize, write to a sibling `.tmp`,
//! then rename over the target so a crash never leaves a half-written save.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::calendar::GameCalendar;
use crate::core::error::Result;
use crate::core::types::{PlayerId, Timestamp};
use crate::entity::player::Player;
use crate::world::map::WorldMap;

pub const PLAYERS_FILE: &str = "players.toml";
pub const WORLDS_FILE: &str = "worlds.toml";
pub const CALENDAR_FILE: &str = "calendar.toml";

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
struct PlayersFile {
    #[serde(default)]
    players: BTreeMap<String, Player>,
}

#[derive(Serialize)]
struct PlayersFileRef<'a> {
    players: BTreeMap<String, &'a Player>,
}

/// players.toml: one `[players."<id>"]` table per cultivator
#[derive(Debug, Clone)]
pub struct PlayerRepository {
    path: PathBuf,
}

impl PlayerRepository {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(PLAYERS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every player, creating an empty file on first run
    ///
    /// The table key is authoritative for the id. Each record is sanitized
    /// so legacy saves pick up defaults for fields they predate.
    pub fn load_all(&self) -> Result<AHashMap<PlayerId, Player>> {
        if !self.path.exists() {
            write_atomic(&self.path, "[players]\n")?;
            tracing::info!(path = %self.path.display(), "created empty player store");
            return Ok(AHashMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let file: PlayersFile = toml::from_str(&content)?;

        let mut players = AHashMap::with_capacity(file.players.len());
        for (key, mut player) in file.players {
            match key.trim().parse::<u64>() {
                Ok(id) => player.id = PlayerId(id),
                Err(_) => {
                    tracing::warn!(key = %key, id = %player.id, "non-numeric player key, using stored id");
                }
            }
            player.sanitize();
            players.insert(player.id, player);
        }

        tracing::debug!(count = players.len(), path = %self.path.display(), "loaded players");
        Ok(players)
    }

    pub fn save_all(&self, players: &AHashMap<PlayerId, Player>) -> Result<()> {
        let file = PlayersFileRef {
            players: players
                .iter()
                .map(|(id, player)| (id.to_string(), player))
                .collect(),
        };
        let content = toml::to_string(&file)?;
        write_atomic(&self.path, &content)?;
        tracing::debug!(count = players.len(), path = %self.path.display(), "saved players");
        Ok(())
    }
}

/// worlds.toml: `[worlds.<id>]` and `[zones.<id>]` tables
#[derive(Debug, Clone)]
pub struct WorldRepository {
    path: PathBuf,
}

impl WorldRepository {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(WORLDS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file means no worlds: every player runs at flow 1.0
    ///
    /// An empty `[worlds]`/`[zones]` skeleton is written on first run.
    pub fn load(&self) -> Result<WorldMap> {
        if !self.path.exists() {
            write_atomic(&self.path, "[worlds]\n[zones]\n")?;
            tracing::info!(path = %self.path.display(), "created empty world map");
            return Ok(WorldMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let map: WorldMap = toml::from_str(&content)?;
        tracing::debug!(
            worlds = map.worlds.len(),
            zones = map.zones.len(),
            "loaded world map"
        );
        Ok(map)
    }

    pub fn save(&self, map: &WorldMap) -> Result<()> {
        let content = toml::to_string(map)?;
        write_atomic(&self.path, &content)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CalendarFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_timestamp: Option<Timestamp>,
}

/// calendar.toml: the wall-clock moment the in-game calendar began
#[derive(Debug, Clone)]
pub struct CalendarRepository {
    path: PathBuf,
}

impl CalendarRepository {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CALENDAR_FILE),
        }
    }

    /// Read the stored start, or persist `now` as the start
    ///
    /// A missing file, an empty file or one without `start_timestamp` all
    /// count as a first run.
    pub fn load_or_create_start(&self, now: Timestamp) -> Result<GameCalendar> {
        if self.path.exists() {
            let content = fs::read_to_string(&self.path)?;
            let file: CalendarFile = toml::from_str(&content)?;
            if let Some(start) = file.start_timestamp {
                return Ok(GameCalendar::new(start));
            }
            tracing::warn!(path = %self.path.display(), "calendar file has no start, resetting");
        }

        let content = toml::to_string(&CalendarFile {
            start_timestamp: Some(now),
        })?;
        write_atomic(&self.path, &content)?;
        tracing::info!(start_timestamp = now, "calendar started");
        Ok(GameCalendar::new(now))
    }
}
