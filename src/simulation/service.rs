//! Player service - owns the in-memory roster and drives tick sweeps
//!
//! Commands mutate a player and save; sweeps advance every player and save
//! once at the end. Players are visited in id order so a seeded RNG gives
//! reproducible runs.

use ahash::AHashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;

use crate::core::calendar::GameCalendar;
use crate::core::error::{HeavenError, Result};
use crate::core::types::{PlayerId, Timestamp};
use crate::entity::player::Player;
use crate::simulation::tick::{advance_player, TickMode};
use crate::storage::{CalendarRepository, PlayerRepository, WorldRepository};
use crate::world::map::WorldMap;

pub struct PlayerService {
    players: AHashMap<PlayerId, Player>,
    repository: PlayerRepository,
    worlds: WorldMap,
    calendar: GameCalendar,
    rng: ChaCha8Rng,
}

impl PlayerService {
    /// Load players, worlds and the calendar from `data_dir`
    pub fn load(data_dir: &Path, seed: Option<u64>, now: Timestamp) -> Result<Self> {
        let repository = PlayerRepository::new(data_dir);
        let players = repository.load_all()?;
        let worlds = WorldRepository::new(data_dir).load()?;
        let calendar = CalendarRepository::new(data_dir).load_or_create_start(now)?;
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        tracing::info!(
            players = players.len(),
            worlds = worlds.worlds.len(),
            zones = worlds.zones.len(),
            "player service loaded"
        );

        Ok(Self {
            players,
            repository,
            worlds,
            calendar,
            rng,
        })
    }

    pub fn save(&self) -> Result<()> {
        self.repository.save_all(&self.players)
    }

    pub fn calendar(&self) -> &GameCalendar {
        &self.calendar
    }

    pub fn worlds(&self) -> &WorldMap {
        &self.worlds
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_registered(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    /// Player ids in ascending order
    pub fn player_ids(&self) -> Vec<PlayerId> {
        let mut ids: Vec<PlayerId> = self.players.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn register(&mut self, id: PlayerId, name: &str, now: Timestamp) -> Result<&Player> {
        if self.is_registered(id) {
            return Err(HeavenError::PlayerAlreadyRegistered(id));
        }
        let player = Player::register(id, name, now, &mut self.rng);
        tracing::info!(
            player = %id,
            name = %player.name,
            qi_type = %player.cultivation.qi_type(),
            "cultivator registered"
        );
        self.players.insert(id, player);
        self.save()?;
        self.players.get(&id).ok_or(HeavenError::PlayerNotFound(id))
    }

    /// Catch every player up after downtime; saves only if a clock moved
    pub fn apply_offline_ticks(&mut self, now: Timestamp) -> Result<Vec<String>> {
        let (notes, changed) = self.sweep(now, TickMode::CatchUp);
        if changed {
            self.save()?;
        }
        tracing::info!(players = self.players.len(), notes = notes.len(), "offline catch-up complete");
        Ok(notes)
    }

    /// One live-loop cycle for every player, then save
    pub fn apply_live_tick(&mut self, now: Timestamp) -> Result<Vec<String>> {
        let (notes, _) = self.sweep(now, TickMode::Live);
        self.save()?;
        tracing::debug!(players = self.players.len(), notes = notes.len(), "live tick");
        Ok(notes)
    }

    fn sweep(&mut self, now: Timestamp, mode: TickMode) -> (Vec<String>, bool) {
        let mut notes = Vec::new();
        let mut changed = false;

        for id in self.player_ids() {
            let Some(player) = self.players.get_mut(&id) else {
                continue;
            };
            let before = (player.last_tick_timestamp, player.tick_buffer);
            let time_flow = self
                .worlds
                .time_flow_for(player.world_id.as_deref(), player.zone_id.as_deref());

            let player_notes = advance_player(player, now, time_flow, mode, &mut self.rng);
            if before != (player.last_tick_timestamp, player.tick_buffer) || !player_notes.is_empty() {
                changed = true;
            }
            for note in player_notes {
                tracing::info!(player = %id, "{}", note);
                notes.push(format!("{}: {}", player.name, note));
            }
        }

        (notes, changed)
    }

    /// Player-triggered breakthrough off the foundation plateau
    pub fn attempt_breakthrough(&mut self, id: PlayerId) -> Result<(bool, String)> {
        let player = self
            .players
            .get_mut(&id)
            .ok_or(HeavenError::PlayerNotFound(id))?;
        let (success, message) = player.attempt_foundation_breakthrough(&mut self.rng);
        tracing::info!(player = %id, success, "foundation breakthrough attempt");
        self.save()?;
        Ok((success, message))
    }

    pub fn travel(&mut self, id: PlayerId, distance: u64, destination: &str) -> Result<String> {
        let player = self
            .players
            .get_mut(&id)
            .ok_or(HeavenError::PlayerNotFound(id))?;
        let message = player.record_travel(distance, destination);
        self.save()?;
        Ok(message)
    }
}
