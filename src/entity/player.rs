//! Player aggregate
//!
//! A player owns its cultivation progress, counters, talents, gear and
//! location. All cultivation goes through [`Player::apply_ticks`]; the
//! tick clock (`tick_buffer`, `last_tick_timestamp`) is advanced by the
//! tick orchestrator.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::calendar::GameCalendar;
use crate::core::types::{now_timestamp, PlayerId, Position, Tick, Timestamp};
use crate::cultivation::CultivationProgress;
use crate::entity::equipment::{default_equipment, fill_missing_slots, Equipment};
use crate::entity::stats::PlayerStats;
use crate::entity::talents::{lifespan_years, roll_qi_type, CoreStats, TalentSheet};

fn default_name() -> String {
    "Unnamed".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default, alias = "user_id")]
    pub id: PlayerId,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "now_timestamp")]
    pub created_at: Timestamp,
    #[serde(default = "now_timestamp")]
    pub birthday: Timestamp,
    #[serde(default)]
    pub stats: PlayerStats,
    #[serde(default)]
    pub cultivation: CultivationProgress,
    #[serde(default)]
    pub talents: TalentSheet,
    #[serde(default)]
    pub core_stats: CoreStats,
    #[serde(default)]
    pub inventory: Vec<String>,
    #[serde(default = "default_equipment")]
    pub equipment: Equipment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    #[serde(default)]
    pub position: Position,
    /// Fractional ticks carried between applications, in [0, 1)
    #[serde(default)]
    pub tick_buffer: f64,
    #[serde(default = "now_timestamp")]
    pub last_tick_timestamp: Timestamp,
}

impl Player {
    /// New cultivator with freshly rolled talents and qi type
    pub fn register<R: Rng + ?Sized>(
        id: PlayerId,
        name: impl Into<String>,
        now: Timestamp,
        rng: &mut R,
    ) -> Self {
        let talents = TalentSheet::roll(rng);
        let qi_type = roll_qi_type(rng);
        Self {
            id,
            name: name.into(),
            created_at: now,
            birthday: now,
            stats: PlayerStats::new(),
            cultivation: CultivationProgress::new(qi_type),
            talents,
            core_stats: CoreStats::default(),
            inventory: Vec::new(),
            equipment: default_equipment(),
            world_id: None,
            zone_id: None,
            position: Position::default(),
            tick_buffer: 0.0,
            last_tick_timestamp: now,
        }
    }

    /// Feed whole ticks into cultivation and update counters
    pub fn apply_ticks<R: Rng + ?Sized>(&mut self, ticks: Tick, rng: &mut R) -> Vec<String> {
        let realm_before = self.cultivation.realm().index();
        self.stats.record_cultivation(ticks);

        let notes = self.cultivation.add_exp(ticks, rng);

        let crossed = self.cultivation.realm().index().saturating_sub(realm_before);
        self.stats.record_tribulations(crossed as u64);
        notes
    }

    /// Player-triggered foundation breakthrough attempt
    pub fn attempt_foundation_breakthrough<R: Rng + ?Sized>(&mut self, rng: &mut R) -> (bool, String) {
        self.cultivation.attempt_foundation_breakthrough(rng)
    }

    /// Walk `distance` steps towards a destination
    pub fn record_travel(&mut self, distance: u64, destination: &str) -> String {
        self.stats.record_steps(distance);
        format!(
            "You travelled {} steps towards {}. Total steps: {}.",
            distance, destination, self.stats.steps_travelled
        )
    }

    /// Move to a world/zone; `None` clears the assignment
    pub fn relocate(&mut self, world_id: Option<String>, zone_id: Option<String>, position: Position) {
        self.world_id = world_id;
        self.zone_id = zone_id;
        self.position = position;
    }

    pub fn age_years(&self, calendar: &GameCalendar, now: Timestamp) -> f64 {
        calendar.years_elapsed(self.birthday, now)
    }

    pub fn lifespan_years(&self) -> f64 {
        lifespan_years(self.cultivation.realm(), &self.talents)
    }

    pub fn remaining_lifespan_years(&self, calendar: &GameCalendar, now: Timestamp) -> f64 {
        (self.lifespan_years() - self.age_years(calendar, now)).max(0.0)
    }

    /// Talent-scaled stats at the current realm
    pub fn effective_stats(&self) -> CoreStats {
        self.core_stats.effective(&self.talents, self.cultivation.realm())
    }

    /// "Early 3rd Layer Qi Condensation"
    pub fn cultivation_title(&self) -> String {
        format!("{} {}", self.cultivation.stage_label(), self.cultivation.realm())
    }

    /// Clamp everything a hand-edited or legacy save might have broken
    pub fn sanitize(&mut self) {
        self.cultivation.sanitize();
        self.stats.sanitize();
        self.talents.sanitize();
        fill_missing_slots(&mut self.equipment);
        if !self.tick_buffer.is_finite() || !(0.0..1.0).contains(&self.tick_buffer) {
            self.tick_buffer = 0.0;
        }
    }
}
