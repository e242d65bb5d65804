//! Talents and derived core stats
//!
//! Talents are rolled once at registration and never change. Core stats
//! are base values scaled by talent percentage; they are display-only and
//! never gate progression.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cultivation::{QiType, Realm};

/// Lowest talent roll (percent)
pub const MIN_TALENT: u32 = 50;

/// Highest talent roll (percent)
pub const MAX_TALENT: u32 = 125;

/// Innate aptitudes, each a percentage in [MIN_TALENT, MAX_TALENT]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TalentSheet {
    /// Affects: attack
    pub strength: u32,
    /// Affects: speed
    pub agility: u32,
    /// Affects: health, defense, lifespan
    pub constitution: u32,
    /// Affects: qi pool
    pub spirit: u32,
    /// Insight into techniques; shown on the profile only
    pub comprehension: u32,
}

impl Default for TalentSheet {
    fn default() -> Self {
        Self {
            strength: 100,
            agility: 100,
            constitution: 100,
            spirit: 100,
            comprehension: 100,
        }
    }
}

impl TalentSheet {
    /// Roll every talent uniformly in [MIN_TALENT, MAX_TALENT]
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut roll = || rng.gen_range(MIN_TALENT..=MAX_TALENT);
        Self {
            strength: roll(),
            agility: roll(),
            constitution: roll(),
            spirit: roll(),
            comprehension: roll(),
        }
    }

    /// Pull legacy or hand-edited values back into the roll range
    pub fn sanitize(&mut self) {
        for talent in [
            &mut self.strength,
            &mut self.agility,
            &mut self.constitution,
            &mut self.spirit,
            &mut self.comprehension,
        ] {
            *talent = (*talent).clamp(MIN_TALENT, MAX_TALENT);
        }
    }
}

fn scale(base: f64, talent: u32) -> f64 {
    base * talent as f64 / 100.0
}

/// Qi affinity drawn at registration: 70% mundane, 25% elemental, 5% heavenly
pub fn roll_qi_type<R: Rng + ?Sized>(rng: &mut R) -> QiType {
    let roll: f64 = rng.gen();
    if roll < 0.05 {
        QiType::Heavenly
    } else if roll < 0.30 {
        QiType::Elemental
    } else {
        QiType::Mundane
    }
}

/// Base stats before talent scaling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreStats {
    pub health: f64,
    pub qi: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
}

impl Default for CoreStats {
    fn default() -> Self {
        Self {
            health: 100.0,
            qi: 50.0,
            attack: 10.0,
            defense: 5.0,
            speed: 10.0,
        }
    }
}

impl CoreStats {
    /// Base stats scaled by talent; realm rank multiplies health and qi
    pub fn effective(&self, talents: &TalentSheet, realm: Realm) -> CoreStats {
        let realm_multiplier = (realm.index() + 1) as f64;
        CoreStats {
            health: scale(self.health, talents.constitution) * realm_multiplier,
            qi: scale(self.qi, talents.spirit) * realm_multiplier,
            attack: scale(self.attack, talents.strength),
            defense: scale(self.defense, talents.constitution),
            speed: scale(self.speed, talents.agility),
        }
    }
}

/// Natural lifespan in years for a realm, before constitution
pub fn base_lifespan_years(realm: Realm) -> f64 {
    match realm {
        Realm::QiCondensation => 120.0,
        Realm::FoundationEstablishment => 200.0,
        Realm::CoreFormation => 500.0,
        Realm::NascentSoul => 1_000.0,
        Realm::SoulTransformation => 2_000.0,
        Realm::VoidRefinement => 5_000.0,
        Realm::BodyIntegration => 10_000.0,
        Realm::GreatAscension => 100_000.0,
    }
}

/// Lifespan scaled by constitution talent
pub fn lifespan_years(realm: Realm, talents: &TalentSheet) -> f64 {
    scale(base_lifespan_years(realm), talents.constitution)
}
