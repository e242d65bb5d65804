//! Cultivation progress state machine
//!
//! `add_exp` is the single mutating entry point driven by the tick
//! orchestrator. It rolls stages over into layers (first realm only),
//! layers into the foundation plateau, and stages into realm
//! breakthroughs everywhere else. The plateau at Peak of the 15th layer
//! stops exp rollover; from there a separate foundation bar fills over
//! ticks and the player triggers `attempt_foundation_breakthrough`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::calendar::ordinal;
use crate::cultivation::quality::{cultivation_rate, QiQuality, QiType};
use crate::cultivation::realm::{Realm, Stage};
use crate::cultivation::tribulation::{HeavenlyTribulation, TribulationOutcome, TRIBULATION_DANGER};

/// Highest layer of the first realm
pub const MAX_LAYER: u32 = 15;

/// Reaching this layer refines murky qi to thin qi
pub const QUALITY_UPGRADE_LAYER: u32 = 6;

/// Ticks for the foundation bar to fill from empty
pub const FOUNDATION_FILL_TICKS: f64 = 1440.0;

/// Bar fills within this of 1.0 count as complete
const FOUNDATION_FULL_EPSILON: f64 = 1e-9;

/// Foundation breakthrough chance with an empty bar
pub const BASE_FOUNDATION_CHANCE: f64 = 0.10;

/// Extra foundation breakthrough chance gained by a full bar
pub const FOUNDATION_CHANCE_SCALE: f64 = 0.90;

/// Exp per realm rank before layer/stage multipliers
const BASE_REQUIRED_EXP: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CultivationProgress {
    realm: Realm,
    stage: Stage,
    /// 1..=MAX_LAYER, only meaningful in the first realm
    layer: u32,
    exp: f64,
    qi_quality: QiQuality,
    qi_type: QiType,
    /// Exp per tick, derived from quality and type
    cultivation_rate: f64,
    /// Readiness in [0, 1]; non-zero only on the plateau
    foundation_progress: f64,
}

impl Default for CultivationProgress {
    fn default() -> Self {
        Self::new(QiType::default())
    }
}

impl CultivationProgress {
    pub fn new(qi_type: QiType) -> Self {
        let qi_quality = QiQuality::default();
        Self {
            realm: Realm::FIRST,
            stage: Stage::Initial,
            layer: 1,
            exp: 0.0,
            qi_quality,
            qi_type,
            cultivation_rate: cultivation_rate(qi_quality, qi_type),
            foundation_progress: 0.0,
        }
    }

    /// Start from an arbitrary position on the ladder (exp 0, empty bar)
    pub fn at(realm: Realm, stage: Stage, layer: u32) -> Self {
        let mut progress = Self {
            realm,
            stage,
            layer,
            ..Self::default()
        };
        progress.sanitize();
        progress
    }

    pub fn with_exp(mut self, exp: f64) -> Self {
        self.exp = exp;
        self.sanitize();
        self
    }

    pub fn with_quality(mut self, quality: QiQuality) -> Self {
        self.qi_quality = quality;
        self.recompute_rate();
        self
    }

    pub fn with_qi_type(mut self, qi_type: QiType) -> Self {
        self.qi_type = qi_type;
        self.recompute_rate();
        self
    }

    pub fn with_foundation_progress(mut self, progress: f64) -> Self {
        self.foundation_progress = progress;
        self.sanitize();
        self
    }

    pub fn realm(&self) -> Realm {
        self.realm
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn layer(&self) -> u32 {
        self.layer
    }

    pub fn exp(&self) -> f64 {
        self.exp
    }

    pub fn qi_quality(&self) -> QiQuality {
        self.qi_quality
    }

    pub fn qi_type(&self) -> QiType {
        self.qi_type
    }

    pub fn cultivation_rate(&self) -> f64 {
        self.cultivation_rate
    }

    pub fn foundation_progress(&self) -> f64 {
        self.foundation_progress
    }

    /// Exp needed to leave the current stage
    pub fn required_exp(&self) -> f64 {
        let realm_multiplier = (self.realm.index() + 1) as f64;
        let layer_multiplier = if self.realm.is_first() {
            self.layer.max(1) as f64
        } else {
            1.0
        };
        let stage_multiplier = (self.stage.index() + 1) as f64;
        realm_multiplier * BASE_REQUIRED_EXP * layer_multiplier * stage_multiplier
    }

    /// Peak of the last layer in the first realm
    pub fn foundation_bar_active(&self) -> bool {
        self.realm.is_first() && self.layer >= MAX_LAYER && self.stage.is_peak()
    }

    /// Peak of the last realm; nothing further to reach
    pub fn is_final_cap(&self) -> bool {
        self.realm.is_last() && self.stage.is_peak()
    }

    pub fn is_capped(&self) -> bool {
        self.foundation_bar_active() || self.is_final_cap()
    }

    /// "Early 3rd Layer" in the first realm, "Early Stage" elsewhere
    pub fn stage_label(&self) -> String {
        if self.realm.is_first() {
            format!("{} {} Layer", self.stage, ordinal(self.layer))
        } else {
            format!("{} Stage", self.stage)
        }
    }

    /// Apply `ticks` of cultivation and return milestone notes in order
    pub fn add_exp<R: Rng + ?Sized>(&mut self, ticks: u64, rng: &mut R) -> Vec<String> {
        let gained = self.cultivation_rate * ticks as f64;

        if self.is_capped() {
            self.exp = (self.exp + gained).min(self.required_exp());
            // No-op at the final cap: the bar only exists on the plateau
            return self.fill_foundation(ticks);
        }

        let mut notes = Vec::new();
        self.exp += gained;

        while self.exp >= self.required_exp() {
            self.exp -= self.required_exp();
            self.advance_stage(rng, &mut notes);

            if self.foundation_bar_active() {
                self.exp = self.exp.min(self.required_exp());
                notes.push(Self::foundation_awakened_note());
                break;
            }
            if self.is_final_cap() {
                self.exp = self.exp.min(self.required_exp());
                break;
            }
        }

        notes
    }

    fn advance_stage<R: Rng + ?Sized>(&mut self, rng: &mut R, notes: &mut Vec<String>) {
        if let Some(next) = self.stage.next() {
            self.stage = next;
            notes.push(self.advanced_note());
            return;
        }

        if self.realm.is_first() {
            if self.layer < MAX_LAYER {
                self.layer += 1;
                self.stage = Stage::Initial;
                notes.push(self.advanced_note());

                if self.layer >= QUALITY_UPGRADE_LAYER
                    && self.qi_quality < QiQuality::Thin
                    && self.upgrade_quality(QiQuality::Thin)
                {
                    notes.push(format!(
                        "Your qi has been refined to {} quality! Cultivation rate is now {:.2} exp/tick.",
                        self.qi_quality, self.cultivation_rate
                    ));
                }
                return;
            }
            notes.push(Self::foundation_awakened_note());
            return;
        }

        notes.push(self.breakthrough_realm(rng));
    }

    fn advanced_note(&self) -> String {
        format!("Advanced to {} of {}.", self.stage_label(), self.realm)
    }

    fn foundation_awakened_note() -> String {
        "Your foundation bar has awakened at the Peak of the 15th Layer. \
         Let it fill before attempting to establish your foundation."
            .to_string()
    }

    /// Cross into the next realm through a heavenly tribulation
    pub fn breakthrough_realm<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        self.cross_realm(|tribulation| tribulation.resolve(rng))
    }

    /// Same as [`Self::breakthrough_realm`] with an explicit draw in [0, 1)
    pub fn breakthrough_realm_with_roll(&mut self, roll: f64) -> String {
        self.cross_realm(|tribulation| tribulation.resolve_with_roll(roll))
    }

    fn cross_realm(
        &mut self,
        resolve: impl FnOnce(&HeavenlyTribulation) -> TribulationOutcome,
    ) -> String {
        let Some(next) = self.realm.next() else {
            self.stage = Stage::Peak;
            return "Reached the pinnacle; no further breakthroughs possible.".to_string();
        };

        let outcome = resolve(&HeavenlyTribulation::new(self.realm, next, TRIBULATION_DANGER));

        // The realm advances whatever the tribulation outcome; only the text differs.
        self.realm = next;
        self.stage = Stage::Initial;
        self.layer = 1;
        self.foundation_progress = 0.0;

        outcome.into_message()
    }

    fn fill_foundation(&mut self, ticks: u64) -> Vec<String> {
        if !self.foundation_bar_active() {
            return Vec::new();
        }

        let before = self.foundation_progress;
        let mut progress = before + ticks as f64 / FOUNDATION_FILL_TICKS;
        // Many small fills sum to just under 1.0
        if progress >= 1.0 - FOUNDATION_FULL_EPSILON {
            progress = 1.0;
        }
        self.foundation_progress = progress;

        if before < 1.0 && self.foundation_progress >= 1.0 {
            vec!["Foundation bar complete! Your breakthrough chance is at its highest.".to_string()]
        } else {
            Vec::new()
        }
    }

    /// Ticks until the next breakthrough opportunity (may be infinite)
    pub fn ticks_until_breakthrough(&self) -> f64 {
        if self.foundation_bar_active() {
            return (1.0 - self.foundation_progress) * FOUNDATION_FILL_TICKS;
        }
        if self.is_final_cap() {
            return f64::INFINITY;
        }
        if self.cultivation_rate <= 0.0 {
            return f64::INFINITY;
        }
        (self.required_exp() - self.exp).max(0.0) / self.cultivation_rate
    }

    /// Chance of a foundation breakthrough right now (0 off the plateau)
    pub fn breakthrough_chance(&self) -> f64 {
        if !self.foundation_bar_active() {
            return 0.0;
        }
        (BASE_FOUNDATION_CHANCE + FOUNDATION_CHANCE_SCALE * self.foundation_progress).min(1.0)
    }

    /// Player-triggered attempt to leave the first realm from the plateau
    pub fn attempt_foundation_breakthrough<R: Rng + ?Sized>(&mut self, rng: &mut R) -> (bool, String) {
        if !self.foundation_bar_active() {
            return (false, self.not_ready_note());
        }
        self.attempt_foundation_breakthrough_with_roll(rng.gen::<f64>())
    }

    /// Same as [`Self::attempt_foundation_breakthrough`] with an explicit draw
    pub fn attempt_foundation_breakthrough_with_roll(&mut self, roll: f64) -> (bool, String) {
        if !self.foundation_bar_active() {
            return (false, self.not_ready_note());
        }

        let chance = self.breakthrough_chance();
        self.exp = 0.0;
        self.foundation_progress = 0.0;

        if roll <= chance {
            if let Some(next) = self.realm.next() {
                self.realm = next;
            }
            self.stage = Stage::Initial;
            self.layer = 1;
            return (
                true,
                format!(
                    "Foundation established! You broke through to {} ({:.0}% chance).",
                    self.realm,
                    chance * 100.0
                ),
            );
        }

        self.stage = Stage::Late;
        self.layer = MAX_LAYER;
        (
            false,
            format!(
                "Your foundation cracked ({:.0}% chance). You slipped back to {} of {}.",
                chance * 100.0,
                self.stage_label(),
                self.realm
            ),
        )
    }

    fn not_ready_note(&self) -> String {
        format!(
            "Your foundation bar has not awakened; reach the Peak of the {} Layer of {} first.",
            ordinal(MAX_LAYER),
            Realm::FIRST
        )
    }

    /// Refine qi quality; refuses anything that is not an upgrade
    pub fn upgrade_quality(&mut self, quality: QiQuality) -> bool {
        if quality <= self.qi_quality {
            return false;
        }
        self.qi_quality = quality;
        self.recompute_rate();
        true
    }

    fn recompute_rate(&mut self) {
        self.cultivation_rate = cultivation_rate(self.qi_quality, self.qi_type);
    }

    /// Clamp loaded or hand-built state back into its valid ranges
    pub fn sanitize(&mut self) {
        if !self.exp.is_finite() || self.exp < 0.0 {
            self.exp = 0.0;
        }

        self.layer = if self.realm.is_first() {
            self.layer.clamp(1, MAX_LAYER)
        } else {
            1
        };

        // Stored rate is a cache; quality and type are the source of truth
        self.recompute_rate();

        if self.foundation_bar_active() && self.foundation_progress.is_finite() {
            self.foundation_progress = self.foundation_progress.clamp(0.0, 1.0);
        } else {
            self.foundation_progress = 0.0;
        }

        if self.is_capped() {
            self.exp = self.exp.min(self.required_exp());
        }
    }
}
