//! Heavenly tribulation narrated at realm boundaries
//!
//! Resolution is a pure function of the realms, the danger and one draw
//! in [0, 1). It never mutates cultivation state.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cultivation::realm::Realm;

/// Chance that a realm crossing turns into a close call
pub const TRIBULATION_DANGER: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TribulationOutcome {
    /// Lightning passed without incident
    Overcome { message: String },
    /// Draw fell under the danger threshold
    CloseCall { message: String },
}

impl TribulationOutcome {
    pub fn into_message(self) -> String {
        match self {
            TribulationOutcome::Overcome { message } => message,
            TribulationOutcome::CloseCall { message } => message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeavenlyTribulation {
    pub current: Realm,
    pub target: Realm,
    /// Probability of a close call, in [0, 1]
    pub danger: f64,
}

impl HeavenlyTribulation {
    pub fn new(current: Realm, target: Realm, danger: f64) -> Self {
        Self {
            current,
            target,
            danger: danger.clamp(0.0, 1.0),
        }
    }

    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> TribulationOutcome {
        self.resolve_with_roll(rng.gen::<f64>())
    }

    pub fn resolve_with_roll(&self, roll: f64) -> TribulationOutcome {
        if roll < self.danger {
            TribulationOutcome::CloseCall {
                message: format!(
                    "Heavenly tribulation nearly shattered your meridians as you left {}; \
                     you barely broke through to {}.",
                    self.current, self.target
                ),
            }
        } else {
            TribulationOutcome::Overcome {
                message: format!(
                    "Heavenly tribulation overcome! Broke through to {}.",
                    self.target
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn tribulation() -> HeavenlyTribulation {
        HeavenlyTribulation::new(
            Realm::FoundationEstablishment,
            Realm::CoreFormation,
            TRIBULATION_DANGER,
        )
    }

    #[test]
    fn test_low_roll_is_close_call() {
        let outcome = tribulation().resolve_with_roll(0.1);
        assert!(matches!(outcome, TribulationOutcome::CloseCall { .. }));
        let message = outcome.into_message();
        assert!(message.contains("Core Formation"));
        assert!(message.to_lowercase().contains("tribulation"));
    }

    #[test]
    fn test_roll_at_danger_passes() {
        let outcome = tribulation().resolve_with_roll(TRIBULATION_DANGER);
        assert!(matches!(outcome, TribulationOutcome::Overcome { .. }));
        assert_eq!(
            outcome.into_message(),
            "Heavenly tribulation overcome! Broke through to Core Formation."
        );
    }

    #[test]
    fn test_danger_is_clamped() {
        let t = HeavenlyTribulation::new(Realm::QiCondensation, Realm::FoundationEstablishment, 3.0);
        assert_eq!(t.danger, 1.0);
        assert!(matches!(
            t.resolve_with_roll(0.999),
            TribulationOutcome::CloseCall { .. }
        ));
    }

    #[test]
    fn test_seeded_resolution_is_deterministic() {
        let a = tribulation().resolve(&mut ChaCha8Rng::seed_from_u64(9));
        let b = tribulation().resolve(&mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
