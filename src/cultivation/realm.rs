//! Realm and stage ladders
//!
//! Both are fixed ordered sequences. Position in the sequence is the rank
//! used by the exp formula, so ordering comes from `ORDER` rather than
//! from discriminant tricks.

use serde::{Deserialize, Serialize};

/// Top-level cultivation tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Realm {
    #[default]
    QiCondensation,
    FoundationEstablishment,
    CoreFormation,
    NascentSoul,
    SoulTransformation,
    VoidRefinement,
    BodyIntegration,
    GreatAscension,
}

impl Realm {
    pub const ORDER: [Realm; 8] = [
        Realm::QiCondensation,
        Realm::FoundationEstablishment,
        Realm::CoreFormation,
        Realm::NascentSoul,
        Realm::SoulTransformation,
        Realm::VoidRefinement,
        Realm::BodyIntegration,
        Realm::GreatAscension,
    ];

    pub const FIRST: Realm = Realm::QiCondensation;
    pub const LAST: Realm = Realm::GreatAscension;

    pub fn name(&self) -> &'static str {
        match self {
            Realm::QiCondensation => "Qi Condensation",
            Realm::FoundationEstablishment => "Foundation Establishment",
            Realm::CoreFormation => "Core Formation",
            Realm::NascentSoul => "Nascent Soul",
            Realm::SoulTransformation => "Soul Transformation",
            Realm::VoidRefinement => "Void Refinement",
            Realm::BodyIntegration => "Body Integration",
            Realm::GreatAscension => "Great Ascension",
        }
    }

    /// Rank in `ORDER` (0 = Qi Condensation)
    pub fn index(&self) -> usize {
        Self::ORDER.iter().position(|r| r == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ORDER.get(index).copied()
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn is_first(&self) -> bool {
        *self == Self::FIRST
    }

    pub fn is_last(&self) -> bool {
        *self == Self::LAST
    }

    /// Parse a display name; unknown names fall back to the first realm
    pub fn from_name(name: &str) -> Self {
        Self::ORDER
            .iter()
            .copied()
            .find(|r| r.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or(Self::FIRST)
    }
}

impl std::fmt::Display for Realm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Realm {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Realm> for &'static str {
    fn from(realm: Realm) -> Self {
        realm.name()
    }
}

/// Sub-phase within a realm (or within a layer of the first realm)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Stage {
    #[default]
    Initial,
    Early,
    Middle,
    Late,
    Peak,
}

impl Stage {
    pub const ORDER: [Stage; 5] = [
        Stage::Initial,
        Stage::Early,
        Stage::Middle,
        Stage::Late,
        Stage::Peak,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Initial => "Initial",
            Stage::Early => "Early",
            Stage::Middle => "Middle",
            Stage::Late => "Late",
            Stage::Peak => "Peak",
        }
    }

    pub fn index(&self) -> usize {
        Self::ORDER.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn next(&self) -> Option<Self> {
        Self::ORDER.get(self.index() + 1).copied()
    }

    pub fn is_peak(&self) -> bool {
        *self == Stage::Peak
    }

    /// Parse a display name; unknown names fall back to Initial
    pub fn from_name(name: &str) -> Self {
        Self::ORDER
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or(Stage::Initial)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Stage {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Stage> for &'static str {
    fn from(stage: Stage) -> Self {
        stage.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realm_order_and_rank() {
        assert_eq!(Realm::QiCondensation.index(), 0);
        assert_eq!(Realm::GreatAscension.index(), 7);
        for (i, realm) in Realm::ORDER.iter().enumerate() {
            assert_eq!(realm.index(), i);
            assert_eq!(Realm::from_index(i), Some(*realm));
        }
    }

    #[test]
    fn test_realm_next() {
        assert_eq!(
            Realm::QiCondensation.next(),
            Some(Realm::FoundationEstablishment)
        );
        assert_eq!(Realm::GreatAscension.next(), None);
    }

    #[test]
    fn test_unknown_names_fall_back() {
        assert_eq!(Realm::from_name("Mortal Dust"), Realm::QiCondensation);
        assert_eq!(Realm::from_name("core formation"), Realm::CoreFormation);
        assert_eq!(Stage::from_name("Transcendent"), Stage::Initial);
        assert_eq!(Stage::from_name("Late"), Stage::Late);
    }

    #[test]
    fn test_stage_next_stops_at_peak() {
        assert_eq!(Stage::Initial.next(), Some(Stage::Early));
        assert_eq!(Stage::Late.next(), Some(Stage::Peak));
        assert_eq!(Stage::Peak.next(), None);
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&Realm::NascentSoul).unwrap();
        assert_eq!(json, "\"Nascent Soul\"");
        let back: Realm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Realm::NascentSoul);

        let legacy: Stage = serde_json::from_str("\"Half-Step\"").unwrap();
        assert_eq!(legacy, Stage::Initial);
    }
}
