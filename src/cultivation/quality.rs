//! Qi quality and qi type tables
//!
//! Pure lookups: quality tier -> exp per tick, qi type -> rate modifier.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Purity of the qi a cultivator gathers; never decreases once refined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum QiQuality {
    #[default]
    Murky,
    Thin,
    Dense,
    Pure,
    Radiant,
}

impl QiQuality {
    pub const ORDER: [QiQuality; 5] = [
        QiQuality::Murky,
        QiQuality::Thin,
        QiQuality::Dense,
        QiQuality::Pure,
        QiQuality::Radiant,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            QiQuality::Murky => "Murky",
            QiQuality::Thin => "Thin",
            QiQuality::Dense => "Dense",
            QiQuality::Pure => "Pure",
            QiQuality::Radiant => "Radiant",
        }
    }

    pub fn rank(&self) -> usize {
        Self::ORDER.iter().position(|q| q == self).unwrap_or(0)
    }

    /// Exp gained per tick at this quality (before the qi type modifier)
    pub fn tick_rate(&self) -> f64 {
        match self {
            QiQuality::Murky => 1.0,
            QiQuality::Thin => 1.5,
            QiQuality::Dense => 2.0,
            QiQuality::Pure => 3.0,
            QiQuality::Radiant => 5.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        Self::ORDER
            .iter()
            .copied()
            .find(|q| q.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or(QiQuality::Murky)
    }
}

impl PartialOrd for QiQuality {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QiQuality {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl std::fmt::Display for QiQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for QiQuality {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<QiQuality> for &'static str {
    fn from(quality: QiQuality) -> Self {
        quality.name()
    }
}

/// Affinity of a cultivator's qi; scales the per-tick gain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum QiType {
    #[default]
    Mundane,
    Elemental,
    Heavenly,
}

impl QiType {
    pub const ORDER: [QiType; 3] = [QiType::Mundane, QiType::Elemental, QiType::Heavenly];

    pub fn name(&self) -> &'static str {
        match self {
            QiType::Mundane => "Mundane",
            QiType::Elemental => "Elemental",
            QiType::Heavenly => "Heavenly",
        }
    }

    pub fn modifier(&self) -> f64 {
        match self {
            QiType::Mundane => 1.0,
            QiType::Elemental => 1.2,
            QiType::Heavenly => 1.5,
        }
    }

    pub fn from_name(name: &str) -> Self {
        Self::ORDER
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or(QiType::Mundane)
    }
}

impl std::fmt::Display for QiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for QiType {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<QiType> for &'static str {
    fn from(qi_type: QiType) -> Self {
        qi_type.name()
    }
}

/// Exp per tick for a quality/type pair
pub fn cultivation_rate(quality: QiQuality, qi_type: QiType) -> f64 {
    quality.tick_rate() * qi_type.modifier()
}
