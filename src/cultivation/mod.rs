//! Cultivation progression: realm ladders, qi tables, tribulations and
//! the progress engine that ties them together.

pub mod progress;
pub mod quality;
pub mod realm;
pub mod tribulation;

pub use progress::{
    CultivationProgress, FOUNDATION_FILL_TICKS, MAX_LAYER, QUALITY_UPGRADE_LAYER,
};
pub use quality::{cultivation_rate, QiQuality, QiType};
pub use realm::{Realm, Stage};
pub use tribulation::{HeavenlyTribulation, TribulationOutcome, TRIBULATION_DANGER};
