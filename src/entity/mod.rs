//! Player aggregate and the records it owns

pub mod equipment;
pub mod player;
pub mod stats;
pub mod talents;

pub use equipment::{default_equipment, Equipment, EquipmentSlot};
pub use player::Player;
pub use stats::PlayerStats;
pub use talents::{CoreStats, TalentSheet};
