//! Time-driven progression: tick planning and the player service

pub mod service;
pub mod tick;

pub use service::PlayerService;
pub use tick::{advance_player, plan_ticks, TickMode, TickPlan, SECONDS_PER_TICK};
