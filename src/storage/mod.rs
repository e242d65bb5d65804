//! TOML-file persistence for players, worlds and the calendar

pub mod repository;

pub use repository::{CalendarRepository, PlayerRepository, WorldRepository};
