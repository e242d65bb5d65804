//! Worlds and zones, consumed only as a source of time flow

pub mod map;

pub use map::{World, WorldMap, Zone};
