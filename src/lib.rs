//! Heaven and Earth - xianxia cultivation progression engine
//!
//! Players cultivate passively as wall-clock time passes. Elapsed time is
//! converted into ticks (scaled by world and zone time flow), ticks feed a
//! cultivation state machine, and milestone notes are handed back to the
//! host for display.

pub mod core;
pub mod cultivation;
pub mod entity;
pub mod simulation;
pub mod storage;
pub mod world;
