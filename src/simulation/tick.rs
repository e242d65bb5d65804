//! Tick system - converts elapsed wall-clock time into cultivation ticks
//!
//! Real seconds become real ticks (`SECONDS_PER_TICK` each), real ticks are
//! scaled by the player's time flow, and the fractional remainder is carried
//! in the player's `tick_buffer` so that slow zones still accrue progress.
//!
//! Two modes share the same arithmetic:
//! - catch-up after downtime (whole ticks only, may apply nothing)
//! - the live loop (always at least one real tick per cycle)

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{Tick, Timestamp};
use crate::entity::player::Player;

/// Real seconds per cultivation tick (one in-game day)
pub const SECONDS_PER_TICK: Timestamp = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickMode {
    /// Offline elapsed time; integer division, zero ticks allowed
    CatchUp,
    /// Periodic timer; floor of one real tick
    Live,
}

/// Result of planning one tick application
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickPlan {
    /// Whole real-time ticks covered by elapsed time
    pub real_ticks: Tick,
    /// Carried buffer plus scaled real ticks
    pub total_ticks: f64,
    /// Whole ticks to feed into cultivation
    pub ticks_to_apply: Tick,
    /// New fractional carry, in [0, 1)
    pub tick_buffer: f64,
    /// New last-tick timestamp, never past `now`
    pub last_tick_timestamp: Timestamp,
}

fn sane_time_flow(time_flow: f64) -> f64 {
    if time_flow.is_finite() && time_flow > 0.0 {
        time_flow
    } else {
        1.0
    }
}

fn sane_buffer(tick_buffer: f64) -> f64 {
    if tick_buffer.is_finite() {
        tick_buffer.clamp(0.0, 1.0 - f64::EPSILON)
    } else {
        0.0
    }
}

/// Plan how many ticks to apply between `last_tick_timestamp` and `now`
pub fn plan_ticks(
    last_tick_timestamp: Timestamp,
    now: Timestamp,
    tick_buffer: f64,
    time_flow: f64,
    mode: TickMode,
) -> TickPlan {
    let elapsed = (now - last_tick_timestamp).max(0);
    let mut real_ticks = (elapsed / SECONDS_PER_TICK) as Tick;
    if mode == TickMode::Live {
        real_ticks = real_ticks.max(1);
    }

    let total_ticks = sane_buffer(tick_buffer) + real_ticks as f64 * sane_time_flow(time_flow);
    let ticks_to_apply = total_ticks.floor() as Tick;
    let carry = (total_ticks - ticks_to_apply as f64).max(0.0);

    let advanced = last_tick_timestamp.saturating_add(real_ticks as Timestamp * SECONDS_PER_TICK);

    TickPlan {
        real_ticks,
        total_ticks,
        ticks_to_apply,
        tick_buffer: carry,
        last_tick_timestamp: advanced.min(now),
    }
}

/// Advance one player's clock to `now` and apply the resulting ticks
///
/// Returns milestone notes from cultivation, in order.
pub fn advance_player<R: Rng + ?Sized>(
    player: &mut Player,
    now: Timestamp,
    time_flow: f64,
    mode: TickMode,
    rng: &mut R,
) -> Vec<String> {
    let plan = plan_ticks(
        player.last_tick_timestamp,
        now,
        player.tick_buffer,
        time_flow,
        mode,
    );

    tracing::trace!(
        player = %player.id,
        real_ticks = plan.real_ticks,
        ticks_to_apply = plan.ticks_to_apply,
        carry = plan.tick_buffer,
        "tick plan"
    );

    let notes = if plan.ticks_to_apply > 0 {
        player.apply_ticks(plan.ticks_to_apply, rng)
    } else {
        Vec::new()
    };

    player.tick_buffer = plan.tick_buffer;
    player.last_tick_timestamp = plan.last_tick_timestamp;

    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catch_up_drops_partial_real_tick() {
        let plan = plan_ticks(0, 150, 0.0, 1.0, TickMode::CatchUp);
        assert_eq!(plan.real_ticks, 2);
        assert_eq!(plan.ticks_to_apply, 2);
        assert_eq!(plan.tick_buffer, 0.0);
        assert_eq!(plan.last_tick_timestamp, 120);
    }

    #[test]
    fn test_fractional_carry() {
        let plan = plan_ticks(0, 60, 0.7, 1.0, TickMode::CatchUp);
        assert_eq!(plan.real_ticks, 1);
        assert!((plan.total_ticks - 1.7).abs() < 1e-9);
        assert_eq!(plan.ticks_to_apply, 1);
        assert!((plan.tick_buffer - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_slow_time_flow_accumulates_in_buffer() {
        let plan = plan_ticks(0, 60, 0.0, 0.4, TickMode::CatchUp);
        assert_eq!(plan.ticks_to_apply, 0);
        assert!((plan.tick_buffer - 0.4).abs() < 1e-9);

        let plan = plan_ticks(60, 180, plan.tick_buffer, 0.4, TickMode::CatchUp);
        assert_eq!(plan.real_ticks, 2);
        assert_eq!(plan.ticks_to_apply, 1);
        assert!((plan.tick_buffer - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_fast_time_flow_multiplies_ticks() {
        let plan = plan_ticks(0, 600, 0.0, 2.5, TickMode::CatchUp);
        assert_eq!(plan.real_ticks, 10);
        assert_eq!(plan.ticks_to_apply, 25);
        assert_eq!(plan.tick_buffer, 0.0);
    }

    #[test]
    fn test_zero_elapsed_catch_up_is_idempotent() {
        let first = plan_ticks(1_000, 1_000, 0.3, 1.0, TickMode::CatchUp);
        assert_eq!(first.ticks_to_apply, 0);
        assert_eq!(first.last_tick_timestamp, 1_000);

        let second = plan_ticks(
            first.last_tick_timestamp,
            1_000,
            first.tick_buffer,
            1.0,
            TickMode::CatchUp,
        );
        assert_eq!(second, first);
    }

    #[test]
    fn test_live_mode_enforces_one_tick() {
        let plan = plan_ticks(1_000, 1_010, 0.0, 1.0, TickMode::Live);
        assert_eq!(plan.real_ticks, 1);
        assert_eq!(plan.ticks_to_apply, 1);
        // Clamped so the clock never runs ahead of now
        assert_eq!(plan.last_tick_timestamp, 1_010);
    }

    #[test]
    fn test_clock_in_future_is_pulled_back() {
        let plan = plan_ticks(5_000, 4_000, 0.0, 1.0, TickMode::CatchUp);
        assert_eq!(plan.real_ticks, 0);
        assert_eq!(plan.last_tick_timestamp, 4_000);
    }

    #[test]
    fn test_bad_inputs_are_normalised() {
        let plan = plan_ticks(0, 120, f64::NAN, -3.0, TickMode::CatchUp);
        assert_eq!(plan.ticks_to_apply, 2);
        assert_eq!(plan.tick_buffer, 0.0);
    }
}
