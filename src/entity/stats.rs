//! Lifetime counters for a cultivator

use serde::{Deserialize, Serialize};

/// Write-only accumulators
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub enemies_defeated: u64,
    pub tribulations_survived: u64,
    pub hours_cultivated: f64,
    pub steps_travelled: u64,
}

impl PlayerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record cultivation time (60 ticks = one hour of real time)
    pub fn record_cultivation(&mut self, ticks: u64) {
        self.hours_cultivated += ticks as f64 / 60.0;
    }

    pub fn record_tribulations(&mut self, count: u64) {
        self.tribulations_survived += count;
    }

    pub fn record_steps(&mut self, steps: u64) {
        self.steps_travelled += steps;
    }

    pub fn record_defeat(&mut self) {
        self.enemies_defeated += 1;
    }

    /// Clamp values a hand-edited save might have broken
    pub fn sanitize(&mut self) {
        if !self.hours_cultivated.is_finite() || self.hours_cultivated < 0.0 {
            self.hours_cultivated = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cultivation_hours_accumulate() {
        let mut stats = PlayerStats::new();
        stats.record_cultivation(90);
        stats.record_cultivation(30);
        assert!((stats.hours_cultivated - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_counters_accumulate() {
        let mut stats = PlayerStats::new();
        stats.record_tribulations(2);
        stats.record_steps(17);
        stats.record_steps(3);
        stats.record_defeat();
        assert_eq!(stats.tribulations_survived, 2);
        assert_eq!(stats.steps_travelled, 20);
        assert_eq!(stats.enemies_defeated, 1);
    }

    #[test]
    fn test_sanitize_resets_negative_hours() {
        let mut stats = PlayerStats {
            hours_cultivated: -4.0,
            ..PlayerStats::default()
        };
        stats.sanitize();
        assert_eq!(stats.hours_cultivated, 0.0);
    }
}
