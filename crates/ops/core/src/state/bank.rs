//! Bounded time accumulators: the overflow bank and the bonus-time store.

use crate::config::SimConfig;

/// Seconds earned past an action's completion, carried into its repetition.
///
/// The balance never exceeds the cap passed at deposit time (one full
/// duration of the next repetition).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverflowBank {
    banked: f64,
}

impl OverflowBank {
    pub fn banked(&self) -> f64 {
        self.banked
    }

    /// Replaces the balance with `seconds`, capped at `cap`.
    pub fn deposit(&mut self, seconds: f64, cap: f64) {
        self.banked = seconds.clamp(0.0, cap.max(0.0));
    }

    /// Empties the bank, returning what it held.
    pub fn take(&mut self) -> f64 {
        core::mem::take(&mut self.banked)
    }

    pub fn clear(&mut self) {
        self.banked = 0.0;
    }
}

/// Engine cycles stored by the scheduler and consumed by `process`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoredCycles {
    cycles: u64,
}

impl StoredCycles {
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn store(&mut self, cycles: u64) {
        self.cycles = self.cycles.saturating_add(cycles);
    }

    /// Withdraws whole seconds, at most `SimConfig::MAX_SECONDS_PER_PROCESS`.
    pub fn consume(&mut self) -> u64 {
        let seconds =
            (self.cycles / SimConfig::CYCLES_PER_SECOND).min(SimConfig::MAX_SECONDS_PER_PROCESS);
        self.cycles -= seconds * SimConfig::CYCLES_PER_SECOND;
        seconds
    }

    /// `round(cycles / 5) * 1000`
    pub fn bonus_time_ms(&self) -> u64 {
        let seconds = (self.cycles as f64 / SimConfig::CYCLES_PER_SECOND as f64).round();
        seconds as u64 * 1000
    }
}
