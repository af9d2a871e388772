use crate::catalog::{ActionDefinition, Leveling};

/// Size of an action's pool.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Remaining {
    Finite(f64),
    Unlimited,
}

impl Remaining {
    /// Whole units available, `+inf` when unlimited.
    pub fn floored(&self) -> f64 {
        match self {
            Self::Finite(count) => count.floor(),
            Self::Unlimited => f64::INFINITY,
        }
    }

    pub fn has_one(&self) -> bool {
        self.floored() >= 1.0
    }

    fn add(&mut self, amount: f64) {
        if let Self::Finite(count) = self {
            *count = (*count + amount).max(0.0);
        }
    }
}

/// Per-action mutable progress, created lazily from its definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionState {
    pub level: u32,
    pub max_level: u32,
    pub auto_level: bool,
    pub remaining: Remaining,
    pub successes: u64,
    pub failures: u64,
}

impl ActionState {
    pub fn new(definition: &ActionDefinition) -> Self {
        Self {
            level: 1,
            max_level: 1,
            auto_level: true,
            remaining: definition
                .initial_count
                .map_or(Remaining::Unlimited, Remaining::Finite),
            successes: 0,
            failures: 0,
        }
    }

    /// Records a success: consumes one pool unit, may raise `max_level`, then
    /// applies the level policy.
    pub fn record_success(&mut self, leveling: Leveling) {
        self.successes += 1;
        self.remaining.add(-1.0);
        if let Some(needed) = leveling.successes_needed(self.max_level)
            && self.successes >= needed
        {
            self.max_level += 1;
        }
        self.level = next_level(self.level, self.max_level, self.auto_level);
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
        self.level = next_level(self.level, self.max_level, self.auto_level);
    }

    pub fn grow(&mut self, amount: f64) {
        self.remaining.add(amount);
    }
}

/// Level to use after an outcome.
///
/// Auto-level always jumps to the highest unlocked level; a manual level is
/// kept as long as it is still unlocked.
pub fn next_level(current: u32, max_level: u32, auto_level: bool) -> u32 {
    let max_level = max_level.max(1);
    if auto_level {
        max_level
    } else {
        current.clamp(1, max_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ActionType;

    fn contract() -> ActionDefinition {
        ActionDefinition::new(ActionType::Contract, "Tracking", 125.0).with_pool(10.0, 0.0)
    }

    #[test]
    fn next_level_policy() {
        assert_eq!(next_level(1, 4, true), 4);
        assert_eq!(next_level(2, 4, false), 2);
        assert_eq!(next_level(6, 4, false), 4);
        assert_eq!(next_level(0, 0, false), 1);
    }

    #[test]
    fn max_level_grows_after_required_successes() {
        let definition = contract();
        let mut state = ActionState::new(&definition);
        state.auto_level = false;

        state.record_success(definition.leveling);
        state.record_success(definition.leveling);
        assert_eq!(state.max_level, 1);
        state.record_success(definition.leveling);
        assert_eq!(state.max_level, 2);
        assert_eq!(state.level, 1);
        assert_eq!(state.remaining, Remaining::Finite(7.0));
    }

    #[test]
    fn auto_level_follows_max_level() {
        let definition = contract();
        let mut state = ActionState::new(&definition);
        for _ in 0..3 {
            state.record_success(definition.leveling);
        }
        assert_eq!(state.level, 2);
    }

    #[test]
    fn pool_never_goes_negative() {
        let mut remaining = Remaining::Finite(0.4);
        remaining.add(-1.0);
        assert_eq!(remaining, Remaining::Finite(0.0));
        assert!(!remaining.has_one());
        assert!(Remaining::Unlimited.has_one());
    }
}
