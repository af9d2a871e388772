use crate::state::CityName;

/// Simulation configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Global multiplier applied to every rank reward.
    pub rank_multiplier: f64,
    /// Global multiplier applied to skill upgrade prices.
    pub skill_cost_multiplier: f64,
    /// City the operative starts in.
    pub starting_city: CityName,
    /// Whether the random city events fire during `tick`.
    pub random_events: bool,
}

impl SimConfig {
    // ===== time =====
    /// Engine cycles per simulated second (bonus time is banked in cycles).
    pub const CYCLES_PER_SECOND: u64 = 5;
    /// Upper bound of seconds consumed from the bonus bank per `process` call.
    pub const MAX_SECONDS_PER_PROCESS: u64 = 5;

    // ===== action timing =====
    pub const DIFFICULTY_TO_TIME_FACTOR: f64 = 10.0;
    pub const EFF_AGI_EXPONENTIAL_FACTOR: f64 = 0.04;
    pub const EFF_DEX_EXPONENTIAL_FACTOR: f64 = 0.035;
    pub const EFF_AGI_LINEAR_FACTOR: f64 = 10e3;
    pub const EFF_DEX_LINEAR_FACTOR: f64 = 10e3;
    pub const BASE_RECRUITMENT_TIME: f64 = 300.0;
    pub const MIN_RECRUITMENT_TIME: f64 = 10.0;
    pub const TRAINING_DURATION: f64 = 30.0;

    // ===== stamina =====
    pub const BASE_STAMINA_LOSS: f64 = 0.285;
    pub const STAMINA_GAIN_PER_SECOND: f64 = 0.0085;
    pub const MAX_STAMINA_TO_GAIN_FACTOR: f64 = 70000.0;
    pub const DIFF_MULT_EXPONENTIAL_FACTOR: f64 = 0.28;
    pub const DIFF_MULT_LINEAR_FACTOR: f64 = 650.0;
    /// Fraction of an action's stamina cost lost again when it fails.
    pub const FAILURE_STAMINA_FRACTION: f64 = 0.5;
    /// Percent of max stamina restored per regeneration-chamber cycle.
    pub const REGENERATION_STAMINA_PERCENT: f64 = 1.0;
    pub const TRAINING_STAMINA_BONUS: f64 = 0.04;

    // ===== city =====
    pub const CHAOS_THRESHOLD: f64 = 50.0;
    pub const CHAOS_DECAY_PER_SECOND: f64 = 0.0001;
    pub const INCITE_VIOLENCE_CHAOS: f64 = 10.0;
    /// Pool growth granted by one Incite Violence, in seconds of normal growth.
    pub const INCITE_VIOLENCE_GROWTH_SECONDS: f64 = 180.0;
    pub const DIPLOMACY_CHARISMA_EXPONENT: f64 = 0.045;
    pub const DIPLOMACY_CHARISMA_LINEAR: f64 = 1e3;
    pub const POPULATION_THRESHOLD: f64 = 1e9;
    pub const POPULATION_EXPONENT: f64 = 0.7;

    // ===== progression =====
    pub const RANKS_PER_SKILL_POINT: f64 = 3.0;
    pub const CONTRACT_SUCCESSES_PER_LEVEL: f64 = 3.0;
    pub const OPERATION_SUCCESSES_PER_LEVEL: f64 = 2.5;
    pub const CONTRACT_BASE_MONEY_GAIN: f64 = 250e3;
    pub const FIELD_ANALYSIS_RANK_GAIN: f64 = 0.1;
    /// Seconds over which a pool grows by its `count_growth`.
    pub const ACTION_COUNT_GROWTH_PERIOD: f64 = 480.0;

    // ===== random events =====
    pub const RANDOM_EVENT_MIN_SECONDS: i64 = 240;
    pub const RANDOM_EVENT_MAX_SECONDS: i64 = 600;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_RANK_MULTIPLIER: f64 = 1.0;
    pub const DEFAULT_SKILL_COST_MULTIPLIER: f64 = 1.0;

    pub fn new() -> Self {
        Self {
            rank_multiplier: Self::DEFAULT_RANK_MULTIPLIER,
            skill_cost_multiplier: Self::DEFAULT_SKILL_COST_MULTIPLIER,
            starting_city: CityName::Sector12,
            random_events: true,
        }
    }

    pub fn with_rank_multiplier(mut self, rank_multiplier: f64) -> Self {
        self.rank_multiplier = rank_multiplier;
        self
    }

    pub fn with_skill_cost_multiplier(mut self, skill_cost_multiplier: f64) -> Self {
        self.skill_cost_multiplier = skill_cost_multiplier;
        self
    }

    pub fn with_random_events(mut self, enabled: bool) -> Self {
        self.random_events = enabled;
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
