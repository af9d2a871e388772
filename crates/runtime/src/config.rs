//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use ops_content::{ConfigLoader, ScenarioConfig};

use crate::error::{Result, RuntimeError};

/// Settings the session needs besides the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    /// Seed of the session's random source.
    pub seed: u64,
    /// Number of events the session keeps.
    pub event_log_capacity: usize,
    /// Overrides the scenario's global rank multiplier.
    pub rank_multiplier: Option<f64>,
    /// Overrides the scenario's skill cost multiplier.
    pub skill_cost_multiplier: Option<f64>,
    /// TOML scenario file; built-in defaults when absent.
    pub scenario_path: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            event_log_capacity: Self::DEFAULT_EVENT_LOG_CAPACITY,
            rank_multiplier: None,
            skill_cost_multiplier: None,
            scenario_path: None,
        }
    }
}

impl RuntimeConfig {
    pub const DEFAULT_SEED: u64 = 0x5eed;
    pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 256;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `OPS_SEED` - Seed of the random source (default: 0x5eed)
    /// - `OPS_EVENT_LOG_CAPACITY` - Events kept by the session (default: 256)
    /// - `OPS_RANK_MULTIPLIER` - Global rank multiplier override
    /// - `OPS_SKILL_COST_MULTIPLIER` - Skill cost multiplier override
    /// - `OPS_CONFIG` - Path to a TOML scenario file
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("OPS_SEED") {
            config.seed = seed;
        }
        if let Some(capacity) = read_env::<usize>("OPS_EVENT_LOG_CAPACITY") {
            config.event_log_capacity = capacity.max(1);
        }
        config.rank_multiplier = read_env::<f64>("OPS_RANK_MULTIPLIER").filter(|m| m.is_finite());
        config.skill_cost_multiplier =
            read_env::<f64>("OPS_SKILL_COST_MULTIPLIER").filter(|m| m.is_finite() && *m > 0.0);
        config.scenario_path = env::var("OPS_CONFIG").ok().map(PathBuf::from);

        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Loads the scenario file (if any) and applies the overrides.
    pub fn scenario(&self) -> Result<ScenarioConfig> {
        let mut scenario = match &self.scenario_path {
            Some(path) => ConfigLoader::load(path).map_err(RuntimeError::content)?,
            None => ScenarioConfig::default(),
        };
        if let Some(multiplier) = self.rank_multiplier {
            scenario.sim.rank_multiplier = multiplier;
        }
        if let Some(multiplier) = self.skill_cost_multiplier {
            scenario.sim.skill_cost_multiplier = multiplier;
        }
        Ok(scenario)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn overrides_apply_on_top_of_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sim]\nrank_multiplier = 3.0\nskill_cost_multiplier = 2.0").unwrap();

        let config = RuntimeConfig {
            rank_multiplier: Some(0.5),
            scenario_path: Some(file.path().to_path_buf()),
            ..RuntimeConfig::default()
        };
        let scenario = config.scenario().unwrap();
        assert_eq!(scenario.sim.rank_multiplier, 0.5);
        assert_eq!(scenario.sim.skill_cost_multiplier, 2.0);
    }

    #[test]
    fn missing_file_is_a_content_error() {
        let config = RuntimeConfig {
            scenario_path: Some(PathBuf::from("/no/such/scenario.toml")),
            ..RuntimeConfig::default()
        };
        assert!(matches!(config.scenario(), Err(RuntimeError::Content { .. })));
    }
}
