//! Simulation configuration loader.

use std::path::Path;

use ops_core::{OperativeMultipliers, OperativeStats, SimConfig};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Everything a session needs besides the catalog: the simulation tuning and
/// the operative's fixed profile.
///
/// Every table and key is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub sim: SimConfig,
    pub operative: OperativeStats,
    pub multipliers: OperativeMultipliers,
}

/// Loader for scenario configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn parse(source: &str) -> LoadResult<ScenarioConfig> {
        toml::from_str(source).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }

    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing the scenario tables
    pub fn load(path: &Path) -> LoadResult<ScenarioConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ops_core::CityName;

    #[test]
    fn bundled_config_matches_defaults() {
        let parsed = ConfigLoader::parse(include_str!("../../data/config.toml")).unwrap();
        assert_eq!(parsed, ScenarioConfig::default());
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let parsed = ConfigLoader::parse(
            r#"
            [sim]
            rank_multiplier = 2.5
            starting_city = "New Tokyo"

            [operative]
            agility = 400.0
            "#,
        )
        .unwrap();
        assert_eq!(parsed.sim.rank_multiplier, 2.5);
        assert_eq!(parsed.sim.skill_cost_multiplier, 1.0);
        assert_eq!(parsed.sim.starting_city, CityName::NewTokyo);
        assert_eq!(parsed.operative.agility, 400.0);
        assert_eq!(parsed.operative.charisma, OperativeStats::DEFAULT_LEVEL);
        assert_eq!(parsed.multipliers, OperativeMultipliers::default());
    }

    #[test]
    fn unknown_city_is_rejected() {
        let err = ConfigLoader::parse("[sim]\nstarting_city = \"Atlantis\"").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config TOML"));
    }
}
