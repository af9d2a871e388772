//! Content factory for building a catalog and configuration from a data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use ops_core::{ActionDefinition, Catalog, SkillDefinition};

use crate::loaders::{ActionLoader, ConfigLoader, LoadResult, ScenarioConfig, SkillLoader};

/// Content factory that loads all simulation content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── skills.ron
/// └── actions/
///     ├── contracts.ron
///     ├── operations.ron
///     ├── black_ops.ron
///     └── general.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the scenario from `config.toml`.
    pub fn load_config(&self) -> LoadResult<ScenarioConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load every action table from `actions/`.
    pub fn load_actions(&self) -> LoadResult<Vec<ActionDefinition>> {
        ActionLoader::load_dir(&self.data_dir.join("actions"))
    }

    /// Load the skill tree from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillDefinition>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load and validate the full catalog.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let actions = self.load_actions()?;
        let skills = self.load_skills()?;
        Catalog::new(actions, skills)
            .with_context(|| format!("catalog in {} failed validation", self.data_dir.display()))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
